//! Balance endpoints, one per flavor.

use api_types::{
    Envelope,
    balance::{BalanceBreakdownView, BalanceView, ContactBalanceView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::User;

use crate::{ServerError, server::ServerState};

/// The historical symmetric balance.
pub async fn legacy(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<BalanceView>>, ServerError> {
    let balance = state.engine.balance(user.id).await?;
    Ok(Json(Envelope::ok(BalanceView {
        balance: balance.to_string(),
    })))
}

/// The net balance: credits received minus debits sent.
pub async fn net(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<BalanceView>>, ServerError> {
    let balance = state.engine.net_balance(user.id).await?;
    Ok(Json(Envelope::ok(BalanceView {
        balance: balance.to_string(),
    })))
}

/// The four partial sums plus both derived flavors.
pub async fn breakdown(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<BalanceBreakdownView>>, ServerError> {
    let breakdown = state.engine.balance_breakdown(user.id).await?;
    Ok(Json(Envelope::ok(BalanceBreakdownView {
        credits_received: breakdown.credits_received.to_string(),
        debits_sent: breakdown.debits_sent.to_string(),
        credits_sent: breakdown.credits_sent.to_string(),
        debits_received: breakdown.debits_received.to_string(),
        net: breakdown.net().to_string(),
        legacy: breakdown.legacy().to_string(),
    })))
}

/// Sender-perspective balance towards one of the caller's contacts.
pub async fn contact(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(contact_id): Path<i64>,
) -> Result<Json<Envelope<ContactBalanceView>>, ServerError> {
    let balance = state.engine.contact_balance(user.id, contact_id).await?;
    Ok(Json(Envelope::ok(ContactBalanceView {
        contact_id,
        credits_sent: balance.credits_sent.to_string(),
        debits_sent: balance.debits_sent.to_string(),
        balance: balance.balance().to_string(),
    })))
}
