//! Ledger transaction endpoints.

use api_types::{
    Envelope,
    transaction::{
        TransactionCreated, TransactionDeleted, TransactionList, TransactionNew,
        TransactionUpdate, TransactionView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use engine::{
    Transaction, TransactionListFilter, TransactionNewCmd, TransactionUpdateCmd, User,
};

use crate::{ServerError, server::ServerState};

fn view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        from_user_id: tx.from_user_id,
        to_user_id: tx.to_user_id,
        kind: tx.kind.as_str().to_string(),
        amount: tx.amount.to_string(),
        date: tx.date,
        description: tx.description,
        contact_id: tx.contact_id,
    }
}

/// Records a transaction with the caller as the sender.
pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<Envelope<TransactionCreated>>, ServerError> {
    let mut cmd = TransactionNewCmd::new(
        user.id,
        payload.to_user_id,
        payload.kind,
        payload.amount,
        payload.date,
    );
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    if let Some(contact_id) = payload.contact_id {
        cmd = cmd.contact_id(contact_id);
    }

    let id = state.engine.add_transaction(cmd).await?;
    Ok(Json(Envelope::ok(TransactionCreated { id })))
}

/// Lists transactions visible to the caller, newest first.
pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(payload): Query<TransactionList>,
) -> Result<Json<Envelope<Vec<TransactionView>>>, ServerError> {
    let filter = TransactionListFilter {
        as_sender: payload.as_sender,
        admin: payload.admin.unwrap_or(false),
        date_from: payload.date_from,
        date_to: payload.date_to,
        limit: payload.limit,
        offset: payload.offset.unwrap_or(0),
    };

    let txs = state.engine.get_transactions(user.id, &filter).await?;
    Ok(Json(Envelope::ok(txs.into_iter().map(view).collect())))
}

/// Patches a transaction; only its sender may do so.
pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<Envelope<TransactionView>>, ServerError> {
    let mut cmd = TransactionUpdateCmd::new(id, user.id);
    if let Some(kind) = payload.kind {
        cmd = cmd.kind(kind);
    }
    if let Some(amount) = payload.amount {
        cmd = cmd.amount(amount);
    }
    if let Some(date) = payload.date {
        cmd = cmd.date(date);
    }
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }

    let updated = state.engine.update_transaction(cmd).await?;
    Ok(Json(Envelope::ok(view(updated))))
}

/// Deletes a transaction the caller sent; reports how many rows went away.
pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<TransactionDeleted>>, ServerError> {
    let deleted = state.engine.delete_transaction(id, user.id).await?;
    Ok(Json(Envelope::ok(TransactionDeleted { deleted })))
}
