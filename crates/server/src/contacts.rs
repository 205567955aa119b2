//! Address-book endpoints.

use api_types::{
    Envelope,
    contact::{ContactCreated, ContactDeleted, ContactNew, ContactView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{ContactNewCmd, User};

use crate::{ServerError, server::ServerState};

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<ContactNew>,
) -> Result<Json<Envelope<ContactCreated>>, ServerError> {
    let id = state
        .engine
        .add_contact(ContactNewCmd::new(user.id, payload.name))
        .await?;
    Ok(Json(Envelope::ok(ContactCreated { id })))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<ContactView>>>, ServerError> {
    let contacts = state.engine.contacts(user.id).await?;
    let views = contacts
        .into_iter()
        .map(|c| ContactView {
            id: c.id,
            name: c.name,
        })
        .collect();
    Ok(Json(Envelope::ok(views)))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<ContactDeleted>>, ServerError> {
    let deleted = state.engine.delete_contact(user.id, id).await?;
    Ok(Json(Envelope::ok(ContactDeleted { deleted })))
}
