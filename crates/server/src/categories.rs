//! Expense category endpoints.

use api_types::{
    Envelope,
    category::{CategoryCreated, CategoryDeleted, CategoryNew, CategoryView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::User;

use crate::{ServerError, server::ServerState};

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<Json<Envelope<CategoryCreated>>, ServerError> {
    let id = state
        .engine
        .add_category(user.id, &payload.name, payload.description.as_deref())
        .await?;
    Ok(Json(Envelope::ok(CategoryCreated { id })))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<CategoryView>>>, ServerError> {
    let categories = state.engine.categories(user.id).await?;
    let views = categories
        .into_iter()
        .map(|c| CategoryView {
            id: c.id,
            name: c.name,
            description: c.description,
        })
        .collect();
    Ok(Json(Envelope::ok(views)))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<CategoryDeleted>>, ServerError> {
    let deleted = state.engine.delete_category(user.id, id).await?;
    Ok(Json(Envelope::ok(CategoryDeleted { deleted })))
}
