//! User registration and identity endpoints.

use api_types::{
    Envelope,
    user::{UserCreated, UserNew, UserView},
};
use axum::{Extension, Json, extract::State};
use engine::{Role, User};

use crate::{ServerError, server::ServerState};

/// Registers a user. This is the only unauthenticated endpoint.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<Json<Envelope<UserCreated>>, ServerError> {
    let role = match payload.role.as_deref() {
        None => Role::User,
        Some(raw) => Role::try_from(raw)?,
    };
    let id = state.engine.add_user(&payload.username, role).await?;

    Ok(Json(Envelope::ok(UserCreated { id })))
}

/// Echoes the authenticated caller.
pub async fn me(Extension(user): Extension<User>) -> Json<Envelope<UserView>> {
    Json(Envelope::ok(UserView {
        id: user.id,
        username: user.username,
        role: user.role.as_str().to_string(),
    }))
}
