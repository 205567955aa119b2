use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};

use crate::{EngineError, ResultEngine, Role, User, users, validation};

use super::{Engine, with_tx};

impl Engine {
    /// Registers a user. Usernames are unique across the system.
    pub async fn add_user(&self, username: &str, role: Role) -> ResultEngine<i64> {
        let username = validation::require_name(username, "user")?;

        with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::Username.eq(username.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(username));
            }

            let model = users::ActiveModel {
                id: ActiveValue::NotSet,
                username: ActiveValue::Set(username),
                role: ActiveValue::Set(role.as_str().to_string()),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let inserted = model.insert(&db_tx).await?;
            Ok(inserted.id)
        })
    }

    pub async fn user(&self, user_id: i64) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find_by_id(user_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;
            User::try_from(model)
        })
    }
}
