use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{Category, EngineError, ResultEngine, categories, validation};

use super::{Engine, with_tx};

impl Engine {
    /// Adds an expense category for the caller; names are unique per user.
    pub async fn add_category(
        &self,
        user_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> ResultEngine<i64> {
        let name = validation::require_name(name, "category")?;
        let description = validation::optional_text(description);

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id, "owner").await?;

            let existing = categories::Entity::find()
                .filter(categories::Column::UserId.eq(user_id))
                .filter(categories::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(name));
            }

            let model = categories::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id),
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(description),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let inserted = model.insert(&db_tx).await?;
            Ok(inserted.id)
        })
    }

    pub async fn categories(&self, user_id: i64) -> ResultEngine<Vec<Category>> {
        with_tx!(self, |db_tx| {
            let rows = categories::Entity::find()
                .filter(categories::Column::UserId.eq(user_id))
                .order_by_asc(categories::Column::Name)
                .all(&db_tx)
                .await?;
            rows.into_iter().map(Category::try_from).collect()
        })
    }

    /// Removes a category if it belongs to the caller; idempotent.
    pub async fn delete_category(&self, user_id: i64, category_id: i64) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let result = categories::Entity::delete_many()
                .filter(categories::Column::Id.eq(category_id))
                .filter(categories::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            Ok(result.rows_affected)
        })
    }
}
