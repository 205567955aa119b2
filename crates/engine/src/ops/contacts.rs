use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{Contact, ContactNewCmd, EngineError, ResultEngine, contacts, validation};

use super::{Engine, with_tx};

impl Engine {
    /// Adds a contact to the caller's address book.
    ///
    /// Names are unique per owner, not globally.
    pub async fn add_contact(&self, cmd: ContactNewCmd) -> ResultEngine<i64> {
        let name = validation::require_name(&cmd.name, "contact")?;

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, cmd.user_id, "owner").await?;

            let existing = contacts::Entity::find()
                .filter(contacts::Column::UserId.eq(cmd.user_id))
                .filter(contacts::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(name));
            }

            let model = contacts::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(cmd.user_id),
                name: ActiveValue::Set(name),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let inserted = model.insert(&db_tx).await?;
            Ok(inserted.id)
        })
    }

    /// Lists the caller's contacts, alphabetically.
    pub async fn contacts(&self, user_id: i64) -> ResultEngine<Vec<Contact>> {
        with_tx!(self, |db_tx| {
            let rows = contacts::Entity::find()
                .filter(contacts::Column::UserId.eq(user_id))
                .order_by_asc(contacts::Column::Name)
                .all(&db_tx)
                .await?;
            rows.into_iter().map(Contact::try_from).collect()
        })
    }

    /// Removes a contact if it belongs to the caller; idempotent.
    ///
    /// Ledger rows pointing at the contact keep existing with the reference
    /// nulled by the schema.
    pub async fn delete_contact(&self, user_id: i64, contact_id: i64) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let result = contacts::Entity::delete_many()
                .filter(contacts::Column::Id.eq(contact_id))
                .filter(contacts::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                tracing::debug!(contact_id, user_id, "delete skipped: contact absent or foreign");
            }
            Ok(result.rows_affected)
        })
    }
}
