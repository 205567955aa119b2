use sea_orm::{DatabaseTransaction, EntityTrait};

use crate::{EngineError, ResultEngine, Role, transactions};

use super::Engine;

impl Engine {
    /// Fails with a referential error naming the missing side.
    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
        label: &str,
    ) -> ResultEngine<()> {
        if !self.identity.user_exists(db, user_id).await? {
            return Err(EngineError::InvalidReference(format!(
                "{label} user not exists"
            )));
        }
        Ok(())
    }

    /// Fails for contacts that are absent or owned by someone else; the two
    /// cases are deliberately indistinguishable to the caller.
    pub(super) async fn require_contact_usable(
        &self,
        db: &DatabaseTransaction,
        contact_id: i64,
        user_id: i64,
    ) -> ResultEngine<()> {
        if !self.directory.contact_owned_by(db, contact_id, user_id).await? {
            return Err(EngineError::InvalidReference(
                "contact not exists".to_string(),
            ));
        }
        Ok(())
    }

    /// Server-side role re-check; caller-asserted flags are never trusted.
    pub(super) async fn is_admin(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<bool> {
        Ok(self.identity.user_role(db, user_id).await? == Some(Role::Admin))
    }

    pub(super) async fn find_transaction(
        &self,
        db: &DatabaseTransaction,
        transaction_id: i64,
    ) -> ResultEngine<Option<transactions::Model>> {
        transactions::Entity::find_by_id(transaction_id)
            .one(db)
            .await
            .map_err(Into::into)
    }
}
