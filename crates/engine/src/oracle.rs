//! Capability traits the ledger consumes but does not own.
//!
//! The engine never trusts caller-supplied identity claims; it asks these
//! oracles inside the operation's own database transaction so that
//! validation-then-write sequences stay atomic. Production implementations
//! read the `users`/`contacts` tables; tests inject fakes.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};

use crate::{Role, ResultEngine, contacts, users};

/// Answers "does this user exist" and "what is their role".
#[async_trait]
pub trait IdentityOracle: std::fmt::Debug + Send + Sync {
    async fn user_exists(&self, db: &DatabaseTransaction, user_id: i64) -> ResultEngine<bool>;

    /// Returns `None` when the user does not exist.
    async fn user_role(&self, db: &DatabaseTransaction, user_id: i64)
    -> ResultEngine<Option<Role>>;
}

/// Answers "does this contact exist and belong to this user".
#[async_trait]
pub trait ContactDirectory: std::fmt::Debug + Send + Sync {
    /// Returns `false` both for foreign and for nonexistent contacts.
    async fn contact_owned_by(
        &self,
        db: &DatabaseTransaction,
        contact_id: i64,
        user_id: i64,
    ) -> ResultEngine<bool>;
}

/// [`IdentityOracle`] backed by the `users` table.
#[derive(Debug, Default)]
pub struct DbIdentityOracle;

#[async_trait]
impl IdentityOracle for DbIdentityOracle {
    async fn user_exists(&self, db: &DatabaseTransaction, user_id: i64) -> ResultEngine<bool> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map(|model| model.is_some())
            .map_err(Into::into)
    }

    async fn user_role(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<Option<Role>> {
        let row = users::Entity::find_by_id(user_id).one(db).await?;
        row.as_ref()
            .map(|m| Role::try_from(m.role.as_str()))
            .transpose()
    }
}

/// [`ContactDirectory`] backed by the `contacts` table.
#[derive(Debug, Default)]
pub struct DbContactDirectory;

#[async_trait]
impl ContactDirectory for DbContactDirectory {
    async fn contact_owned_by(
        &self,
        db: &DatabaseTransaction,
        contact_id: i64,
        user_id: i64,
    ) -> ResultEngine<bool> {
        contacts::Entity::find_by_id(contact_id)
            .filter(contacts::Column::UserId.eq(user_id))
            .one(db)
            .await
            .map(|model| model.is_some())
            .map_err(Into::into)
    }
}
