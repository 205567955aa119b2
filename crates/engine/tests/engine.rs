use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use engine::{
    ContactDirectory, ContactNewCmd, Engine, EngineError, IdentityOracle, Role,
    TransactionListFilter, TransactionNewCmd,
};
use migration::MigratorTrait;

async fn fresh_db() -> sea_orm::DatabaseConnection {
    let db = engine::storage::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

#[tokio::test]
async fn add_user_enforces_unique_usernames() {
    let engine = Engine::builder().database(fresh_db().await).build().await.unwrap();

    let alice = engine.add_user("alice", Role::User).await.unwrap();
    let err = engine.add_user("alice", Role::Admin).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("alice".to_string()));

    let user = engine.user(alice).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::User);

    let err = engine.user(999).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user".to_string()));
}

#[tokio::test]
async fn rebind_switches_the_backing_store() {
    let engine = Engine::builder().database(fresh_db().await).build().await.unwrap();
    let alice = engine.add_user("alice", Role::User).await.unwrap();
    let bob = engine.add_user("bob", Role::User).await.unwrap();
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19"))
        .await
        .unwrap();

    let old = engine.rebind(fresh_db().await).await;

    // The new store is empty; the old handle still owns the data.
    let err = engine.user(alice).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user".to_string()));
    let txs = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    assert!(txs.is_empty());

    let revived = Engine::builder().database(old).build().await.unwrap();
    let txs = revived
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    assert_eq!(txs.len(), 1);
}

#[derive(Debug)]
struct DenyAll {
    calls: AtomicUsize,
}

#[async_trait]
impl IdentityOracle for DenyAll {
    async fn user_exists(&self, _db: &DatabaseTransaction, _user_id: i64) -> Result<bool, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }

    async fn user_role(
        &self,
        _db: &DatabaseTransaction,
        _user_id: i64,
    ) -> Result<Option<Role>, EngineError> {
        Ok(None)
    }
}

#[tokio::test]
async fn identity_oracle_is_consulted_over_the_users_table() {
    let db = fresh_db().await;
    let seeded = Engine::builder().database(db.clone()).build().await.unwrap();
    let alice = seeded.add_user("alice", Role::User).await.unwrap();
    let bob = seeded.add_user("bob", Role::User).await.unwrap();

    let oracle = Arc::new(DenyAll {
        calls: AtomicUsize::new(0),
    });
    let engine = Engine::builder()
        .database(db)
        .identity(oracle.clone())
        .build()
        .await
        .unwrap();

    // Both rows exist, but the injected oracle has the final word.
    let err = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("sender user not exists".to_string())
    );
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
}

#[derive(Debug)]
struct NoContacts;

#[async_trait]
impl ContactDirectory for NoContacts {
    async fn contact_owned_by(
        &self,
        _db: &DatabaseTransaction,
        _contact_id: i64,
        _user_id: i64,
    ) -> Result<bool, EngineError> {
        Ok(false)
    }
}

#[tokio::test]
async fn contact_directory_is_consulted_over_the_contacts_table() {
    let db = fresh_db().await;
    let seeded = Engine::builder().database(db.clone()).build().await.unwrap();
    let alice = seeded.add_user("alice", Role::User).await.unwrap();
    let bob = seeded.add_user("bob", Role::User).await.unwrap();
    let carlo = seeded
        .add_contact(ContactNewCmd::new(alice, "Carlo"))
        .await
        .unwrap();

    let engine = Engine::builder()
        .database(db)
        .directory(Arc::new(NoContacts))
        .build()
        .await
        .unwrap();

    let err = engine
        .add_transaction(
            TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19").contact_id(carlo),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("contact not exists".to_string())
    );
}
