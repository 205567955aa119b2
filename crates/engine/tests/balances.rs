use engine::{
    BalanceBreakdown, ContactNewCmd, Engine, EngineError, MoneyCents, Role, TransactionNewCmd,
};
use migration::MigratorTrait;

async fn engine_with_users() -> (Engine, i64, i64) {
    let db = engine::storage::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    let alice = engine.add_user("alice", Role::User).await.unwrap();
    let bob = engine.add_user("bob", Role::User).await.unwrap();
    (engine, alice, bob)
}

#[tokio::test]
async fn empty_ledger_yields_zero_everywhere() {
    let (engine, alice, _bob) = engine_with_users().await;

    assert_eq!(
        engine.balance_breakdown(alice).await.unwrap(),
        BalanceBreakdown::default()
    );
    assert_eq!(engine.balance(alice).await.unwrap(), MoneyCents::new(0));
    assert_eq!(engine.net_balance(alice).await.unwrap(), MoneyCents::new(0));
}

#[tokio::test]
async fn legacy_and_net_balances_diverge_by_direction() {
    let (engine, alice, bob) = engine_with_users().await;
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "50", "2025-08-19"))
        .await
        .unwrap();
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "debit", "20", "2025-08-20"))
        .await
        .unwrap();

    // The symmetric flavor ignores direction, so both parties agree.
    assert_eq!(engine.balance(alice).await.unwrap(), MoneyCents::new(3000));
    assert_eq!(engine.balance(bob).await.unwrap(), MoneyCents::new(3000));

    // The net flavor does not.
    assert_eq!(
        engine.net_balance(alice).await.unwrap(),
        MoneyCents::new(-2000)
    );
    assert_eq!(engine.net_balance(bob).await.unwrap(), MoneyCents::new(5000));
}

#[tokio::test]
async fn breakdown_partials_are_consistent_with_both_flavors() {
    let (engine, alice, bob) = engine_with_users().await;
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "50", "2025-08-19"))
        .await
        .unwrap();
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "debit", "20", "2025-08-20"))
        .await
        .unwrap();

    let breakdown = engine.balance_breakdown(alice).await.unwrap();
    assert_eq!(breakdown.credits_received, MoneyCents::new(0));
    assert_eq!(breakdown.debits_sent, MoneyCents::new(2000));
    assert_eq!(breakdown.credits_sent, MoneyCents::new(5000));
    assert_eq!(breakdown.debits_received, MoneyCents::new(0));
    assert_eq!(breakdown.net(), engine.net_balance(alice).await.unwrap());
    assert_eq!(breakdown.legacy(), engine.balance(alice).await.unwrap());
}

#[tokio::test]
async fn exact_cents_across_many_small_amounts() {
    let (engine, alice, bob) = engine_with_users().await;
    for _ in 0..10 {
        engine
            .add_transaction(TransactionNewCmd::new(bob, alice, "credit", "0.10", "2025-08-19"))
            .await
            .unwrap();
    }

    assert_eq!(
        engine.net_balance(alice).await.unwrap(),
        MoneyCents::new(100)
    );
}

#[tokio::test]
async fn contact_balance_sums_the_sender_perspective() {
    let (engine, alice, bob) = engine_with_users().await;
    let carlo = engine
        .add_contact(ContactNewCmd::new(alice, "Carlo"))
        .await
        .unwrap();

    engine
        .add_transaction(
            TransactionNewCmd::new(alice, bob, "credit", "50", "2025-08-19").contact_id(carlo),
        )
        .await
        .unwrap();
    engine
        .add_transaction(
            TransactionNewCmd::new(alice, bob, "debit", "20", "2025-08-20").contact_id(carlo),
        )
        .await
        .unwrap();
    // Untagged rows stay out of the per-contact sums.
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "debit", "99", "2025-08-21"))
        .await
        .unwrap();

    let balance = engine.contact_balance(alice, carlo).await.unwrap();
    assert_eq!(balance.credits_sent, MoneyCents::new(5000));
    assert_eq!(balance.debits_sent, MoneyCents::new(2000));
    assert_eq!(balance.balance(), MoneyCents::new(3000));
}

#[tokio::test]
async fn contact_with_no_transactions_is_zero_not_an_error() {
    let (engine, alice, _bob) = engine_with_users().await;
    let carlo = engine
        .add_contact(ContactNewCmd::new(alice, "Carlo"))
        .await
        .unwrap();

    let balance = engine.contact_balance(alice, carlo).await.unwrap();
    assert_eq!(balance.balance(), MoneyCents::new(0));
}

#[tokio::test]
async fn foreign_contact_balance_is_rejected() {
    let (engine, alice, bob) = engine_with_users().await;
    let bobs_contact = engine
        .add_contact(ContactNewCmd::new(bob, "Carlo"))
        .await
        .unwrap();

    let err = engine.contact_balance(alice, bobs_contact).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("contact not exists".to_string())
    );
}
