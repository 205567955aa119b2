use chrono::NaiveDate;

use engine::{
    ContactNewCmd, Engine, EngineError, MoneyCents, Role, TransactionKind, TransactionListFilter,
    TransactionNewCmd, TransactionUpdateCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = engine::storage::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

async fn engine_with_users() -> (Engine, i64, i64) {
    let engine = engine_with_db().await;
    let alice = engine.add_user("alice", Role::User).await.unwrap();
    let bob = engine.add_user("bob", Role::User).await.unwrap();
    (engine, alice, bob)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn add_transaction_visible_to_both_parties() {
    let (engine, alice, bob) = engine_with_users().await;

    let id = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "50.00", "2025-08-19"))
        .await
        .unwrap();

    for user in [alice, bob] {
        let txs = engine
            .get_transactions(user, &TransactionListFilter::default())
            .await
            .unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id, id);
        assert_eq!(txs[0].kind, TransactionKind::Credit);
        assert_eq!(txs[0].amount, MoneyCents::new(5000));
    }
}

#[tokio::test]
async fn self_transaction_is_rejected() {
    let (engine, alice, _bob) = engine_with_users().await;

    let err = engine
        .add_transaction(TransactionNewCmd::new(alice, alice, "credit", "10", "2025-08-19"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("sender and receiver must be different users".to_string())
    );
}

#[tokio::test]
async fn zero_amount_fails_positivity_not_presence() {
    let (engine, alice, bob) = engine_with_users().await;

    for amount in ["0", "0.00", "-3"] {
        let err = engine
            .add_transaction(TransactionNewCmd::new(alice, bob, "debit", amount, "2025-08-19"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("amount must be positive".to_string())
        );
    }

    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "debit", "0.01", "2025-08-19"))
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_party_is_named_in_the_error() {
    let (engine, alice, _bob) = engine_with_users().await;

    let err = engine
        .add_transaction(TransactionNewCmd::new(alice, 999, "credit", "10", "2025-08-19"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("receiver user not exists".to_string())
    );

    let err = engine
        .add_transaction(TransactionNewCmd::new(999, alice, "credit", "10", "2025-08-19"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("sender user not exists".to_string())
    );
}

#[tokio::test]
async fn foreign_contact_rejected_and_no_row_written() {
    let (engine, alice, bob) = engine_with_users().await;
    let bobs_contact = engine
        .add_contact(ContactNewCmd::new(bob, "Carlo"))
        .await
        .unwrap();

    let err = engine
        .add_transaction(
            TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19")
                .contact_id(bobs_contact),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidReference("contact not exists".to_string())
    );

    let txs = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    assert!(txs.is_empty());
}

#[tokio::test]
async fn delete_is_idempotent_and_sender_scoped() {
    let (engine, alice, bob) = engine_with_users().await;

    assert_eq!(engine.delete_transaction(999, alice).await.unwrap(), 0);

    let id = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19"))
        .await
        .unwrap();

    // The receiver cannot delete; the row survives.
    assert_eq!(engine.delete_transaction(id, bob).await.unwrap(), 0);
    let txs = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    assert_eq!(txs.len(), 1);

    assert_eq!(engine.delete_transaction(id, alice).await.unwrap(), 1);
    assert_eq!(engine.delete_transaction(id, alice).await.unwrap(), 0);
}

#[tokio::test]
async fn update_by_non_sender_is_forbidden_and_leaves_row_unchanged() {
    let (engine, alice, bob) = engine_with_users().await;
    let id = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19"))
        .await
        .unwrap();

    let err = engine
        .update_transaction(TransactionUpdateCmd::new(id, bob).amount("99"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("only the sender may update a transaction".to_string())
    );

    let txs = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    assert_eq!(txs[0].amount, MoneyCents::new(1000));
}

#[tokio::test]
async fn update_distinguishes_missing_from_foreign() {
    let (engine, alice, bob) = engine_with_users().await;
    let id = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19"))
        .await
        .unwrap();

    let err = engine
        .update_transaction(TransactionUpdateCmd::new(999, bob).amount("1"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("transaction".to_string()));

    let err = engine
        .update_transaction(TransactionUpdateCmd::new(id, bob).amount("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn update_revalidates_fields_and_applies_patch() {
    let (engine, alice, bob) = engine_with_users().await;
    let id = engine
        .add_transaction(
            TransactionNewCmd::new(alice, bob, "credit", "10", "2025-08-19").description("lunch"),
        )
        .await
        .unwrap();

    let err = engine
        .update_transaction(TransactionUpdateCmd::new(id, alice))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidField("no fields to update".to_string()));

    let err = engine
        .update_transaction(TransactionUpdateCmd::new(id, alice).amount("0"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("amount must be positive".to_string())
    );

    let updated = engine
        .update_transaction(
            TransactionUpdateCmd::new(id, alice)
                .kind("debit")
                .amount("12,50")
                .date("2025-08-20"),
        )
        .await
        .unwrap();
    assert_eq!(updated.kind, TransactionKind::Debit);
    assert_eq!(updated.amount, MoneyCents::new(1250));
    assert_eq!(updated.date, date("2025-08-20"));
    // Untouched field survives the patch.
    assert_eq!(updated.description.as_deref(), Some("lunch"));
}

#[tokio::test]
async fn listing_orders_by_date_then_insertion_desc() {
    let (engine, alice, bob) = engine_with_users().await;
    for d in ["2025-08-01", "2025-08-20", "2025-08-10"] {
        engine
            .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", d))
            .await
            .unwrap();
    }

    let txs = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    let dates: Vec<_> = txs.iter().map(|tx| tx.date).collect();
    assert_eq!(
        dates,
        vec![date("2025-08-20"), date("2025-08-10"), date("2025-08-01")]
    );
}

#[tokio::test]
async fn same_day_rows_tie_break_on_newest_insert() {
    let (engine, alice, bob) = engine_with_users().await;
    let first = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", "2025-08-19"))
        .await
        .unwrap();
    let second = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "2", "2025-08-19"))
        .await
        .unwrap();

    let txs = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    assert_eq!(txs[0].id, second);
    assert_eq!(txs[1].id, first);
}

#[tokio::test]
async fn limit_and_offset_paginate_the_ordered_list() {
    let (engine, alice, bob) = engine_with_users().await;
    let mut ids = Vec::new();
    for _ in 0..5 {
        let id = engine
            .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", "2025-08-19"))
            .await
            .unwrap();
        ids.push(id);
    }

    let filter = TransactionListFilter {
        limit: Some(2),
        offset: 2,
        ..Default::default()
    };
    let txs = engine.get_transactions(alice, &filter).await.unwrap();
    // Newest first, so page two holds the third and fourth most recent rows.
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].id, ids[2]);
    assert_eq!(txs[1].id, ids[1]);
}

#[tokio::test]
async fn date_range_is_inclusive_on_both_ends() {
    let (engine, alice, bob) = engine_with_users().await;
    for d in ["2025-08-01", "2025-08-10", "2025-08-20"] {
        engine
            .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", d))
            .await
            .unwrap();
    }

    let filter = TransactionListFilter {
        date_from: Some(date("2025-08-10")),
        date_to: Some(date("2025-08-20")),
        ..Default::default()
    };
    let txs = engine.get_transactions(alice, &filter).await.unwrap();
    let dates: Vec<_> = txs.iter().map(|tx| tx.date).collect();
    assert_eq!(dates, vec![date("2025-08-20"), date("2025-08-10")]);
}

#[tokio::test]
async fn inverted_date_range_is_rejected() {
    let (engine, alice, _bob) = engine_with_users().await;

    let filter = TransactionListFilter {
        date_from: Some(date("2025-08-20")),
        date_to: Some(date("2025-08-10")),
        ..Default::default()
    };
    let err = engine.get_transactions(alice, &filter).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidField("invalid range: date_from must be <= date_to".to_string())
    );
}

#[tokio::test]
async fn as_sender_restricts_direction() {
    let (engine, alice, bob) = engine_with_users().await;
    let sent = engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", "2025-08-19"))
        .await
        .unwrap();
    let received = engine
        .add_transaction(TransactionNewCmd::new(bob, alice, "credit", "1", "2025-08-19"))
        .await
        .unwrap();

    let filter = TransactionListFilter {
        as_sender: Some(true),
        ..Default::default()
    };
    let txs = engine.get_transactions(alice, &filter).await.unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, sent);

    let filter = TransactionListFilter {
        as_sender: Some(false),
        ..Default::default()
    };
    let txs = engine.get_transactions(alice, &filter).await.unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, received);
}

#[tokio::test]
async fn admin_flag_from_non_admin_changes_nothing() {
    let (engine, alice, bob) = engine_with_users().await;
    let carol = engine.add_user("carol", Role::User).await.unwrap();
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", "2025-08-19"))
        .await
        .unwrap();
    engine
        .add_transaction(TransactionNewCmd::new(bob, carol, "credit", "1", "2025-08-19"))
        .await
        .unwrap();

    let asserted = TransactionListFilter {
        admin: true,
        ..Default::default()
    };
    let scoped = engine
        .get_transactions(alice, &TransactionListFilter::default())
        .await
        .unwrap();
    let with_flag = engine.get_transactions(alice, &asserted).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(with_flag.len(), scoped.len());
}

#[tokio::test]
async fn verified_admin_sees_the_whole_ledger() {
    let (engine, alice, bob) = engine_with_users().await;
    let root = engine.add_user("root", Role::Admin).await.unwrap();
    engine
        .add_transaction(TransactionNewCmd::new(alice, bob, "credit", "1", "2025-08-19"))
        .await
        .unwrap();

    let filter = TransactionListFilter {
        admin: true,
        ..Default::default()
    };
    let txs = engine.get_transactions(root, &filter).await.unwrap();
    assert_eq!(txs.len(), 1);

    // Without the flag even an admin stays scoped to their own rows.
    let txs = engine
        .get_transactions(root, &TransactionListFilter::default())
        .await
        .unwrap();
    assert!(txs.is_empty());
}
