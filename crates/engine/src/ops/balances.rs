use sea_orm::{ConnectionTrait, Statement, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::{MoneyCents, ResultEngine, TransactionKind};

use super::{Engine, with_tx};

/// The four partial sums a user's ledger decomposes into.
///
/// Every balance flavor is derived from these so there is a single
/// aggregation code path to audit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    pub credits_received: MoneyCents,
    pub debits_sent: MoneyCents,
    pub credits_sent: MoneyCents,
    pub debits_received: MoneyCents,
}

impl BalanceBreakdown {
    /// Economically meaningful balance: credits received minus debits sent.
    #[must_use]
    pub fn net(&self) -> MoneyCents {
        self.credits_received - self.debits_sent
    }

    /// Historical symmetric balance: all credits touching the user minus all
    /// debits touching the user, regardless of direction.
    #[must_use]
    pub fn legacy(&self) -> MoneyCents {
        (self.credits_received + self.credits_sent) - (self.debits_sent + self.debits_received)
    }
}

/// Sender-perspective sums towards a single contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBalance {
    pub credits_sent: MoneyCents,
    pub debits_sent: MoneyCents,
}

impl ContactBalance {
    #[must_use]
    pub fn balance(&self) -> MoneyCents {
        self.credits_sent - self.debits_sent
    }
}

impl Engine {
    /// Recomputes the four partial sums for a user from the ledger rows.
    ///
    /// An empty ledger yields all zeros. Sums are exact integer cents.
    pub async fn balance_breakdown(&self, user_id: i64) -> ResultEngine<BalanceBreakdown> {
        with_tx!(self, |db_tx| {
            let backend = db_tx.get_database_backend();
            let stmt = Statement::from_sql_and_values(
                backend,
                "SELECT \
                   COALESCE(SUM(CASE WHEN kind = ? AND to_user_id = ? THEN amount_minor ELSE 0 END), 0) AS credits_received, \
                   COALESCE(SUM(CASE WHEN kind = ? AND from_user_id = ? THEN amount_minor ELSE 0 END), 0) AS debits_sent, \
                   COALESCE(SUM(CASE WHEN kind = ? AND from_user_id = ? THEN amount_minor ELSE 0 END), 0) AS credits_sent, \
                   COALESCE(SUM(CASE WHEN kind = ? AND to_user_id = ? THEN amount_minor ELSE 0 END), 0) AS debits_received \
                 FROM transactions \
                 WHERE from_user_id = ? OR to_user_id = ?",
                vec![
                    TransactionKind::Credit.as_str().into(),
                    user_id.into(),
                    TransactionKind::Debit.as_str().into(),
                    user_id.into(),
                    TransactionKind::Credit.as_str().into(),
                    user_id.into(),
                    TransactionKind::Debit.as_str().into(),
                    user_id.into(),
                    user_id.into(),
                    user_id.into(),
                ],
            );
            let row = db_tx.query_one(stmt).await?;

            let mut breakdown = BalanceBreakdown::default();
            if let Some(row) = row {
                breakdown.credits_received =
                    MoneyCents::new(row.try_get::<i64>("", "credits_received")?);
                breakdown.debits_sent = MoneyCents::new(row.try_get::<i64>("", "debits_sent")?);
                breakdown.credits_sent = MoneyCents::new(row.try_get::<i64>("", "credits_sent")?);
                breakdown.debits_received =
                    MoneyCents::new(row.try_get::<i64>("", "debits_received")?);
            }
            Ok(breakdown)
        })
    }

    /// Historical symmetric balance (see [`BalanceBreakdown::legacy`]).
    pub async fn balance(&self, user_id: i64) -> ResultEngine<MoneyCents> {
        Ok(self.balance_breakdown(user_id).await?.legacy())
    }

    /// Net balance (see [`BalanceBreakdown::net`]).
    pub async fn net_balance(&self, user_id: i64) -> ResultEngine<MoneyCents> {
        Ok(self.balance_breakdown(user_id).await?.net())
    }

    /// Sender-perspective balance towards one contact.
    ///
    /// The contact must exist and belong to the caller; a contact with no
    /// transactions yields zeros.
    pub async fn contact_balance(
        &self,
        user_id: i64,
        contact_id: i64,
    ) -> ResultEngine<ContactBalance> {
        with_tx!(self, |db_tx| {
            self.require_contact_usable(&db_tx, contact_id, user_id)
                .await?;

            let backend = db_tx.get_database_backend();
            let stmt = Statement::from_sql_and_values(
                backend,
                "SELECT \
                   COALESCE(SUM(CASE WHEN kind = ? THEN amount_minor ELSE 0 END), 0) AS credits_sent, \
                   COALESCE(SUM(CASE WHEN kind = ? THEN amount_minor ELSE 0 END), 0) AS debits_sent \
                 FROM transactions \
                 WHERE from_user_id = ? AND contact_id = ?",
                vec![
                    TransactionKind::Credit.as_str().into(),
                    TransactionKind::Debit.as_str().into(),
                    user_id.into(),
                    contact_id.into(),
                ],
            );
            let row = db_tx.query_one(stmt).await?;

            let mut balance = ContactBalance::default();
            if let Some(row) = row {
                balance.credits_sent = MoneyCents::new(row.try_get::<i64>("", "credits_sent")?);
                balance.debits_sent = MoneyCents::new(row.try_get::<i64>("", "debits_sent")?);
            }
            Ok(balance)
        })
    }
}
