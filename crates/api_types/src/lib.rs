use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Uniform response wrapper: every non-fatal outcome reports `success`,
/// at most one of `error` and `data` is populated.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub username: String,
        /// `user` (default) or `admin`.
        pub role: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreated {
        pub id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub username: String,
        pub role: String,
    }
}

pub mod contact {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactCreated {
        pub id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactView {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactDeleted {
        pub deleted: u64,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreated {
        pub id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i64,
        pub name: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryDeleted {
        pub deleted: u64,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        /// Decimal string, up to two fractional digits (e.g. `"12.50"`).
        pub amount: String,
        /// `YYYY-MM-DD`.
        pub date: String,
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i64,
        pub title: String,
        pub amount: String,
        pub date: NaiveDate,
        pub category: Option<String>,
    }

    /// Query string for `GET /expenses/search`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseSearch {
        pub query: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub deleted: u64,
    }
}

pub mod transaction {
    use super::*;

    /// Request body for creating a ledger transaction. The sender is always
    /// the authenticated caller.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub to_user_id: i64,
        /// `credit` or `debit`, case-insensitive.
        pub kind: String,
        /// Decimal string, up to two fractional digits (e.g. `"12.50"`).
        pub amount: String,
        /// `YYYY-MM-DD`.
        pub date: String,
        pub description: Option<String>,
        pub contact_id: Option<i64>,
    }

    /// Partial update; absent fields are left untouched. Sender, receiver
    /// and contact cannot be changed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub kind: Option<String>,
        pub amount: Option<String>,
        pub date: Option<String>,
        pub description: Option<String>,
    }

    /// Query string for listing transactions.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        /// `true` for sent rows only, `false` for received only.
        pub as_sender: Option<bool>,
        /// Request the whole ledger; honored only for verified admins.
        pub admin: Option<bool>,
        pub date_from: Option<NaiveDate>,
        pub date_to: Option<NaiveDate>,
        pub limit: Option<u64>,
        pub offset: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub from_user_id: i64,
        pub to_user_id: i64,
        pub kind: String,
        pub amount: String,
        pub date: NaiveDate,
        pub description: Option<String>,
        pub contact_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionDeleted {
        pub deleted: u64,
    }
}

pub mod balance {
    use super::*;

    /// One balance flavor as a decimal string.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub balance: String,
    }

    /// Full decomposition of a user's ledger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceBreakdownView {
        pub credits_received: String,
        pub debits_sent: String,
        pub credits_sent: String,
        pub debits_received: String,
        pub net: String,
        pub legacy: String,
    }

    /// Sender-perspective sums towards one contact.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactBalanceView {
        pub contact_id: i64,
        pub credits_sent: String,
        pub debits_sent: String,
        pub balance: String,
    }
}
