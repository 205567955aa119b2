//! Command structs for engine write operations.
//!
//! These types group parameters for writes, keeping call sites readable and
//! avoiding long argument lists. Amount, date and kind travel as the raw
//! caller-supplied strings; the engine validates and normalizes them.

/// Create a ledger transaction.
#[derive(Clone, Debug)]
pub struct TransactionNewCmd {
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub kind: String,
    pub amount: String,
    pub date: String,
    pub description: Option<String>,
    pub contact_id: Option<i64>,
}

impl TransactionNewCmd {
    #[must_use]
    pub fn new(
        from_user_id: i64,
        to_user_id: i64,
        kind: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            from_user_id,
            to_user_id,
            kind: kind.into(),
            amount: amount.into(),
            date: date.into(),
            description: None,
            contact_id: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn contact_id(mut self, contact_id: i64) -> Self {
        self.contact_id = Some(contact_id);
        self
    }
}

/// Patch an existing ledger transaction (sender only).
///
/// Absent fields are left untouched. Sender, receiver and contact are not
/// part of the patch surface by construction.
#[derive(Clone, Debug)]
pub struct TransactionUpdateCmd {
    pub transaction_id: i64,
    pub user_id: i64,
    pub kind: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl TransactionUpdateCmd {
    #[must_use]
    pub fn new(transaction_id: i64, user_id: i64) -> Self {
        Self {
            transaction_id,
            user_id,
            kind: None,
            amount: None,
            date: None,
            description: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

/// Create an address-book contact.
#[derive(Clone, Debug)]
pub struct ContactNewCmd {
    pub user_id: i64,
    pub name: String,
}

impl ContactNewCmd {
    #[must_use]
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// Create an expense-book entry.
#[derive(Clone, Debug)]
pub struct ExpenseNewCmd {
    pub user_id: i64,
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: Option<String>,
}

impl ExpenseNewCmd {
    #[must_use]
    pub fn new(
        user_id: i64,
        title: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            amount: amount.into(),
            date: date.into(),
            category: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
