pub use categories::Category;
pub use contacts::Contact;
pub use error::EngineError;
pub use expenses::Expense;
pub use money::MoneyCents;
pub use oracle::{ContactDirectory, DbContactDirectory, DbIdentityOracle, IdentityOracle};
pub use transactions::{Transaction, TransactionKind};
pub use users::{Role, User};

pub use commands::{ContactNewCmd, ExpenseNewCmd, TransactionNewCmd, TransactionUpdateCmd};
pub use ops::{BalanceBreakdown, ContactBalance, Engine, EngineBuilder, TransactionListFilter};

pub mod categories;
pub mod contacts;
pub mod expenses;
pub mod storage;
pub mod transactions;
pub mod users;
pub mod validation;

mod commands;
mod error;
mod money;
mod ops;
mod oracle;

type ResultEngine<T> = Result<T, EngineError>;
