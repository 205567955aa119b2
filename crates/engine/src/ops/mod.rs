use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::{
    ContactDirectory, DbContactDirectory, DbIdentityOracle, IdentityOracle, ResultEngine,
};

mod access;
mod balances;
mod categories;
mod contacts;
mod expenses;
mod transactions;
mod users;

pub use balances::{BalanceBreakdown, ContactBalance};
pub use transactions::TransactionListFilter;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// The engine's read lock on the connection is held for the whole block, so
/// a concurrent [`Engine::rebind`] waits for in-flight operations.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let db = $self.database.read().await;
        let $tx = db.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: RwLock<DatabaseConnection>,
    identity: Arc<dyn IdentityOracle>,
    directory: Arc<dyn ContactDirectory>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Atomically repoints the engine at a different backing store.
    ///
    /// Waits for in-flight operations on the old handle and returns it once
    /// the swap is done. Callers own closing the returned connection.
    pub async fn rebind(&self, database: DatabaseConnection) -> DatabaseConnection {
        let mut guard = self.database.write().await;
        std::mem::replace(&mut *guard, database)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    identity: Option<Arc<dyn IdentityOracle>>,
    directory: Option<Arc<dyn ContactDirectory>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the identity oracle (defaults to the `users` table).
    pub fn identity(mut self, identity: Arc<dyn IdentityOracle>) -> EngineBuilder {
        self.identity = Some(identity);
        self
    }

    /// Override the contact directory (defaults to the `contacts` table).
    pub fn directory(mut self, directory: Arc<dyn ContactDirectory>) -> EngineBuilder {
        self.directory = Some(directory);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: RwLock::new(self.database),
            identity: self
                .identity
                .unwrap_or_else(|| Arc::new(DbIdentityOracle)),
            directory: self
                .directory
                .unwrap_or_else(|| Arc::new(DbContactDirectory)),
        })
    }
}
