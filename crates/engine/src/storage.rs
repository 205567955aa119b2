//! Storage gateway.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::ResultEngine;

/// Opens a connection to the backing store.
///
/// Foreign-key checking is enabled explicitly so the gateway contract does
/// not depend on driver defaults.
pub async fn connect(url: &str) -> ResultEngine<DatabaseConnection> {
    let database = Database::connect(url).await?;
    database.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    Ok(database)
}
