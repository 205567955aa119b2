pub use sea_orm_migration::prelude::*;

mod m20260210_000001_users;
mod m20260210_000002_contacts;
mod m20260210_000003_categories;
mod m20260210_000004_expenses;
mod m20260210_000005_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260210_000001_users::Migration),
            Box::new(m20260210_000002_contacts::Migration),
            Box::new(m20260210_000003_categories::Migration),
            Box::new(m20260210_000004_expenses::Migration),
            Box::new(m20260210_000005_transactions::Migration),
        ]
    }
}
