pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_groups_table;
mod m20250901_000002_create_users_table;
mod m20250901_000003_create_submissions_table;
mod m20250915_000001_create_sessions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_groups_table::Migration),
            Box::new(m20250901_000002_create_users_table::Migration),
            Box::new(m20250901_000003_create_submissions_table::Migration),
            Box::new(m20250915_000001_create_sessions_table::Migration),
        ]
    }
}
