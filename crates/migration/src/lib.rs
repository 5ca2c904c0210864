pub use sea_orm_migration::prelude::*;

pub mod column_change;
pub mod config;
pub mod error;
pub mod identifier;
pub mod m20251001_000000_create_status_page_table;
pub mod m20251103_000000_add_show_response_time;
pub mod runner;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000000_create_status_page_table::Migration),
            Box::new(m20251103_000000_add_show_response_time::Migration),
        ]
    }
}
