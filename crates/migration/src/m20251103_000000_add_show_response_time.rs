use sea_orm_migration::prelude::*;

use crate::column_change::{ColumnChange, ColumnType};

pub const TABLE: &str = "status_page";
pub const COLUMN: &str = "show_response_time";

#[derive(DeriveMigrationName)]
pub struct Migration;

pub fn show_response_time() -> ColumnChange {
    ColumnChange::new(TABLE, COLUMN, ColumnType::Boolean)
        .not_null()
        .default_value(false)
}

/// Let a status page opt in to showing monitor response times.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        show_response_time().add_column(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        show_response_time().drop_column(manager).await?;
        Ok(())
    }
}
