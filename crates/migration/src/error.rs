use sea_orm_migration::prelude::DbErr;
use thiserror::Error;

use crate::column_change::{ColumnType, ColumnValue};

/// Refused or failed schema edits.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("table `{0}` does not exist")]
    TableNotFound(String),
    #[error("column `{column}` already exists on table `{table}`")]
    ColumnAlreadyExists { table: String, column: String },
    #[error("column `{column}` does not exist on table `{table}`")]
    ColumnNotFound { table: String, column: String },
    #[error("default {value:?} does not match column type {expected}")]
    DefaultTypeMismatch {
        expected: ColumnType,
        value: ColumnValue,
    },
    #[error("column `{column}` is NOT NULL without a default but table `{table}` has rows")]
    MissingDefault { table: String, column: String },
    #[error("storage engine error: {0}")]
    StorageEngine(#[from] DbErr),
}

impl From<SchemaError> for DbErr {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::StorageEngine(inner) => inner,
            other => DbErr::Migration(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid migration identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },
    #[error("migration `{current}` is declared after `{previous}` but does not sort after it")]
    OutOfOrder { previous: String, current: String },
    #[error("migration run failed: {0}")]
    Database(#[from] DbErr),
}
