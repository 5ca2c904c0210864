//! A single additive or subtractive column edit.
//!
//! [`ColumnChange`] checks its preconditions against the live schema before
//! issuing DDL. Re-running an applied edit is an error, not a no-op.

use std::fmt;

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::error::SchemaError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    Integer,
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::String => "string",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl ColumnValue {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValue::Boolean(_) => ColumnType::Boolean,
            ColumnValue::Integer(_) => ColumnType::Integer,
            ColumnValue::String(_) => ColumnType::String,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            ColumnValue::Boolean(b) => (*b).into(),
            ColumnValue::Integer(i) => (*i).into(),
            ColumnValue::String(s) => s.clone().into(),
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Boolean(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::String(value.to_owned())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::String(value)
    }
}

/// Describes one column on one table. New descriptors are nullable with no
/// default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnChange {
    table: String,
    column: String,
    column_type: ColumnType,
    nullable: bool,
    default: Option<ColumnValue>,
}

impl ColumnChange {
    pub fn new(table: impl Into<String>, column: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_type,
            nullable: true,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<ColumnValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> Option<&ColumnValue> {
        self.default.as_ref()
    }

    /// Checks the default against the declared type without touching the store.
    pub fn validate(&self) -> Result<(), SchemaError> {
        match &self.default {
            Some(value) if value.column_type() != self.column_type => {
                Err(SchemaError::DefaultTypeMismatch {
                    expected: self.column_type,
                    value: value.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Adds the column. Fails if the table is missing or the column is
    /// already there.
    pub async fn add_column(&self, manager: &SchemaManager<'_>) -> Result<(), SchemaError> {
        self.validate()?;

        if !manager.has_table(&self.table).await? {
            tracing::warn!(table = %self.table, column = %self.column, "refusing to add column: table missing");
            return Err(SchemaError::TableNotFound(self.table.clone()));
        }
        if manager.has_column(&self.table, &self.column).await? {
            tracing::warn!(table = %self.table, column = %self.column, "refusing to add column: already present");
            return Err(SchemaError::ColumnAlreadyExists {
                table: self.table.clone(),
                column: self.column.clone(),
            });
        }
        if !self.nullable && self.default.is_none() && self.table_has_rows(manager).await? {
            return Err(SchemaError::MissingDefault {
                table: self.table.clone(),
                column: self.column.clone(),
            });
        }

        tracing::debug!(
            table = %self.table,
            column = %self.column,
            column_type = %self.column_type,
            nullable = self.nullable,
            "adding column"
        );
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new(self.table.as_str()))
                    .add_column(self.column_def())
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    /// Drops the column. Any values stored in it are lost.
    pub async fn drop_column(&self, manager: &SchemaManager<'_>) -> Result<(), SchemaError> {
        if !manager.has_table(&self.table).await? {
            tracing::warn!(table = %self.table, column = %self.column, "refusing to drop column: table missing");
            return Err(SchemaError::TableNotFound(self.table.clone()));
        }
        if !manager.has_column(&self.table, &self.column).await? {
            tracing::warn!(table = %self.table, column = %self.column, "refusing to drop column: not present");
            return Err(SchemaError::ColumnNotFound {
                table: self.table.clone(),
                column: self.column.clone(),
            });
        }

        tracing::debug!(table = %self.table, column = %self.column, "dropping column");
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new(self.table.as_str()))
                    .drop_column(Alias::new(self.column.as_str()))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    fn column_def(&self) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(self.column.as_str()));
        match self.column_type {
            ColumnType::Boolean => def.boolean(),
            ColumnType::Integer => def.big_integer(),
            ColumnType::String => def.string(),
        };
        if self.nullable {
            def.null();
        } else {
            def.not_null();
        }
        if let Some(value) = &self.default {
            def.default(value.to_value());
        }
        def
    }

    async fn table_has_rows(&self, manager: &SchemaManager<'_>) -> Result<bool, DbErr> {
        let query = Query::select()
            .expr(Expr::val(1))
            .from(Alias::new(self.table.as_str()))
            .limit(1)
            .to_owned();
        let backend = manager.get_database_backend();
        let row = manager
            .get_connection()
            .query_one(backend.build(&query))
            .await?;
        Ok(row.is_some())
    }
}
