//! Applies migration units in declaration order against one schema store.
//!
//! The ledger is the `seaql_migrations` table maintained by
//! `sea-orm-migration`. Runs within this process are serialized by a
//! process-wide lock, and identifiers must be strictly increasing in
//! declaration order.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;
use sea_orm_migration::MigrationStatus;
use tokio::sync::Mutex;

use crate::error::RunnerError;
use crate::identifier::MigrationId;

static MIGRATION_LOCK: Mutex<()> = Mutex::const_new(());

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationState {
    pub id: String,
    pub applied: bool,
}

/// Checks that every unit of `M` has a well-formed identifier and that they
/// are declared in strictly increasing order.
pub fn verify_ordering<M: MigratorTrait>() -> Result<Vec<MigrationId>, RunnerError> {
    let mut ids: Vec<MigrationId> = Vec::new();
    for migration in M::migrations() {
        let id: MigrationId = migration.name().parse()?;
        if let Some(previous) = ids.last() {
            if id <= *previous {
                return Err(RunnerError::OutOfOrder {
                    previous: previous.to_string(),
                    current: id.to_string(),
                });
            }
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Applies every pending unit, returning how many ran.
///
/// The first failure stops the run; units after it stay pending and the
/// error is handed back to the caller, which should treat it as fatal.
pub async fn migrate_on_startup<M: MigratorTrait>(
    db: &DatabaseConnection,
) -> Result<usize, RunnerError> {
    let _guard = MIGRATION_LOCK.lock().await;
    verify_ordering::<M>()?;

    let pending = M::get_pending_migrations(db).await?;
    if pending.is_empty() {
        tracing::info!("schema is up to date");
        return Ok(0);
    }
    for migration in &pending {
        tracing::info!(migration = migration.name(), "pending migration");
    }

    if let Err(err) = M::up(db, None).await {
        let still_pending = M::get_pending_migrations(db)
            .await
            .map(|p| p.len())
            .unwrap_or(pending.len());
        tracing::error!(
            error = %err,
            applied = pending.len().saturating_sub(still_pending),
            still_pending,
            "migration run halted"
        );
        return Err(err.into());
    }

    tracing::info!(applied = pending.len(), "migrations applied");
    Ok(pending.len())
}

/// Reverts the most recently applied unit. Returns its identifier, or
/// `None` if the ledger is empty.
pub async fn revert_last<M: MigratorTrait>(
    db: &DatabaseConnection,
) -> Result<Option<String>, RunnerError> {
    let _guard = MIGRATION_LOCK.lock().await;

    let applied = M::get_applied_migrations(db).await?;
    let Some(last) = applied.last() else {
        tracing::info!("no applied migrations to revert");
        return Ok(None);
    };
    let name = last.name().to_owned();

    M::down(db, Some(1)).await?;
    tracing::info!(migration = %name, "migration reverted");
    Ok(Some(name))
}

pub async fn status<M: MigratorTrait>(
    db: &DatabaseConnection,
) -> Result<Vec<MigrationState>, RunnerError> {
    let migrations = M::get_migration_with_status(db).await?;
    Ok(migrations
        .iter()
        .map(|m| MigrationState {
            id: m.name().to_owned(),
            applied: matches!(m.status(), MigrationStatus::Applied),
        })
        .collect())
}
