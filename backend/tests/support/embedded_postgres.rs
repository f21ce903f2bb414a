//! Database provisioning for the embedded PostgreSQL suites.
//!
//! Schemas come from the same embedded Diesel migrations the server applies,
//! so test tables never drift from production ones.

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use exercise_tracker::domain::ports::UserPersistenceError;
use pg_embedded_setup_unpriv::TestCluster;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Maintenance database used to issue `CREATE DATABASE`.
const ADMIN_DATABASE: &str = "postgres";

/// Drop and recreate `name`, returning its connection URL.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<String, UserPersistenceError> {
    let admin_url = cluster.connection().database_url(ADMIN_DATABASE);
    let mut conn = PgConnection::establish(&admin_url)
        .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
    diesel::sql_query(format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut conn)
        .map_err(|err| UserPersistenceError::query(format!("drop database: {err}")))?;
    diesel::sql_query(format!("CREATE DATABASE \"{name}\""))
        .execute(&mut conn)
        .map_err(|err| UserPersistenceError::query(format!("create database: {err}")))?;
    Ok(cluster.connection().database_url(name))
}

/// Run every pending migration against `url`.
pub fn migrate_schema(url: &str) -> Result<(), UserPersistenceError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserPersistenceError::query(format!("migration: {err}")))?;
    Ok(())
}
