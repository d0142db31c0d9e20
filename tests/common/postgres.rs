// tests/common/postgres.rs
//! Fresh, migrated Postgres database per test, for the queries the in-memory
//! store cannot vouch for.

use std::sync::Arc;
use std::time::Duration;

use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use league_backend::config::settings::get_config;
use league_backend::db::PgStore;
use league_backend::services::{LeagueService, ReportService};

pub struct PgLeague {
    pub store: Arc<PgStore>,
    pub league: LeagueService<PgStore>,
    pub reports: ReportService<PgStore>,
}

impl PgLeague {
    pub fn pool(&self) -> &PgPool {
        self.store.pool()
    }
}

/// Creates a uniquely named database on the configured server and runs the
/// migrations on it. Returns `None` when no server answers, so the suite still
/// runs on machines without Postgres.
pub async fn configure_db() -> Option<PgLeague> {
    let configuration = get_config().expect("Failed to read configuration.");
    let server_options = match &configuration.database.db_url {
        Some(_) => configuration
            .database
            .connect_options()
            .expect("Invalid DATABASE_URL"),
        None => configuration.database.without_db(),
    };

    let connected = tokio::time::timeout(Duration::from_secs(5), PgConnection::connect_with(&server_options)).await;
    let mut connection = match connected {
        Ok(Ok(connection)) => connection,
        Ok(Err(e)) => {
            eprintln!("Postgres unavailable, skipping database test: {}", e);
            return None;
        }
        Err(_) => {
            eprintln!("Postgres did not answer in time, skipping database test");
            return None;
        }
    };

    // Create database
    let db_name = Uuid::new_v4().to_string();
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect_with(server_options.database(&db_name))
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    let store = Arc::new(PgStore::new(connection_pool));
    Some(PgLeague {
        league: LeagueService::new(store.clone()),
        reports: ReportService::new(store.clone()),
        store,
    })
}
