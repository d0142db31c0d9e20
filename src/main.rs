use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use league_backend::config::settings::get_config;
use league_backend::db::PgStore;
use league_backend::services::AuthService;
use league_backend::telemetry::{get_subscriber, init_subscriber, install_panic_hook};
use league_backend::{run, ServerOptions};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "league-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);
    install_panic_hook();

    // Only try to establish connection when actually used
    let connect_options = config
        .database
        .connect_options()
        .expect("Invalid database configuration");
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy_with(connect_options);

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to run database migrations");

    let store = Arc::new(PgStore::new(connection_pool));
    let jwt_settings = Arc::new(config.jwt);
    let options = ServerOptions {
        mode: config.application.mode,
        ..ServerOptions::default()
    };

    let admin_bootstrap = AuthService::new(store.clone(), jwt_settings.clone(), options.password_hash_cost);
    match admin_bootstrap
        .ensure_default_admin(&config.admin.email, &config.admin.password)
        .await
    {
        Ok(true) => tracing::info!("Seeded default admin {}", config.admin.email),
        Ok(false) => tracing::info!("Default admin already present"),
        Err(e) => {
            tracing::error!("Failed to seed default admin: {}", e);
            std::process::exit(1);
        }
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, store, jwt_settings, options)?.await
}
