use std::env;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::config::jwt::JwtSettings;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
    pub admin: AdminSettings,
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default)]
    pub db_url: Option<SecretString>,
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

impl DatabaseSettings {
    /// Connection options for the configured database. `DATABASE_URL` wins
    /// over the individual fields when it is present.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(db_url) = &self.db_url {
            return db_url.expose_secret().parse::<PgConnectOptions>();
        }

        Ok(self.without_db().database(&self.db_name))
    }

    pub fn without_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(self.pg_ssl_mode())
    }

    fn pg_ssl_mode(&self) -> PgSslMode {
        match self.ssl_mode.to_lowercase().as_str() {
            "require" => PgSslMode::Require,
            "prefer" => PgSslMode::Prefer,
            "allow" => PgSslMode::Allow,
            "verify-ca" => PgSslMode::VerifyCa,
            "verify-full" => PgSslMode::VerifyFull,
            _ => PgSslMode::Disable,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    #[serde(default)]
    pub mode: ServerMode,
    pub log_level: String,
}

/// `debug` exposes internal error details in responses, `release` hides them.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServerMode {
    #[default]
    Debug,
    Release,
}

impl ServerMode {
    pub fn exposes_internal_errors(&self) -> bool {
        matches!(self, ServerMode::Debug)
    }
}

#[derive(Deserialize, Debug)]
pub struct AdminSettings {
    pub email: String,
    pub password: SecretString,
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)).required(false))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;
    apply_env_overrides(&mut settings);
    settings.jwt.validate().map_err(ConfigError::Message)?;

    Ok(settings)
}

/// Well-known deployment variables that bypass the `APP__` prefix.
fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }

    if let Ok(jwt_secret) = env::var("JWT_SECRET") {
        settings.jwt.secret = SecretString::new(jwt_secret.into_boxed_str());
    }

    if let Some(hours) = env::var("JWT_EXPIRATION_HOURS").ok().and_then(|h| h.parse().ok()) {
        settings.jwt.expiration_hours = hours;
    }

    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        settings.application.port = port;
    }

    if let Ok(email) = env::var("ADMIN_EMAIL") {
        settings.admin.email = email;
    }

    if let Ok(password) = env::var("ADMIN_PASSWORD") {
        settings.admin.password = SecretString::new(password.into_boxed_str());
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
