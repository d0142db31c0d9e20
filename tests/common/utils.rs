use std::net::TcpListener;
use std::sync::Arc;

use once_cell::sync::Lazy;
use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::{json, Value};
use uuid::Uuid;

use league_backend::config::jwt::JwtSettings;
use league_backend::config::settings::ServerMode;
use league_backend::services::AuthService;
use league_backend::telemetry::{get_subscriber, init_subscriber};
use league_backend::{run, ServerOptions};

use crate::common::memory_store::InMemoryStore;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@league.local";
pub const ADMIN_PASSWORD: &str = "Admin@123";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub jwt_settings: Arc<JwtSettings>,
    pub client: Client,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryStore::new());
    let jwt_settings = Arc::new(JwtSettings::new(JWT_SECRET.to_string(), 24));
    let options = ServerOptions {
        mode: ServerMode::Debug,
        password_hash_cost: 4 /* bcrypt minimum cost */,
    };

    AuthService::new(store.clone(), jwt_settings.clone(), options.password_hash_cost)
        .ensure_default_admin(ADMIN_EMAIL, &SecretString::new(ADMIN_PASSWORD.into()))
        .await
        .expect("Failed to seed the default admin");

    let server = run(listener, store.clone(), jwt_settings.clone(), options).expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        jwt_settings,
        client: Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, body: &Value) -> Response {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn put_json(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/v1/auth/register",
            None,
            &json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/v1/auth/login",
            None,
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn admin_token(&self) -> String {
        let response = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(200, response.status().as_u16(), "admin login failed");
        token_from(response).await
    }

    /// Register a fresh regular user and return `(email, token)`.
    pub async fn create_user_and_login(&self) -> (String, String) {
        let email = format!("user{}@example.com", Uuid::new_v4().simple());
        let password = "password123";

        let response = self.register("Test User", &email, password).await;
        assert_eq!(201, response.status().as_u16(), "registration failed");

        let response = self.login(&email, password).await;
        assert_eq!(200, response.status().as_u16(), "login failed");
        (email, token_from(response).await)
    }
}

pub async fn token_from(response: Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

pub async fn json_body(response: Response) -> Value {
    response.json().await.expect("Response body is not JSON")
}
