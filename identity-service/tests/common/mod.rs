use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::HashingParams;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenIssuer;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::UserError;
use uuid::Uuid;

pub const TEST_TOKEN_TTL_SECS: i64 = 1200;

/// In-process repository honoring the email unique constraint.
///
/// Stands in for Postgres so the HTTP suite needs no external services.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyInUse(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id.0, user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError> {
        let users = self.users.lock().unwrap();
        users
            .get(&id.0)
            .cloned()
            .ok_or_else(|| UserError::NotFoundById(id.to_string()))
    }

    async fn hard_delete_by_id(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        users.remove(&id.0);
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: Arc<TokenIssuer>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap hashing parameters keep the suite fast
        let password_hasher = Arc::new(
            PasswordHasher::new(HashingParams {
                memory_kib: 8 * 1024,
                iterations: 1,
                parallelism: 1,
            })
            .expect("Failed to build hasher"),
        );

        let token_issuer = Arc::new(TokenIssuer::new(&TokenConfig {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            issuer: format!("http://127.0.0.1:{}/", port),
            audience: vec![format!("http://127.0.0.1:{}/", port)],
            expiration_secs: TEST_TOKEN_TTL_SECS,
        }));

        let repository = Arc::new(InMemoryUserRepository::default());
        let identity_service = Arc::new(UserService::new(
            repository,
            password_hasher,
            Arc::clone(&token_issuer),
        ));

        let router = create_router(identity_service, Arc::clone(&token_issuer));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer,
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register an account through the HTTP surface.
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Run the password grant through the HTTP surface.
    pub async fn request_access_token(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/oauth/token")
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Request account deletion with a bearer token.
    pub async fn delete_user(&self, id: &str, token: &str, password: &str) -> reqwest::Response {
        self.post(&format!("/users/{}/delete", id))
            .bearer_auth(token)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and exchange its credentials, returning
    /// `(user_id, access_token)`.
    pub async fn register_and_authenticate(&self, email: &str, password: &str) -> (String, String) {
        let response = self.register(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let user_id = body["id"].as_str().expect("Missing user id").to_string();

        let response = self.request_access_token(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let token = body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string();

        (user_id, token)
    }
}
