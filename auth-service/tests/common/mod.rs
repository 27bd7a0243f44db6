use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::ManualClock;
use auth::TokenCodec;
use auth_service::domain::session::service::SessionService;
use auth_service::inbound::http::router::create_router;
use auth_service::session::errors::CredentialStoreError;
use auth_service::session::models::CredentialRecord;
use auth_service::session::models::EmailAddress;
use auth_service::session::models::UserId;
use auth_service::session::ports::CredentialRepository;
use chrono::Duration;
use jsonwebtoken::Algorithm;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory, keyed by email.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    records: Mutex<HashMap<String, CredentialRecord>>,
    unavailable: Mutex<bool>,
}

impl InMemoryCredentialRepository {
    pub fn insert(&self, record: CredentialRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.email.clone(), record);
    }

    /// Make every following lookup fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        if *self.unavailable.lock().unwrap() {
            return Err(CredentialStoreError::Unavailable(
                "connection refused (os error 111)".to_string(),
            ));
        }

        Ok(self.records.lock().unwrap().get(email.as_str()).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryCredentialRepository>,
    pub authenticator: Arc<Authenticator>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::starting_now());
        let token_codec = TokenCodec::new(TEST_SECRET, Algorithm::HS256, Duration::days(30))
            .expect("Failed to build token codec")
            .with_clock(clock.clone());
        let authenticator = Arc::new(Authenticator::new(token_codec));

        let repository = Arc::new(InMemoryCredentialRepository::default());
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let router = create_router(session_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            authenticator,
            clock,
        }
    }

    /// Store a user whose password hash matches `password`.
    pub fn create_user(&self, id: i64, email: &str, password: &str, role: &str, full_name: &str) {
        let password_hash = self
            .authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        self.repository.insert(CredentialRecord {
            id: UserId(id),
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
            full_name: full_name.to_string(),
        });
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in and return the issued token.
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .post("/api/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["token"]
            .as_str()
            .expect("Login did not return a token")
            .to_string()
    }
}
