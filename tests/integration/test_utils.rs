//! Test utilities for integration tests.
//!
//! Provides invocation-counting fakes for the identity provider, profile
//! store and object store seams, plus request/response helpers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use http_body_util::BodyExt;

use account_gateway::error::{GrantError, IdentityError, StoreError};
use account_gateway::identity::{AuthTokens, IdentityProvider};
use account_gateway::media::{ObjectStore, UploadGrant};
use account_gateway::profile::{ProfileRecord, ProfileStore};
use account_gateway::server::{create_router, AppState, RouterConfig};
use account_gateway::validate::SignupPolicy;

// =============================================================================
// Mock Identity Provider
// =============================================================================

/// Fake identity provider with programmable outcomes and call counters.
pub struct MockIdentityProvider {
    create_response: Mutex<Result<String, IdentityError>>,
    auth_response: Mutex<Result<AuthTokens, IdentityError>>,
    create_calls: AtomicUsize,
    auth_calls: AtomicUsize,
    created_identities: Mutex<Vec<(String, Option<String>)>>,
}

impl MockIdentityProvider {
    /// Defaults to a successful provider: account id `u1`, fixed tokens.
    pub fn new() -> Self {
        Self {
            create_response: Mutex::new(Ok("u1".to_string())),
            auth_response: Mutex::new(Ok(AuthTokens {
                id_token: "test-id-token".to_string(),
                access_token: "test-access-token".to_string(),
            })),
            create_calls: AtomicUsize::new(0),
            auth_calls: AtomicUsize::new(0),
            created_identities: Mutex::new(Vec::new()),
        }
    }

    pub fn with_account_id(self, account_id: &str) -> Self {
        *self.create_response.lock().unwrap() = Ok(account_id.to_string());
        self
    }

    pub fn with_create_error(self, err: IdentityError) -> Self {
        *self.create_response.lock().unwrap() = Err(err);
        self
    }

    pub fn with_auth_error(self, err: IdentityError) -> Self {
        *self.auth_response.lock().unwrap() = Err(err);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    /// The (email, preferred_username) pairs passed to `create_account`.
    pub fn created_identities(&self) -> Vec<(String, Option<String>)> {
        self.created_identities.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        _password: &str,
        preferred_username: Option<&str>,
    ) -> Result<String, IdentityError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created_identities
            .lock()
            .unwrap()
            .push((email.to_string(), preferred_username.map(str::to_string)));
        self.create_response.lock().unwrap().clone()
    }

    async fn authenticate(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<AuthTokens, IdentityError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        self.auth_response.lock().unwrap().clone()
    }
}

// =============================================================================
// Mock Profile Store
// =============================================================================

/// Fake profile store recording every write.
pub struct MockProfileStore {
    response: Mutex<Result<(), StoreError>>,
    calls: AtomicUsize,
    records: Mutex<Vec<ProfileRecord>>,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self {
            response: Mutex::new(Ok(())),
            calls: AtomicUsize::new(0),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_error(self, err: StoreError) -> Self {
        *self.response.lock().unwrap() = Err(err);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<ProfileRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn create_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(record.clone());
        self.response.lock().unwrap().clone()
    }
}

// =============================================================================
// Mock Object Store
// =============================================================================

/// Fake object store capturing presign requests.
pub struct MockObjectStore {
    fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, String, String, Duration)>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, String, String, Duration)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<UploadGrant, GrantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            content_type.to_string(),
            ttl,
        ));

        if self.fail {
            return Err(GrantError::Provider(
                "presign rejected by provider".to_string(),
            ));
        }

        let mut fields = HashMap::new();
        fields.insert("key".to_string(), key.to_string());
        fields.insert("Content-Type".to_string(), content_type.to_string());
        Ok(UploadGrant {
            url: format!("https://{bucket}.s3.example.com/{key}?signature=test"),
            fields,
        })
    }
}

// =============================================================================
// Router and Request Helpers
// =============================================================================

/// Bundle of the three fakes behind a router, for assertion access.
pub struct TestGateway {
    pub identity: Arc<MockIdentityProvider>,
    pub profiles: Arc<MockProfileStore>,
    pub objects: Arc<MockObjectStore>,
    pub router: Router,
}

impl TestGateway {
    /// All-success fakes, default signup policy, media bucket configured.
    pub fn new() -> Self {
        Self::build(
            MockIdentityProvider::new(),
            MockProfileStore::new(),
            MockObjectStore::new(),
            Some("test-media"),
        )
    }

    pub fn build(
        identity: MockIdentityProvider,
        profiles: MockProfileStore,
        objects: MockObjectStore,
        bucket: Option<&str>,
    ) -> Self {
        let identity = Arc::new(identity);
        let profiles = Arc::new(profiles);
        let objects = Arc::new(objects);

        let state = AppState::new(
            Arc::clone(&identity),
            Arc::clone(&profiles),
            Arc::clone(&objects),
            SignupPolicy::default(),
            bucket.map(str::to_string),
        );
        let router = create_router(state, RouterConfig::new().with_tracing(false));

        Self {
            identity,
            profiles,
            objects,
            router,
        }
    }
}

/// Build a POST request with a JSON body.
pub fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bare GET request.
pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

/// Build a bare OPTIONS request.
pub fn options(path: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
