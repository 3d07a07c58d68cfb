//! Account Gateway - signup, login and media upload grants.
//!
//! This binary starts the HTTP server and wires up all components.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_gateway::{
    config::Config,
    create_cognito_client, create_dynamo_client, create_s3_client,
    server::{create_router, AppState, RouterConfig},
    CognitoIdentityProvider, DynamoProfileStore, S3ObjectStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration before any request processing
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Region: {}", config.region);
    info!("  Identity pool: {}", config.identity_pool_id);
    info!("  Profile table: {}", config.profile_table_name);
    match &config.media_bucket_name {
        Some(bucket) => info!("  Media bucket: {}", bucket),
        None => warn!("  Media bucket: NOT SET - upload grants will fail as misconfigured"),
    }
    let policy = config.signup_policy();
    info!(
        "  Signup policy: min password {} chars, username {}",
        policy.min_password_len,
        if policy.username_required {
            "required"
        } else {
            "optional"
        }
    );

    // Load shared AWS configuration and build the service clients
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let identity = Arc::new(CognitoIdentityProvider::new(
        create_cognito_client(&sdk_config),
        config.identity_client_id.clone(),
        config.identity_client_secret.clone(),
    ));
    let profiles = Arc::new(DynamoProfileStore::new(
        create_dynamo_client(&sdk_config),
        config.profile_table_name.clone(),
    ));
    let objects = Arc::new(S3ObjectStore::new(create_s3_client(&sdk_config)));

    let state = AppState::new(
        identity,
        profiles,
        objects,
        policy,
        config.media_bucket_name.clone(),
    );

    // Build router configuration
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);
    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    let router = create_router(state, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("Server listening on: http://{}", addr);
    info!("  POST http://{}/signup", addr);
    info!("  POST http://{}/login", addr);
    info!("  GET  http://{}/uploads/grant", addr);
    info!("  GET  http://{}/health", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "account_gateway=debug,tower_http=debug"
    } else {
        "account_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
