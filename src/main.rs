use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logo_studio_server::services::{
    CloudStorage, FirebaseAuth, FirestoreLogoRepository, HuggingFaceGenerator, LogoStudio,
    ServiceAccount, TokenSource,
};
use logo_studio_server::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logo_studio_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Logo Studio Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    // Firebase service account backs auth, Firestore and Storage
    let account = ServiceAccount::from_file(&config.credentials_path)?;
    tracing::info!("Firebase project: {}", account.project_id);
    let tokens = Arc::new(TokenSource::new(client.clone(), account));

    let auth = FirebaseAuth::new(client.clone(), tokens.clone(), &config.identity_toolkit_url);
    let logos =
        FirestoreLogoRepository::new(client.clone(), tokens.clone(), &config.firestore_url);
    let blobs = CloudStorage::new(
        client.clone(),
        tokens,
        &config.storage_url,
        &config.storage_bucket,
    );
    let generator =
        HuggingFaceGenerator::new(client, &config.inference_url, &config.huggingface_api_key);

    let studio = LogoStudio::new(Arc::new(generator), Arc::new(blobs), Arc::new(logos));
    let state = AppState::new(config.clone(), Arc::new(auth), studio);

    // Build router
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
