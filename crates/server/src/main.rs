use anyhow::Context;
use db::DBService;
use server::{AppState, router};
use services::services::{auth::AuthService, config::Config, media::MediaService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let db = DBService::new(&config.database_url)
        .await
        .context("failed to open database")?;

    let auth = AuthService::new(db.clone(), config.session_ttl_minutes);
    if let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        auth.seed_admin(&email, &password)
            .await
            .context("failed to seed admin user")?;
    }

    let media = MediaService::new(config.imagekit.clone())?;

    let addr = format!("{}:{}", config.host, config.port);
    let app = router(AppState::new(db, auth, media, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
