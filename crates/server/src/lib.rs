use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::{self, Next},
    response::Response,
};
use db::DBService;
use services::services::{auth::AuthService, config::Config, media::MediaService};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::error::ApiError;

pub mod error;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    db: DBService,
    auth: AuthService,
    media: MediaService,
    config: Config,
}

impl AppState {
    pub fn new(db: DBService, auth: AuthService, media: MediaService, config: Config) -> Self {
        Self {
            db,
            auth,
            media,
            config,
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn media(&self) -> &MediaService {
        &self.media
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Session token from an `Authorization: Bearer <uuid>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .parse()
        .ok()
}

async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(ApiError::Unauthorized)?;
    state.auth().session(token).ok_or(ApiError::Unauthorized)?;
    Ok(next.run(request).await)
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(routes::properties::router())
        .merge(routes::leads::router())
        .merge(routes::cities::router())
        .merge(routes::neighborhoods::router())
        .merge(routes::profiles::router())
        .merge(routes::banners::router())
        .merge(routes::images::router())
        .merge(routes::dashboard::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api = Router::new()
        .merge(routes::auth::router())
        .merge(routes::health::router())
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
