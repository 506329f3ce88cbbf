pub mod battles;
pub mod health;
pub mod identity;
pub mod positions;

use crate::auth::IdentityResolver;
use crate::config::Config;
use crate::db::BattleStore;
use crate::metrics::MetricsClient;
use crate::resolution::BattleResolver;
use crate::settlement::SettlementView;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use identity::OptionalIdentity;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BattleStore>,
    pub resolver: Arc<BattleResolver>,
    pub settlement: Arc<SettlementView>,
    pub identity: Arc<IdentityResolver>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BattleStore>,
        metrics: Arc<dyn MetricsClient>,
        config: &Config,
    ) -> Self {
        Self {
            resolver: Arc::new(BattleResolver::new(
                store.clone(),
                metrics,
                config.metrics_timeout,
            )),
            settlement: Arc::new(SettlementView::new(store.clone())),
            identity: Arc::new(IdentityResolver::from_secret(&config.jwt_secret)),
            store,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/battles", get(battles::list_battles))
        .route("/v1/battles/resolve", post(battles::resolve_battle))
        .route("/v1/battles/resolve-bulk", post(battles::resolve_battles_bulk))
        .route("/v1/positions", get(positions::list_positions))
        .layer(cors)
        .with_state(state)
}
