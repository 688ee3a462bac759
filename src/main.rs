mod entity;
mod error;
mod handlers;
mod prelude;
mod state;
mod sv;
mod utils;

use std::net::SocketAddr;

use axum::{
  Router,
  routing::{get, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  prelude::*,
  state::{AppState, Config},
};

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "boxoffice=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  info!("Starting Box Office v{}", env!("CARGO_PKG_VERSION"));

  let config = Config::from_env();
  let app_state = Arc::new(
    AppState::new(config).await.expect("Failed to initialize app state"),
  );

  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .expect("Failed to build rate limiter config"),
  );

  let governor_limiter = governor_conf.limiter().clone();

  tokio::spawn(async move {
    loop {
      tokio::time::sleep(std::time::Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  let app = Router::new()
    .route("/health", get(handlers::health))
    .route("/api/discount/resolve", post(handlers::resolve_discount))
    .route("/api/discount/apply", post(handlers::apply_discount))
    .route("/api/promo", post(handlers::create_promo))
    .route("/api/promo/{id}/status", post(handlers::set_promo_status))
    .route("/api/courtesy/request", post(handlers::request_courtesy))
    .route("/api/courtesy/{id}/approve", post(handlers::approve_courtesy))
    .route("/api/courtesy/{id}/reject", post(handlers::reject_courtesy))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state.clone());

  let addr = SocketAddr::from(([0, 0, 0, 0], app_state.config.port));

  info!("HTTP server listening on {}", addr);

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(
    listener,
    app.into_make_service_with_connect_info::<SocketAddr>(),
  )
  .await
  .expect("Server error");
}
