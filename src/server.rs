use std::sync::Arc;

use poem::http::Method;
use poem::middleware::Cors;
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

use crate::api::{HealthApi, ItemsApi};
use crate::app_data::AppData;
use crate::config::BootstrapSettings;
use crate::coordinators::ItemCoordinator;

/// Where Swagger UI is served
pub const DOCS_PATH: &str = "/api/docs";

/// Compose the HTTP application
///
/// The OpenAPI service (health + items) is nested under the configured API
/// prefix, Swagger UI under `/api/docs` outside production, wrapped in CORS.
pub fn build_app(app_data: Arc<AppData>, settings: &BootstrapSettings) -> impl Endpoint {
    let item_coordinator = Arc::new(ItemCoordinator::new(app_data));
    let items_api = ItemsApi::new(item_coordinator);

    let api_service = OpenApiService::new(
        (HealthApi, items_api),
        "Item Catalog API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!(
        "http://localhost:{}{}",
        settings.server_port(),
        settings.api_prefix()
    ));

    let mut app = Route::new();
    if settings.swagger_enabled() {
        app = app.nest(DOCS_PATH, api_service.swagger_ui());
    }
    let app = app.nest(settings.api_prefix(), api_service);

    app.with(build_cors(settings))
}

fn build_cors(settings: &BootstrapSettings) -> Cors {
    let cors = Cors::new().allow_methods([
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ]);

    if settings.allows_any_origin() {
        return cors;
    }

    settings
        .cors_origins()
        .iter()
        .fold(cors, |cors, origin| cors.allow_origin(origin.clone()))
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
