//! In-memory stand-in for the storefront backend: serves collection routes
//! with the `{ success, data: { current_page, data, ... } }` envelope and
//! understands the bracket query grammar the SDK emits.

mod catalog;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::{StatusCode, Uri},
    routing::get,
};
use tracing::info;

use vitrine_model::{ApiEnvelope, Category, Page, Product};
use vitrine_observe::{LogConfig, log_init};

use crate::catalog::{Catalog, ListParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log_init(&LogConfig::default())?;

    let catalog = Arc::new(Catalog::seed());
    let app = Router::new()
        .route("/api/products", get(list_products))
        .route("/api/categories", get(list_categories))
        .fallback(unknown_resource)
        .with_state(catalog);

    let addr: SocketAddr = ([127, 0, 0, 1], 8080).into();
    info!(%addr, "mock storefront api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

async fn list_products(
    State(catalog): State<Arc<Catalog>>,
    RawQuery(query): RawQuery,
) -> Json<ApiEnvelope<Page<Product>>> {
    let params = ListParams::parse(query.as_deref().unwrap_or(""));
    Json(ApiEnvelope::ok(catalog.products(&params)))
}

async fn list_categories(
    State(catalog): State<Arc<Catalog>>,
    RawQuery(query): RawQuery,
) -> Json<ApiEnvelope<Page<Category>>> {
    let params = ListParams::parse(query.as_deref().unwrap_or(""));
    Json(ApiEnvelope::ok(catalog.categories(&params)))
}

/// Unmatched routes still answer in the envelope shape, the way the real
/// backend reports an unknown resource.
async fn unknown_resource(uri: Uri) -> (StatusCode, Json<ApiEnvelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiEnvelope::fail(format!(
            "unknown resource: {}",
            uri.path()
        ))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_route_answers_with_failure_envelope() {
        let (status, Json(envelope)) =
            unknown_resource(Uri::from_static("/api/stores")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.message.unwrap().contains("/api/stores"));
    }
}
