//! Main webserver implementation
//!
//! Every route forwards one user action into the shared `CatalogSession`
//! and answers with the matching snapshot.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use catalog::{CatalogSession, CreatureSource};
use shared::{
    component_debug, component_info,
    logging::{self, ComponentId},
    CatalogSnapshot, Criteria, EvolutionSnapshot, MinStats, SelectionKind, SelectionSnapshot,
};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;

/// JSON surface over one catalog session
pub struct WebServer<S>
where
    S: CreatureSource + 'static,
{
    state: Arc<WebServerState>,
    session: Arc<CatalogSession<S>>,
}

impl<S> Clone for WebServer<S>
where
    S: CreatureSource + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            session: Arc::clone(&self.session),
        }
    }
}

impl<S> WebServer<S>
where
    S: CreatureSource + 'static,
{
    pub fn new(bind_address: SocketAddr, session: Arc<CatalogSession<S>>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            session,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Catalog and criteria
            .route("/api/catalog", get(catalog_handler::<S>))
            .route(
                "/api/criteria",
                get(criteria_handler::<S>).put(update_criteria_handler::<S>),
            )
            .route("/api/reload", post(reload_handler::<S>))
            // Selection sets
            .nest(
                "/api/compare",
                selection_routes::<S>().layer(Extension(SelectionKind::Comparison)),
            )
            .nest(
                "/api/team",
                selection_routes::<S>().layer(Extension(SelectionKind::Team)),
            )
            // Evolution inspection
            .route(
                "/api/inspect",
                get(evolution_handler::<S>).delete(close_inspection_handler::<S>),
            )
            .route("/api/inspect/:id", post(inspect_handler::<S>))
            // Health check
            .route("/health", get(health_check::<S>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until ctrl-c, then shut the session down
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();
        let address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {address}: {e}")))?;

        logging::log_startup(ComponentId::current(), &format!("JSON API on http://{address}"));

        let state = Arc::clone(&self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    component_info!(ComponentId::current(), "Received shutdown signal");
                }
                state.set_running(false);
            })
            .await?;

        self.session.shutdown().await;
        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn session(&self) -> &Arc<CatalogSession<S>> {
        &self.session
    }
}

fn selection_routes<S>() -> Router<WebServer<S>>
where
    S: CreatureSource + 'static,
{
    Router::new()
        .route(
            "/",
            get(selection_handler::<S>).delete(clear_selection_handler::<S>),
        )
        .route(
            "/:id",
            post(add_member_handler::<S>).delete(remove_member_handler::<S>),
        )
}

// HTTP Handlers

async fn catalog_handler<S>(State(webserver): State<WebServer<S>>) -> Json<CatalogSnapshot>
where
    S: CreatureSource + 'static,
{
    Json(webserver.session.snapshot().await)
}

async fn criteria_handler<S>(State(webserver): State<WebServer<S>>) -> Json<Criteria>
where
    S: CreatureSource + 'static,
{
    Json(webserver.session.criteria().await)
}

/// Replace the criteria; the visible list follows after the debounce window
async fn update_criteria_handler<S>(
    State(webserver): State<WebServer<S>>,
    payload: Result<Json<Criteria>, JsonRejection>,
) -> WebServerResult<(StatusCode, Json<Criteria>)>
where
    S: CreatureSource + 'static,
{
    let Json(mut criteria) =
        payload.map_err(|rejection| WebServerError::invalid_request(rejection.body_text()))?;

    let floors = criteria.min_stats;
    criteria.min_stats = MinStats::new(floors.hp, floors.attack, floors.defense, floors.speed);

    webserver.session.replace_criteria(criteria).await;
    Ok((StatusCode::ACCEPTED, Json(webserver.session.criteria().await)))
}

/// User-initiated full reload
async fn reload_handler<S>(State(webserver): State<WebServer<S>>) -> WebServerResult<Json<Value>>
where
    S: CreatureSource + 'static,
{
    let report = webserver.session.reload().await?;
    Ok(Json(json!({
        "requested": report.requested,
        "loaded": report.loaded,
        "failed": report.failed,
    })))
}

async fn selection_handler<S>(
    State(webserver): State<WebServer<S>>,
    Extension(kind): Extension<SelectionKind>,
) -> Json<SelectionSnapshot>
where
    S: CreatureSource + 'static,
{
    Json(webserver.session.selection_snapshot(kind).await)
}

async fn clear_selection_handler<S>(
    State(webserver): State<WebServer<S>>,
    Extension(kind): Extension<SelectionKind>,
) -> Json<SelectionSnapshot>
where
    S: CreatureSource + 'static,
{
    webserver.session.clear_selection(kind).await;
    Json(webserver.session.selection_snapshot(kind).await)
}

/// Add a member; a full set or a duplicate is a silent no-op
async fn add_member_handler<S>(
    State(webserver): State<WebServer<S>>,
    Extension(kind): Extension<SelectionKind>,
    Path(id): Path<u32>,
) -> WebServerResult<Json<SelectionSnapshot>>
where
    S: CreatureSource + 'static,
{
    webserver.session.add_to(kind, id).await?;
    Ok(Json(webserver.session.selection_snapshot(kind).await))
}

async fn remove_member_handler<S>(
    State(webserver): State<WebServer<S>>,
    Extension(kind): Extension<SelectionKind>,
    Path(id): Path<u32>,
) -> Json<SelectionSnapshot>
where
    S: CreatureSource + 'static,
{
    webserver.session.remove_from(kind, id).await;
    Json(webserver.session.selection_snapshot(kind).await)
}

/// Start an inspection and resolve it in the background
async fn inspect_handler<S>(
    State(webserver): State<WebServer<S>>,
    Path(id): Path<u32>,
) -> WebServerResult<(StatusCode, Json<EvolutionSnapshot>)>
where
    S: CreatureSource + 'static,
{
    let inspection = webserver.session.begin_inspection(id).await?;
    let session = Arc::clone(&webserver.session);
    tokio::spawn(async move {
        let state = session.finish_inspection(inspection).await;
        component_debug!(ComponentId::current(), "Inspection of #{} settled: {:?}", id, state.creature_id());
    });

    Ok((StatusCode::ACCEPTED, Json(webserver.session.evolution_snapshot().await)))
}

async fn evolution_handler<S>(State(webserver): State<WebServer<S>>) -> Json<EvolutionSnapshot>
where
    S: CreatureSource + 'static,
{
    Json(webserver.session.evolution_snapshot().await)
}

async fn close_inspection_handler<S>(State(webserver): State<WebServer<S>>) -> Json<EvolutionSnapshot>
where
    S: CreatureSource + 'static,
{
    webserver.session.close_inspection().await;
    Json(webserver.session.evolution_snapshot().await)
}

/// Health check endpoint
async fn health_check<S>(State(webserver): State<WebServer<S>>) -> Json<Value>
where
    S: CreatureSource + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime": webserver.state.get_uptime_seconds(),
        "running": webserver.state.is_running(),
        "load_state": webserver.session.load_state().await,
    }))
}
