use crate::{
    db, index_handler, precipitation, routes, stations, temperature_between, temperature_from,
    tobs, ClimateAccess, ClimateData,
};
use anyhow::{anyhow, Context};
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use climate_core::require_file;
use hyper::{header::ACCEPT, Method, Uri};
use log::{debug, info};
use std::{sync::Arc, time::Instant};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::temperature_from,
        routes::climate::climate_routes::temperature_between,
    ),
    components(
        schemas(
                db::PrecipitationObservation,
                db::StationActivity,
                db::TemperatureObservation,
                db::TemperatureSummary,
                routes::climate::ErrorBody,
        )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over climate station precipitation and temperature observations")
    )
)]
struct ApiDoc;

/// Bind the dataset at `database_path`, failing if the file or any table
/// the queries rely on is missing.
pub async fn build_app_state(database_path: &str) -> Result<AppState, anyhow::Error> {
    let path = require_file(database_path)
        .with_context(|| format!("climate dataset not available at {}", database_path))?;

    let climate_db = ClimateAccess::new(path);
    climate_db
        .verify_schema()
        .await
        .map_err(|e| anyhow!("error verifying climate dataset: {}", e))?;

    Ok(AppState {
        climate_db: Arc::new(climate_db),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

/// Logs each exchange as one request line and one response line, both
/// tagged with the route that was asked for.
async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let route = requested_route(request.method(), request.uri());
    debug!(target: "http_request", "{}", route);

    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        target: "http_response",
        "{} -> {} in {}ms",
        route,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    response
}

fn requested_route(method: &Method, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{} {}?{}", method, uri.path(), query),
        None => format!("{} {}", method, uri.path()),
    }
}
