use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use log::info;
use std::sync::Arc;
use time::Date;

use crate::{
    parse_date, AppState, ErrorBody, PrecipitationObservation, StationActivity,
    TemperatureObservation, TemperatureQuery, TemperatureSummary,
};

use super::ApiError;

fn date_param(value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::InvalidDateFormat {
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

fn undecodable_path(rejection: PathRejection) -> ApiError {
    ApiError::InvalidDateFormat {
        value: String::from("<undecodable>"),
        reason: rejection.body_text(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation readings of the last 366 days of data, ordered by date", content_type = "application/json", body = Vec<PrecipitationObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate dataset", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationObservation>>, ApiError> {
    info!("received request for precipitation for the last 12 months of data");
    let observations = state.climate_db.precipitation_last_year().await?;
    Ok(Json(observations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Stations with their observation counts, busiest first", content_type = "application/json", body = Vec<StationActivity>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate dataset", body = ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationActivity>>, ApiError> {
    info!("received request for the list of stations");
    let stations = state.climate_db.station_activity().await?;
    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station for the last 366 days of data", content_type = "application/json", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate dataset", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    info!("received request for temperature observations of the most active station");
    let observations = state.climate_db.most_active_station_temperatures().await?;
    Ok(Json(observations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date to include (YYYY-MM-DD)"),
    ),
    responses(
        (status = OK, description = "Min/avg/max temperature for every date on or after start, null when nothing matches", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start date is not YYYY-MM-DD", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate dataset", body = ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    start: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let Path(start) = start.map_err(undecodable_path)?;
    info!("received request for temperature summary from {}", start);
    let query = TemperatureQuery::from_start(date_param(&start)?);
    let summary = state.climate_db.temperature_summary(&query).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date to include (YYYY-MM-DD)"),
         ("end" = String, Path, description = "Last date to include (YYYY-MM-DD)"),
    ),
    responses(
        (status = OK, description = "Min/avg/max temperature between start and end inclusive, null when nothing matches", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start or end date is not YYYY-MM-DD", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate dataset", body = ErrorBody)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    dates: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let Path((start, end)) = dates.map_err(undecodable_path)?;
    info!("received request for temperature summary from {} to {}", start, end);
    let query = TemperatureQuery::between(date_param(&start)?, date_param(&end)?);
    let summary = state.climate_db.temperature_summary(&query).await?;
    Ok(Json(summary))
}
