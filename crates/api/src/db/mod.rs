pub mod climate_data;
pub mod dates;
pub mod schema;

pub use climate_data::*;
pub use dates::*;
pub use schema::*;

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

/// One precipitation reading inside the trailing year window
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PrecipitationObservation {
    /// Observation date (YYYY-MM-DD)
    pub date: String,
    pub station: String,
    /// Precipitation amount, absent when the station did not report one
    pub prcp: Option<f64>,
}

impl From<(String, String, Option<f64>)> for PrecipitationObservation {
    fn from((date, station, prcp): (String, String, Option<f64>)) -> Self {
        Self {
            date,
            station,
            prcp,
        }
    }
}

/// One temperature observation of the most active station
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureObservation {
    /// Observation date (YYYY-MM-DD)
    pub date: String,
    pub station: String,
    pub tobs: f64,
}

impl From<(String, String, f64)> for TemperatureObservation {
    fn from((date, station, tobs): (String, String, f64)) -> Self {
        Self {
            date,
            station,
            tobs,
        }
    }
}

/// Number of measurement rows recorded by a station
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StationActivity {
    pub station: String,
    pub count: i64,
}

impl From<(String, i64)> for StationActivity {
    fn from((station, count): (String, i64)) -> Self {
        Self { station, count }
    }
}

/// Min/avg/max temperature over a date filter.
///
/// Every field is `None` when no measurement matched the filter.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}

impl From<(Option<f64>, Option<f64>, Option<f64>)> for TemperatureSummary {
    fn from((min, avg, max): (Option<f64>, Option<f64>, Option<f64>)) -> Self {
        Self { min, avg, max }
    }
}

/// Date filter for a temperature summary: `start <= date`, plus `date <= end`
/// when an end is given. Both bounds are inclusive and never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureQuery {
    pub start: Date,
    pub end: Option<Date>,
}

impl TemperatureQuery {
    pub fn from_start(start: Date) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}
