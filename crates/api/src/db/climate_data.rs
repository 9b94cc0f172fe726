use async_trait::async_trait;
use futures::future::BoxFuture;
use log::{debug, info, warn};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection,
};
use std::path::{Path, PathBuf};
use time::Date;

use super::{
    format_date, parse_date, verify_table, Measurement, PrecipitationObservation, Station,
    StationActivity, TemperatureObservation, TemperatureQuery, TemperatureSummary, YearWindow,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to parse date string: {0}")]
    DateParse(#[from] super::DateError),
    #[error("Failed to format date string: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("Unexpected dataset schema: {0}")]
    Schema(String),
}

#[async_trait]
pub trait ClimateData: Send + Sync {
    /// Every precipitation reading from the trailing 366 days of the dataset
    async fn precipitation_last_year(&self) -> Result<Vec<PrecipitationObservation>, Error>;
    /// Stations with their measurement counts, busiest first
    async fn station_activity(&self) -> Result<Vec<StationActivity>, Error>;
    /// Temperature observations of the busiest station over the trailing 366 days
    async fn most_active_station_temperatures(
        &self,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    async fn temperature_summary(
        &self,
        query: &TemperatureQuery,
    ) -> Result<TemperatureSummary, Error>;
}

/// Read-only access to the climate SQLite dataset.
///
/// Holds no connection between calls: each operation opens its own and
/// closes it before returning.
pub struct ClimateAccess {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl ClimateAccess {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);
        Self { path, options }
    }

    pub async fn open_connection(&self) -> Result<SqliteConnection, sqlx::Error> {
        SqliteConnection::connect_with(&self.options).await
    }

    /// Runs `operation` on a freshly opened connection and closes it afterwards,
    /// whether or not the operation succeeded.
    async fn with_connection<T, F>(&self, operation: F) -> Result<T, Error>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, Error>> + Send,
    {
        let mut conn = self.open_connection().await?;
        let result = operation(&mut conn).await;
        if let Err(e) = conn.close().await {
            warn!("error closing dataset connection: {}", e);
        }
        result
    }

    /// Check that the tables and columns the queries rely on exist
    pub async fn verify_schema(&self) -> Result<(), Error> {
        self.with_connection(|conn| {
            Box::pin(async move {
                verify_table::<Measurement>(&mut *conn).await?;
                verify_table::<Station>(&mut *conn).await?;
                Ok::<_, Error>(())
            })
        })
        .await?;
        info!("dataset schema verified: {}", self.path.display());
        Ok(())
    }
}

async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<Date>, Error> {
    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;
    Ok(latest.as_deref().map(parse_date).transpose()?)
}

async fn year_window(conn: &mut SqliteConnection) -> Result<Option<YearWindow>, Error> {
    let window = latest_date(conn).await?.map(YearWindow::ending_at);
    debug!("trailing year window: {:?}", window);
    Ok(window)
}

async fn most_active_station(conn: &mut SqliteConnection) -> Result<Option<String>, Error> {
    let station = sqlx::query_scalar(
        "SELECT station FROM measurement
         GROUP BY station
         ORDER BY COUNT(*) DESC, station ASC
         LIMIT 1",
    )
    .fetch_optional(&mut *conn)
    .await?;
    Ok(station)
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation_last_year(&self) -> Result<Vec<PrecipitationObservation>, Error> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let Some(window) = year_window(&mut *conn).await? else {
                    return Ok(vec![]);
                };

                let rows: Vec<(String, String, Option<f64>)> = sqlx::query_as(
                    "SELECT date, station, CAST(prcp AS REAL)
                     FROM measurement
                     WHERE date >= ? AND date <= ?
                     ORDER BY date, station",
                )
                .bind(format_date(window.start)?)
                .bind(format_date(window.end)?)
                .fetch_all(&mut *conn)
                .await?;

                Ok::<_, Error>(rows.into_iter().map(PrecipitationObservation::from).collect())
            })
        })
        .await
    }

    async fn station_activity(&self) -> Result<Vec<StationActivity>, Error> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let rows: Vec<(String, i64)> = sqlx::query_as(
                    "SELECT station, COUNT(*) AS observations
                     FROM measurement
                     GROUP BY station
                     ORDER BY observations DESC, station ASC",
                )
                .fetch_all(&mut *conn)
                .await?;

                Ok::<_, Error>(rows.into_iter().map(StationActivity::from).collect())
            })
        })
        .await
    }

    async fn most_active_station_temperatures(
        &self,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let Some(station) = most_active_station(&mut *conn).await? else {
                    return Ok(vec![]);
                };
                let Some(window) = year_window(&mut *conn).await? else {
                    return Ok(vec![]);
                };
                debug!("most active station: {}", station);

                let rows: Vec<(String, String, f64)> = sqlx::query_as(
                    "SELECT date, station, CAST(tobs AS REAL)
                     FROM measurement
                     WHERE station = ? AND date >= ? AND date <= ?
                     ORDER BY date",
                )
                .bind(station)
                .bind(format_date(window.start)?)
                .bind(format_date(window.end)?)
                .fetch_all(&mut *conn)
                .await?;

                Ok::<_, Error>(rows.into_iter().map(TemperatureObservation::from).collect())
            })
        })
        .await
    }

    async fn temperature_summary(
        &self,
        query: &TemperatureQuery,
    ) -> Result<TemperatureSummary, Error> {
        let start = format_date(query.start)?;
        let end = query.end.map(format_date).transpose()?;

        self.with_connection(|conn| {
            Box::pin(async move {
                let row: (Option<f64>, Option<f64>, Option<f64>) = match end {
                    Some(end) => {
                        sqlx::query_as(
                            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
                             FROM measurement
                             WHERE date >= ? AND date <= ?",
                        )
                        .bind(start)
                        .bind(end)
                        .fetch_one(&mut *conn)
                        .await?
                    }
                    None => {
                        sqlx::query_as(
                            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
                             FROM measurement
                             WHERE date >= ?",
                        )
                        .bind(start)
                        .fetch_one(&mut *conn)
                        .await?
                    }
                };

                Ok::<_, Error>(TemperatureSummary::from(row))
            })
        })
        .await
    }
}
