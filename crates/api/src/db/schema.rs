use log::debug;
use sqlx::sqlite::SqliteConnection;

use super::Error;

/// A table of the climate dataset that the service reads from.
///
/// The schema is owned by whoever produced the dataset; the service only
/// checks that the columns it relies on are present.
pub trait TableSchema {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
}

/// One station observation row of the `measurement` table
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    /// Calendar date stored as `YYYY-MM-DD` text
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl TableSchema for Measurement {
    const TABLE: &'static str = "measurement";
    const COLUMNS: &'static [&'static str] = &["id", "station", "date", "prcp", "tobs"];
}

/// One monitoring station row of the `station` table
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl TableSchema for Station {
    const TABLE: &'static str = "station";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "station",
        "name",
        "latitude",
        "longitude",
        "elevation",
    ];
}

pub async fn verify_table<T: TableSchema>(conn: &mut SqliteConnection) -> Result<(), Error> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
        .bind(T::TABLE)
        .fetch_all(&mut *conn)
        .await?;

    if columns.is_empty() {
        return Err(Error::Schema(format!("missing table '{}'", T::TABLE)));
    }

    let missing: Vec<&str> = T::COLUMNS
        .iter()
        .copied()
        .filter(|expected| !columns.iter().any(|c| c.eq_ignore_ascii_case(expected)))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Schema(format!(
            "table '{}' is missing columns: {}",
            T::TABLE,
            missing.join(", ")
        )));
    }

    debug!("table '{}' has columns: {}", T::TABLE, columns.join(", "));
    Ok(())
}
