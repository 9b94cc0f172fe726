use log::info;

pub const ROUTE_LISTING: &str = "\
Available Routes:
/api/v1.0/precipitation - precipitation for the last 12 months of data
/api/v1.0/stations - list of available stations with their observation counts
/api/v1.0/tobs - the dates and temperature observations of the most-active station for the last 12 months of data
/api/v1.0/YYYY-MM-DD - the minimum, average and maximum temperature for all dates greater than or equal to the start date
/api/v1.0/YYYY-MM-DD/YYYY-MM-DD - the minimum, average and maximum temperature for the dates from the start date to the end date, inclusive
/docs - interactive API documentation
";

pub async fn index_handler() -> &'static str {
    info!("received request for the route listing");
    ROUTE_LISTING
}
