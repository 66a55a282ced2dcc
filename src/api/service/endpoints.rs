use axum::extract::{Json, Path, State};
use chrono::{Days, NaiveDate};
use sqlx::{SqliteConnection, SqlitePool};

use super::QueryTimeout;
use super::types::*;

pub type Result<T> = std::result::Result<T, ErrorResponse>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOOKBACK_DAYS: u64 = 365;

pub const INDEX: &str = "\
Welcome to the Hawaii Climate API!
Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
";

pub async fn index() -> &'static str {
    INDEX
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        ErrorResponse::new(
            ErrorKind::MalformedInput,
            format!("{value:?} is not a YYYY-MM-DD date: {e}"),
        )
    })
}

/// Start of the one year window ending at `most_recent`.
fn one_year_before(most_recent: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(most_recent, DATE_FORMAT).map_err(|e| {
        ErrorResponse::new(
            ErrorKind::CorruptRecord,
            format!("stored date {most_recent:?} is not a YYYY-MM-DD date: {e}"),
        )
    })?;

    let start = date.checked_sub_days(Days::new(LOOKBACK_DAYS)).ok_or_else(|| {
        ErrorResponse::new(
            ErrorKind::CorruptRecord,
            format!("stored date {most_recent:?} is out of range"),
        )
    })?;

    Ok(start.format(DATE_FORMAT).to_string())
}

async fn most_recent_date(conn: &mut SqliteConnection) -> Result<String> {
    let date: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurements;")
        .fetch_one(&mut *conn)
        .await?;

    date.ok_or_else(|| ErrorResponse::new(ErrorKind::EmptyDataset, "no measurements recorded"))
}

async fn most_active_station(conn: &mut SqliteConnection) -> Result<String> {
    // Ties go to the lowest station id.
    let station: Option<String> = sqlx::query_scalar(
        "
        SELECT station
        FROM measurements
        GROUP BY station
        ORDER BY COUNT(*) DESC, station ASC
        LIMIT 1;
    ",
    )
    .fetch_optional(&mut *conn)
    .await?;

    station.ok_or_else(|| ErrorResponse::new(ErrorKind::EmptyDataset, "no measurements recorded"))
}

/// Later rows overwrite earlier ones on duplicate dates.
fn fold_precipitation(rows: Vec<(String, Option<f64>)>) -> PrecipitationResponse {
    let mut by_date = PrecipitationResponse::new();
    for (date, prcp) in rows {
        by_date.insert(date, prcp);
    }
    by_date
}

pub async fn precipitation(
    State(pool): State<SqlitePool>,
    State(limit): State<QueryTimeout>,
) -> Result<Json<PrecipitationResponse>> {
    let mut conn = limit.run(pool.acquire()).await?;

    let most_recent = limit.run(most_recent_date(&mut conn)).await?;
    let since = one_year_before(&most_recent)?;
    log::debug!("precipitation: {since} to {most_recent}");

    let rows: Vec<(String, Option<f64>)> = limit
        .run(
            sqlx::query_as("SELECT date, prcp FROM measurements WHERE date >= ?1;")
                .bind(&since)
                .fetch_all(&mut *conn),
        )
        .await?;

    Ok(Json(fold_precipitation(rows)))
}

pub async fn stations(
    State(pool): State<SqlitePool>,
    State(limit): State<QueryTimeout>,
) -> Result<Json<StationsResponse>> {
    let mut conn = limit.run(pool.acquire()).await?;

    let stations: Vec<String> = limit
        .run(sqlx::query_scalar("SELECT station FROM stations;").fetch_all(&mut *conn))
        .await?;

    Ok(Json(stations))
}

pub async fn tobs(
    State(pool): State<SqlitePool>,
    State(limit): State<QueryTimeout>,
) -> Result<Json<TobsResponse>> {
    let mut conn = limit.run(pool.acquire()).await?;

    let station = limit.run(most_active_station(&mut conn)).await?;
    let most_recent = limit.run(most_recent_date(&mut conn)).await?;
    let since = one_year_before(&most_recent)?;
    log::debug!("tobs: station {station}, {since} to {most_recent}");

    let rows: Vec<(String, Option<f64>)> = limit
        .run(
            sqlx::query_as("SELECT date, tobs FROM measurements WHERE station = ?1 AND date >= ?2;")
                .bind(&station)
                .bind(&since)
                .fetch_all(&mut *conn),
        )
        .await?;

    let observations = rows
        .into_iter()
        .map(|(date, temperature)| TemperatureObservation { date, temperature })
        .collect();

    Ok(Json(observations))
}

async fn temperature_stats(
    pool: &SqlitePool,
    limit: QueryTimeout,
    start: &str,
    end: Option<&str>,
) -> Result<StatsResponse> {
    let start = parse_date(start)?.format(DATE_FORMAT).to_string();
    let end = end
        .map(|end| parse_date(end).map(|d| d.format(DATE_FORMAT).to_string()))
        .transpose()?;
    log::debug!("stats: {start} to {}", end.as_deref().unwrap_or("end of data"));

    let mut conn = limit.run(pool.acquire()).await?;

    let stats = limit
        .run(
            sqlx::query_as(
                "
                SELECT
                    MIN(tobs) AS tmin,
                    AVG(tobs) AS tavg,
                    MAX(tobs) AS tmax
                FROM measurements
                WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2);
            ",
            )
            .bind(&start)
            .bind(&end)
            .fetch_one(&mut *conn),
        )
        .await?;

    Ok(stats)
}

pub async fn stats_from(
    State(pool): State<SqlitePool>,
    State(limit): State<QueryTimeout>,
    Path(r): Path<StatsFromRequest>,
) -> Result<Json<StatsResponse>> {
    let stats = temperature_stats(&pool, limit, &r.start, None).await?;
    Ok(Json(stats))
}

pub async fn stats_range(
    State(pool): State<SqlitePool>,
    State(limit): State<QueryTimeout>,
    Path(r): Path<StatsRangeRequest>,
) -> Result<Json<StatsResponse>> {
    let stats = temperature_stats(&pool, limit, &r.start, Some(&r.end)).await?;
    Ok(Json(stats))
}
