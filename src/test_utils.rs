use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::db::Database;
use crate::schema::SCHEMA;

/// A row of the `stations` table.
#[derive(Debug, Clone)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// A row of the `measurements` table. `date` is always `YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

/// In-memory database with the schema applied and the given rows inserted in order.
///
/// The pool holds a single connection that never expires, since every
/// `:memory:` connection is a separate database.
pub async fn database(stations: &[Station], measurements: &[Measurement]) -> Database {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
        .unwrap();

    let db = Database { pool };
    sqlx::raw_sql(SCHEMA).execute(&db.pool).await.unwrap();

    for s in stations {
        sqlx::query(
            "INSERT INTO stations (station, name, latitude, longitude, elevation)
            VALUES (?1, ?2, ?3, ?4, ?5);",
        )
        .bind(&s.station)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(&db.pool)
        .await
        .unwrap();
    }

    for m in measurements {
        sqlx::query("INSERT INTO measurements (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4);")
            .bind(&m.station)
            .bind(&m.date)
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&db.pool)
            .await
            .unwrap();
    }

    db
}

pub fn station(id: &str) -> Station {
    Station {
        station: id.to_string(),
        name: Some(format!("{id} station, HI US")),
        latitude: Some(21.2716),
        longitude: Some(-157.8168),
        elevation: Some(3.0),
    }
}

pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: Option<f64>) -> Measurement {
    Measurement {
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}
