/// Tables and columns the service reads. Checked at startup, never created.
pub const TABLES: &[(&str, &[&str])] = &[
    ("stations", &["station", "name", "latitude", "longitude", "elevation"]),
    ("measurements", &["station", "date", "prcp", "tobs"]),
];

/// DDL matching `TABLES`, used to build datasets in tests.
#[cfg(test)]
pub const SCHEMA: &str = r#"

CREATE TABLE IF NOT EXISTS stations (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL UNIQUE,
    name TEXT,
    latitude REAL,
    longitude REAL,
    elevation REAL
);

CREATE TABLE IF NOT EXISTS measurements (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL
);

"#;
