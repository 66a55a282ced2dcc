use axum::routing::get;

use super::State;
use super::endpoints::*;

pub fn router(state: State) -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(stats_from))
        .route("/api/v1.0/{start}/{end}", get(stats_range))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::db::Database;
    use crate::test_utils::{self, measurement, station};

    use super::*;

    async fn hawaii() -> Database {
        test_utils::database(
            &[station("USC1")],
            &[
                measurement("USC1", "2017-08-20", Some(0.01), Some(70.0)),
                measurement("USC1", "2017-08-23", None, Some(74.0)),
            ],
        )
        .await
    }

    async fn get_json(db: &Database, uri: &str) -> (StatusCode, Value) {
        let app = router(State::new(db.clone(), Duration::from_secs(5)));
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn index_is_plain_text() {
        let db = hawaii().await;
        let app = router(State::new(db, Duration::from_secs(5)));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("/api/v1.0/<start>/<end>"));
    }

    #[tokio::test]
    async fn precipitation_route() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/precipitation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "2017-08-20": 0.01, "2017-08-23": null }));
    }

    #[tokio::test]
    async fn stations_route() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/stations").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["USC1"]));
    }

    #[tokio::test]
    async fn tobs_route() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/tobs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "date": "2017-08-20", "temperature": 70.0 },
                { "date": "2017-08-23", "temperature": 74.0 },
            ])
        );
    }

    #[tokio::test]
    async fn stats_range_route() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/2017-08-23/2017-08-23").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "TMIN": 74.0, "TAVG": 74.0, "TMAX": 74.0 }));
    }

    #[tokio::test]
    async fn stats_from_route() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/2017-08-21").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "TMIN": 74.0, "TAVG": 74.0, "TMAX": 74.0 }));
    }

    #[tokio::test]
    async fn stats_over_empty_range_route() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/2010-01-01/2010-12-31").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "TMIN": null, "TAVG": null, "TMAX": null }));
    }

    #[tokio::test]
    async fn malformed_start_is_bad_request() {
        let db = hawaii().await;

        let (status, body) = get_json(&db, "/api/v1.0/last-week").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed_input");
    }

    #[tokio::test]
    async fn empty_store_is_server_error() {
        let db = test_utils::database(&[], &[]).await;

        let (status, body) = get_json(&db, "/api/v1.0/precipitation").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "empty_dataset");
    }
}
