//! Dashboard analytics and data reset

mod common;

use chrono::Utc;
use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

async fn seed(app: &TestApp) {
    app.create_server("Léa").await;
    app.create_server("Marco").await;
    app.create_option("Tiramisu", "dessert").await;
    app.create_option("Burrata", "starter").await;

    let visits = [
        json!({ "tags": [
            { "category": "server_name", "value": "Léa" },
            { "category": "liked_dishes", "value": "Tiramisu" },
            { "category": "atmosphere", "value": "Cosy" }
        ]}),
        json!({ "tags": [
            { "category": "server_name", "value": "Léa" },
            { "category": "liked_dishes", "value": "Tiramisu" },
            { "category": "liked_dishes", "value": "Burrata" },
            { "category": "atmosphere", "value": "Cosy" }
        ], "private_feedback": "Slow bill" }),
        json!({ "tags": [
            { "category": "server_name", "value": "Giulia" },
            { "category": "service_qualities", "value": "Fast" }
        ]}),
    ];
    for body in visits {
        let resp = app.generate(body).await;
        assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    }
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = TestApp::new().await;
    seed(&app).await;

    let resp = app.admin(Method::GET, "/dashboard", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.body;

    assert_eq!(body["total_reviews"], 3);
    assert_eq!(body["reviews_last_7_days"], 3);
    assert_eq!(body["new_feedback_count"], 1);
    assert_eq!(body["recent_reviews"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["server_stats"],
        json!([
            { "server_name": "Léa", "count": 2 },
            { "server_name": "Giulia", "count": 1 },
            { "server_name": "Marco", "count": 0 }
        ])
    );
}

#[tokio::test]
async fn test_trend_covers_fourteen_days() {
    let app = TestApp::new().await;
    seed(&app).await;

    let resp = app.admin(Method::GET, "/dashboard", None).await;
    let trend = resp.body["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 14);

    let dates: Vec<&str> = trend.iter().map(|p| p["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let last = trend.last().unwrap();
    // a run straddling midnight lands on the previous day
    if last["date"] == today.as_str() {
        assert_eq!(last["count"], 3);
    }
    let total: i64 = trend.iter().map(|p| p["count"].as_i64().unwrap()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_menu_performance_and_synthesis() {
    let app = TestApp::new().await;
    seed(&app).await;

    let resp = app
        .admin(Method::GET, "/api/menu-performance?period=30d", None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        json!([
            { "dish_name": "Tiramisu", "dish_category": "dessert", "count": 2 },
            { "dish_name": "Burrata", "dish_category": "starter", "count": 1 }
        ])
    );

    let resp = app
        .admin(Method::GET, "/api/qualitative-synthesis", None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["atmosphere"], json!([{ "value": "Cosy", "count": 2 }]));
    assert_eq!(
        resp.body["service_qualities"],
        json!([{ "value": "Fast", "count": 1 }])
    );
    assert!(resp.body.get("server_name").is_none());
    assert!(resp.body.get("liked_dishes").is_none());
}

#[tokio::test]
async fn test_invalid_period_is_rejected() {
    let app = TestApp::new().await;

    for uri in ["/api/server-stats?period=90", "/api/menu-performance?period=week"] {
        let resp = app.admin(Method::GET, uri, None).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(resp.body["code"], 5001);
    }

    let resp = app
        .admin(Method::GET, "/api/server-stats?period=", None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_reset_data_empties_logs() {
    let app = TestApp::new().await;
    seed(&app).await;

    let resp = app.admin(Method::POST, "/api/reset-data", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body["deleted"],
        json!({
            "generated_reviews": 3,
            "menu_selections": 3,
            "qualitative_feedback": 3,
            "internal_feedback": 1
        })
    );

    for table in [
        "generated_review",
        "menu_selection",
        "qualitative_feedback",
        "internal_feedback",
    ] {
        assert_eq!(app.count(table).await, 0, "{table}");
    }
    // catalog is untouched
    assert_eq!(app.count("server").await, 2);
    assert_eq!(app.count("menu_option").await, 2);

    let resp = app.admin(Method::GET, "/dashboard", None).await;
    assert_eq!(resp.body["total_reviews"], 0);
    assert_eq!(
        resp.body["server_stats"],
        json!([
            { "server_name": "Léa", "count": 0 },
            { "server_name": "Marco", "count": 0 }
        ])
    );
    let trend = resp.body["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 14);
    assert!(trend.iter().all(|p| p["count"] == 0));
}
