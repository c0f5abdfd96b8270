use onemapan::api::ApiClient;
use onemapan::components::dashboard::{DashboardHandle, DashboardQuery};
use onemapan::components::events::DisplayOptions;
use onemapan::config::Config;
use onemapan::session::NATIONAL_AREA;
use std::sync::Arc;

/// Smoke test to verify that a config can be built and used for display
#[test]
fn test_config_builds_display_options() {
    let config = Config::with_api_url("http://127.0.0.1:3000/api");

    assert_eq!(config.locale, "id");
    assert_eq!(config.session_path(), std::path::Path::new("config/session.toml"));

    let options = DisplayOptions::from_config(&config).unwrap();
    assert_eq!(options.locale, "id");
}

/// Smoke test for building a client from config
#[test]
fn test_client_from_config() {
    let config = Config::with_api_url("http://127.0.0.1:3000/api");
    let client = ApiClient::new(&config).unwrap();

    assert!(client.session().is_none());
    assert_eq!(
        client.endpoint("/event", &[]).unwrap().as_str(),
        "http://127.0.0.1:3000/api/event"
    );
}

/// Without a backend the dashboard load fails instead of showing zeros
#[tokio::test]
async fn test_dashboard_without_backend_fails() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = ApiClient::with_client(&format!("http://{}", addr), reqwest::Client::new()).unwrap();
    let handle = DashboardHandle::new(Arc::new(client), DisplayOptions::default());

    let query = DashboardQuery {
        area: NATIONAL_AREA.to_string(),
        drill_down: None,
    };
    assert!(handle.load(&query).await.is_err());
}
