mod common;

use common::{config_for, events_body, shared, wait_until, weather_body};
use httpmock::prelude::*;
use office_display::components::{CalendarEvents, ComponentManager, PanelBody};
use office_display::config::Config;
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.api_base_url, "http://localhost:5000");
    assert_eq!(config.calendar_refresh_secs, 300);
    assert_eq!(config.weather_refresh_secs, 600);
    assert!(config.is_component_enabled("clock"));
    assert!(config.is_component_enabled("calendar_events"));
    assert!(config.is_component_enabled("weather_display"));
}

#[tokio::test]
async fn test_manager_registers_enabled_components() {
    let mut config = Config::default();
    config.components.insert("weather_display".to_string(), false);

    let manager = ComponentManager::with_enabled_components(shared(config))
        .await
        .unwrap();
    assert_eq!(manager.names(), ["clock", "calendar_events"]);
    assert!(manager.get::<CalendarEvents>("calendar_events").is_some());
    assert!(manager.get_component_by_name("weather_display").is_none());
}

#[tokio::test]
async fn test_manager_refuses_to_start_with_nothing_enabled() {
    let mut config = Config::default();
    for enabled in config.components.values_mut() {
        *enabled = false;
    }

    let result = ComponentManager::with_enabled_components(shared(config)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_dashboard_panels_follow_the_backend() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/calendar/events");
            then.status(200).json_body(events_body(2));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/weather/current");
            then.status(200).json_body(weather_body("Partly cloudy"));
        })
        .await;

    let manager = ComponentManager::with_enabled_components(shared(config_for(&server)))
        .await
        .unwrap();
    manager.init_all().await.unwrap();

    let settled = wait_until(Duration::from_secs(5), || {
        manager
            .panels()
            .iter()
            .all(|(_, panel)| panel.body != PanelBody::Loading)
    })
    .await;
    assert!(settled);

    let panels = manager.panels();
    let names: Vec<_> = panels.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["clock", "calendar_events", "weather_display"]);
    assert_eq!(panels[1].1.entry_list().len(), 2);
    assert_eq!(panels[2].1.entry_list()[0].heading, "☁ 18°C");

    manager.shutdown_all().await.unwrap();
}
