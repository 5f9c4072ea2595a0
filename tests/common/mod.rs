#![allow(dead_code)]

use httpmock::MockServer;
use office_display::config::Config;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Configuration pointing at a mock backend
pub fn config_for(server: &MockServer) -> Config {
    Config {
        api_base_url: server.base_url(),
        ..Config::default()
    }
}

pub fn shared(config: Config) -> Arc<RwLock<Config>> {
    Arc::new(RwLock::new(config))
}

/// Poll `condition` until it holds or `limit` passes
pub async fn wait_until<F>(limit: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}

/// `count` events with ids 1..=count, one hour apart
pub fn events_body(count: usize) -> Value {
    let events: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "title": format!("Event {}", i),
                "start": format!("2024-01-15T{:02}:00:00", 8 + i),
                "end": format!("2024-01-15T{:02}:30:00", 8 + i),
                "location": format!("Room {}", i)
            })
        })
        .collect();
    json!({ "events": events, "status": "success" })
}

pub fn weather_body(description: &str) -> Value {
    json!({
        "weather": {
            "temperature": 18,
            "humidity": 72,
            "description": description,
            "weather_code": 2,
            "location": "Lat: 37.7749, Lon: -122.4194",
            "last_updated": "2024-01-15T10:00"
        },
        "status": "success"
    })
}
