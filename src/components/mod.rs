use crate::config::Config;
use crate::error::{component_error, DisplayResult};
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

// Export components
pub mod calendar_events;
pub mod clock;
pub mod feed;
pub mod panel;
pub mod weather_display;

pub use calendar_events::CalendarEvents;
pub use clock::Clock;
pub use panel::{Panel, PanelBody, PanelEntry};
pub use weather_display::WeatherDisplay;

/// Component trait that all display widgets implement
#[async_trait]
pub trait Component: Send + Sync + Any {
    /// Get the name of the component
    fn name(&self) -> &'static str;

    /// Mount the component and start its timers
    async fn init(&self, config: Arc<RwLock<Config>>) -> DisplayResult<()>;

    /// Tear the component down; its timers stop and its state freezes
    async fn shutdown(&self) -> DisplayResult<()>;

    /// Render the current state
    fn render(&self) -> Panel;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Manager for all components
pub struct ComponentManager {
    components: Vec<Box<dyn Component>>,
    config: Arc<RwLock<Config>>,
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("component_count", &self.components.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ComponentManager {
    /// Create a new component manager
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            components: Vec::new(),
            config,
        }
    }

    /// Register the built-in widgets enabled in the configuration
    pub async fn with_enabled_components(config: Arc<RwLock<Config>>) -> DisplayResult<Self> {
        let mut manager = Self::new(Arc::clone(&config));
        let config = config.read().await;

        if config.is_component_enabled("clock") {
            manager.register(Clock::new(&config)?);
        }
        if config.is_component_enabled("calendar_events") {
            manager.register(CalendarEvents::new(&config)?);
        }
        if config.is_component_enabled("weather_display") {
            manager.register(WeatherDisplay::new(&config)?);
        }

        if manager.components.is_empty() {
            return Err(component_error("All components are disabled"));
        }

        Ok(manager)
    }

    /// Register a component
    pub fn register<T: Component + 'static>(&mut self, component: T) {
        info!("Registering component: {}", component.name());
        self.components.push(Box::new(component));
    }

    /// Initialize all registered components
    pub async fn init_all(&self) -> DisplayResult<()> {
        for component in &self.components {
            info!("Initializing component: {}", component.name());

            if let Err(e) = component.init(Arc::clone(&self.config)).await {
                // Log error but continue with other components
                error!("Error initializing component {}: {:?}", component.name(), e);
            }
        }

        Ok(())
    }

    /// Shutdown all components
    pub async fn shutdown_all(&self) -> DisplayResult<()> {
        info!("Shutting down all components");

        for component in &self.components {
            info!("Shutting down component: {}", component.name());

            if let Err(e) = component.shutdown().await {
                // Log error but continue with other components
                error!("Error shutting down component {}: {:?}", component.name(), e);
            }
        }

        Ok(())
    }

    /// Get a component by name
    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Get a component by name as its concrete type
    pub fn get<T: Component>(&self, name: &str) -> Option<&T> {
        self.get_component_by_name(name)
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Current panels of all components, in registration order
    pub fn panels(&self) -> Vec<(&'static str, Panel)> {
        self.components
            .iter()
            .map(|c| (c.name(), c.render()))
            .collect()
    }

    /// Names of the registered components
    pub fn names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }
}
