use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub menu: MenuConfig,
    pub filter: FilterConfig,
    pub grid: GridConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_version_path: String,
    pub auth_module: String,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    pub endpoint: String,
    pub not_found_path: String,
    pub log_sample_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub text_debounce_ms: u64,
    pub operator_debounce_ms: u64,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub filter_debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    pub bus_capacity: usize,
}

impl FilterConfig {
    pub fn text_debounce(&self) -> Duration {
        Duration::from_millis(self.text_debounce_ms)
    }

    pub fn operator_debounce(&self) -> Duration {
        Duration::from_millis(self.operator_debounce_ms)
    }
}

impl GridConfig {
    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("PORTAL_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("PORTAL_API_VERSION_PATH") {
            self.api.api_version_path = v;
        }
        if let Ok(v) = env::var("PORTAL_AUTH_MODULE") {
            self.api.auth_module = v;
        }
        if let Ok(v) = env::var("PORTAL_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Menu overrides
        if let Ok(v) = env::var("MENU_ENDPOINT") {
            self.menu.endpoint = v;
        }
        if let Ok(v) = env::var("MENU_NOT_FOUND_PATH") {
            self.menu.not_found_path = v;
        }
        if let Ok(v) = env::var("MENU_LOG_SAMPLE_SIZE") {
            self.menu.log_sample_size = v.parse().unwrap_or(self.menu.log_sample_size);
        }

        // Filter overrides
        if let Ok(v) = env::var("FILTER_TEXT_DEBOUNCE_MS") {
            self.filter.text_debounce_ms = v.parse().unwrap_or(self.filter.text_debounce_ms);
        }
        if let Ok(v) = env::var("FILTER_OPERATOR_DEBOUNCE_MS") {
            self.filter.operator_debounce_ms = v.parse().unwrap_or(self.filter.operator_debounce_ms);
        }
        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        // Grid overrides
        if let Ok(v) = env::var("GRID_DEFAULT_PAGE_SIZE") {
            self.grid.default_page_size = v.parse().unwrap_or(self.grid.default_page_size);
        }
        if let Ok(v) = env::var("GRID_PAGE_SIZE_OPTIONS") {
            let parsed: Vec<u32> = v.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if !parsed.is_empty() {
                self.grid.page_size_options = parsed;
            }
        }
        if let Ok(v) = env::var("GRID_FILTER_DEBOUNCE_MS") {
            self.grid.filter_debounce_ms = v.parse().unwrap_or(self.grid.filter_debounce_ms);
        }

        // Event bus overrides
        if let Ok(v) = env::var("EVENT_BUS_CAPACITY") {
            self.events.bus_capacity = v.parse().unwrap_or(self.events.bus_capacity);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                api_version_path: "/api/v1".to_string(),
                auth_module: "auth".to_string(),
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            menu: MenuConfig {
                endpoint: "menus".to_string(),
                not_found_path: "/error/404".to_string(),
                log_sample_size: 10,
            },
            filter: FilterConfig {
                text_debounce_ms: 500,
                operator_debounce_ms: 300,
                debug_logging: true,
            },
            grid: GridConfig {
                default_page_size: 10,
                page_size_options: vec![5, 10, 20, 50],
                filter_debounce_ms: 800,
            },
            events: EventsConfig { bus_capacity: 64 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging-api.example.com".to_string(),
                api_version_path: "/api/v1".to_string(),
                auth_module: "auth".to_string(),
                request_timeout_secs: 15,
                enable_request_logging: true,
            },
            menu: MenuConfig {
                endpoint: "menus".to_string(),
                not_found_path: "/error/404".to_string(),
                log_sample_size: 10,
            },
            filter: FilterConfig {
                text_debounce_ms: 500,
                operator_debounce_ms: 300,
                debug_logging: false,
            },
            grid: GridConfig {
                default_page_size: 10,
                page_size_options: vec![5, 10, 20, 50],
                filter_debounce_ms: 800,
            },
            events: EventsConfig { bus_capacity: 64 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://api.example.com".to_string(),
                api_version_path: "/api/v1".to_string(),
                auth_module: "auth".to_string(),
                request_timeout_secs: 10,
                enable_request_logging: false,
            },
            menu: MenuConfig {
                endpoint: "menus".to_string(),
                not_found_path: "/error/404".to_string(),
                log_sample_size: 5,
            },
            filter: FilterConfig {
                text_debounce_ms: 500,
                operator_debounce_ms: 300,
                debug_logging: false,
            },
            grid: GridConfig {
                default_page_size: 20,
                page_size_options: vec![10, 20, 50],
                filter_debounce_ms: 800,
            },
            events: EventsConfig { bus_capacity: 128 },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.filter.text_debounce(), Duration::from_millis(500));
        assert_eq!(config.filter.operator_debounce(), Duration::from_millis(300));
        assert_eq!(config.grid.filter_debounce(), Duration::from_millis(800));
        assert_eq!(config.menu.not_found_path, "/error/404");
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.filter.debug_logging);
        assert_eq!(config.grid.default_page_size, 20);
        assert!(!config.api.enable_request_logging);
        assert!(config.grid.page_size_options.contains(&config.grid.default_page_size));
    }
}
