use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::{AuthSession, FileTokenStore, TokenStore};
use crate::config::config;
use crate::events::EventBus;
use crate::menu::MenuContext;

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("PORTAL_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("admin-portal").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn token_store() -> anyhow::Result<Arc<FileTokenStore>> {
    Ok(Arc::new(FileTokenStore::new(get_config_dir()?.join("tokens.json"))))
}

/// Everything a command needs to talk to the backend as the stored user
pub struct Workspace {
    pub tokens: Arc<FileTokenStore>,
    pub client: ApiClient,
    pub events: EventBus,
}

impl Workspace {
    pub fn load() -> anyhow::Result<Self> {
        let tokens = token_store()?;
        let settings = config();
        let store: Arc<dyn TokenStore> = tokens.clone();
        let client = ApiClient::new(&settings.api, &settings.menu.endpoint, store)?;
        Ok(Self {
            tokens,
            client,
            events: EventBus::new(settings.events.bus_capacity),
        })
    }

    pub fn session(&self) -> AuthSession {
        AuthSession::new(self.tokens.clone(), self.events.clone())
    }

    pub fn menu_context(&self) -> MenuContext {
        MenuContext::new(Arc::new(self.client.clone()), self.tokens.clone())
    }
}
