//! Extensions a game asks the bot to load at startup.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("extension `{0}` is already loaded")]
    AlreadyLoaded(String),
    #[error("extension name is empty")]
    EmptyName,
}

/// Names of loaded extensions, in load order.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    loaded: Vec<String>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, name: &str) -> Result<(), ExtensionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExtensionError::EmptyName);
        }
        if self.is_loaded(name) {
            return Err(ExtensionError::AlreadyLoaded(name.to_string()));
        }
        self.loaded.push(name.to_string());
        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|n| n == name)
    }

    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}
