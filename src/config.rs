//! Configuration for colite
//!
//! Centralized configuration with sensible defaults.

use crate::error::{CollectionError, Result};

/// Reserved tag prefixed to every composite key written by this crate
pub const DEFAULT_OBJECT_TYPE: &str = "_COLITE";

/// Collection-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Key Configuration
    // -------------------------------------------------------------------------
    /// Discriminator placed before the namespace in every composite key.
    /// Keys written outside this layer never carry it, so they cannot collide.
    pub object_type: String,

    // -------------------------------------------------------------------------
    // Iterator Configuration
    // -------------------------------------------------------------------------
    /// Release the store cursor as soon as `has_next` reports exhaustion.
    /// When false the cursor is held until `close()` or drop.
    pub close_on_exhaust: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            object_type: DEFAULT_OBJECT_TYPE.to_string(),
            close_on_exhaust: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the tag can be encoded into a composite key
    pub fn validate(&self) -> Result<()> {
        if self.object_type.is_empty() {
            return Err(CollectionError::Config("object type can not be empty".into()));
        }
        if self.object_type.contains(|c: char| c == '\u{0}' || c == char::MAX) {
            return Err(CollectionError::Config(format!(
                "object type {:?} contains a reserved delimiter",
                self.object_type
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the reserved composite-key tag
    pub fn object_type(mut self, tag: impl Into<String>) -> Self {
        self.config.object_type = tag.into();
        self
    }

    /// Set whether a full drain releases the cursor
    pub fn close_on_exhaust(mut self, enabled: bool) -> Self {
        self.config.close_on_exhaust = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
