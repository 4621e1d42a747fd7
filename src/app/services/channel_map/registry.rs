//! Channel map registry
//!
//! Maps channel-map variant names to factory functions. The registry is
//! populated explicitly at startup; nothing registers itself.

use super::TpcChannelMap;
use super::pd2hd::Pd2hdChannelMap;
use crate::config::ChannelMapConfig;
use crate::constants::pd2hd;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Builds a channel map from configuration
pub type ChannelMapFactory = fn(&ChannelMapConfig) -> Result<Box<dyn TpcChannelMap>>;

/// Name-keyed set of channel-map factories
#[derive(Clone, Default)]
pub struct ChannelMapRegistry {
    factories: BTreeMap<String, ChannelMapFactory>,
}

impl ChannelMapRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every channel map shipped with this crate
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(pd2hd::NAME, make_pd2hd);
        registry
    }

    /// Register a factory, returning the one it replaces
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: ChannelMapFactory,
    ) -> Option<ChannelMapFactory> {
        let name = name.into();
        let previous = self.factories.insert(name.clone(), factory);
        if previous.is_some() {
            warn!("Channel map '{}' registered twice, replacing", name);
        }
        previous
    }

    /// Check whether a variant is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered variant names in ascending order
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build the named channel map
    ///
    /// # Errors
    /// * Returns `Error::UnknownChannelMap` if the name is not registered
    /// * Propagates any construction error of the variant
    pub fn make(&self, name: &str, config: &ChannelMapConfig) -> Result<Box<dyn TpcChannelMap>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::unknown_channel_map(name))?;
        debug!("Building channel map '{}'", name);
        factory(config)
    }

    /// Build the channel map named in the configuration
    pub fn make_from_config(&self, config: &ChannelMapConfig) -> Result<Box<dyn TpcChannelMap>> {
        self.make(&config.detector, config)
    }
}

impl fmt::Debug for ChannelMapRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelMapRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Build the configured channel map using the built-in registry
pub fn make_channel_map(config: &ChannelMapConfig) -> Result<Box<dyn TpcChannelMap>> {
    ChannelMapRegistry::with_builtin().make_from_config(config)
}

fn make_pd2hd(config: &ChannelMapConfig) -> Result<Box<dyn TpcChannelMap>> {
    Ok(Box::new(Pd2hdChannelMap::new(config)?))
}
