//! Shared enforcer handle with atomic reconfiguration.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::EnforcerConfig;
use crate::enforcer::FilterEnforcer;
use crate::error::{ConfigError, EnforcementError};
use crate::predicate::Predicate;

/// A cloneable handle to the enforcer currently in service.
///
/// Readers take a snapshot `Arc` and release the lock before checking, so a
/// reload never waits on in-flight checks and a check never observes a
/// half-built policy set. A reload that fails leaves the previous enforcer
/// in place.
#[derive(Debug, Clone, Default)]
pub struct SharedFilterEnforcer {
    current: Arc<RwLock<Arc<FilterEnforcer>>>,
}

impl SharedFilterEnforcer {
    /// Wrap an enforcer.
    pub fn new(enforcer: FilterEnforcer) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(enforcer))),
        }
    }

    /// Build from configuration.
    pub fn from_config(config: &EnforcerConfig) -> Result<Self, ConfigError> {
        FilterEnforcer::from_config(config).map(Self::new)
    }

    /// Snapshot of the enforcer in service.
    pub fn current(&self) -> Arc<FilterEnforcer> {
        Arc::clone(&*self.current.read())
    }

    /// Check a predicate against the enforcer in service.
    pub fn check(&self, collection: &str, filter: &Predicate) -> Result<(), EnforcementError> {
        self.current().check(collection, filter)
    }

    /// Replace the enforcer in service.
    pub fn replace(&self, enforcer: FilterEnforcer) {
        let collections = enforcer.registry().len();
        *self.current.write() = Arc::new(enforcer);
        tracing::info!(collections, "required-filter policies replaced");
    }

    /// Rebuild from configuration and swap it in.
    ///
    /// On error the enforcer in service is unchanged.
    pub fn reload(&self, config: &EnforcerConfig) -> Result<(), ConfigError> {
        match FilterEnforcer::from_config(config) {
            Ok(enforcer) => {
                self.replace(enforcer);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "required-filter reload rejected, keeping current policies");
                Err(err)
            }
        }
    }
}
