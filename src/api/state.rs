//! Application state for the Commission Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{CommissionRuleSet, ConfigLoader};
use crate::models::SourceKind;
use crate::reporting::InMemorySource;

/// Shared application state.
///
/// Contains the loaded commission rule configuration, the persistence
/// backend, and the two sibling report sources. The backend type is
/// generic so deployments can wire any persistence layer that implements
/// the collaborator contracts.
pub struct AppState<B> {
    config: Arc<ConfigLoader>,
    backend: Arc<B>,
    advisor: Arc<InMemorySource>,
    consolidated: Arc<InMemorySource>,
}

// Derived Clone would demand `B: Clone`; the Arcs make that unnecessary.
impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            backend: Arc::clone(&self.backend),
            advisor: Arc::clone(&self.advisor),
            consolidated: Arc::clone(&self.consolidated),
        }
    }
}

impl<B> AppState<B> {
    /// Creates application state with empty advisor and consolidated
    /// sources. Reports still run; those sources contribute no facts.
    pub fn new(config: ConfigLoader, backend: B) -> Self {
        Self::with_sources(
            config,
            backend,
            InMemorySource::empty(SourceKind::Advisor),
            InMemorySource::empty(SourceKind::Consolidated),
        )
    }

    /// Creates application state with explicit advisor and consolidated
    /// report sources.
    pub fn with_sources(
        config: ConfigLoader,
        backend: B,
        advisor: InMemorySource,
        consolidated: InMemorySource,
    ) -> Self {
        Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
            advisor: Arc::new(advisor),
            consolidated: Arc::new(consolidated),
        }
    }

    /// Returns the loaded bracket rule set.
    pub fn rules(&self) -> &CommissionRuleSet {
        self.config.rules()
    }

    /// Returns a reference to the persistence backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a shared handle to the backend for the report layer.
    pub fn backend_handle(&self) -> Arc<B> {
        Arc::clone(&self.backend)
    }

    /// Returns a shared handle to the advisor report source.
    pub fn advisor_source(&self) -> Arc<InMemorySource> {
        Arc::clone(&self.advisor)
    }

    /// Returns a shared handle to the consolidated report source.
    pub fn consolidated_source(&self) -> Arc<InMemorySource> {
        Arc::clone(&self.consolidated)
    }
}
