//! Business logic services

pub mod auth;
pub mod catalog;
pub mod circulation;
pub mod members;
pub mod reports;

use std::sync::Arc;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub members: members::MembersService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> AppResult<Self> {
        Self::with_clock(repository, auth_config, Arc::new(circulation::SystemClock))
    }

    /// Create all services reading "today" from `clock`; due dates, overdue
    /// flags and report day counts all follow it
    pub fn with_clock(
        repository: Repository,
        auth_config: AuthConfig,
        clock: Arc<dyn circulation::Clock>,
    ) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(auth_config)?,
            catalog: catalog::CatalogService::new(repository.clone(), clock.clone()),
            circulation: circulation::CirculationService::new(repository.clone(), clock.clone()),
            members: members::MembersService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone(), clock),
            repository,
        })
    }

    /// Check that the database answers
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
