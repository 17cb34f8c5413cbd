//! # Dependency Injection
//!
//! Builds the HTTP adapter, the alert presenter and the session, and hands out
//! use cases wired to them. Assembly only: no decisions are made here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use bi_app::usecases::upload_flow::UploadFlowOrchestrator;
use bi_app::{Login, Register, SchoolSelectionOrchestrator, SessionStore};
use bi_core::config::AppConfig;
use bi_core::ports::{AlertPort, AuthApiPort, SchoolApiPort};
use bi_infra::HttpBackend;

use crate::adapters::TerminalAlerts;

/// Everything a command needs, built once per process.
pub struct AppRuntime {
    config: AppConfig,
    session: SessionStore,
    school_api: Arc<dyn SchoolApiPort>,
    auth_api: Arc<dyn AuthApiPort>,
    alerts: Arc<dyn AlertPort>,
}

impl AppRuntime {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let alerts: Arc<dyn AlertPort> = Arc::new(TerminalAlerts::stderr());
        Self::with_alerts(config, alerts)
    }

    pub fn with_alerts(config: AppConfig, alerts: Arc<dyn AlertPort>) -> anyhow::Result<Self> {
        let timeout = match config.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let backend = Arc::new(
            HttpBackend::new(config.api_base_url.clone(), timeout)
                .context("Failed to build HTTP backend")?,
        );
        info!(base_url = %backend.base_url(), ?timeout, "backend configured");

        Ok(Self {
            config,
            session: SessionStore::new(),
            school_api: backend.clone(),
            auth_api: backend,
            alerts,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn login(&self) -> Login {
        Login::new(self.auth_api.clone(), self.session.clone(), self.alerts.clone())
    }

    pub fn register(&self) -> Register {
        Register::new(self.auth_api.clone(), self.session.clone(), self.alerts.clone())
    }

    pub fn school_selection(&self) -> SchoolSelectionOrchestrator {
        SchoolSelectionOrchestrator::new(self.auth_api.clone(), self.session.clone())
    }

    pub fn upload_flow(&self) -> UploadFlowOrchestrator {
        UploadFlowOrchestrator::new(
            self.school_api.clone(),
            self.alerts.clone(),
            self.session.clone(),
            self.config.selection_limit,
        )
    }
}
