use crate::backend::{HostedSearchClient, SearchBackend};
use crate::config::AppConfig;
use crate::credentials::CredentialReport;
use crate::error::Result;
use crate::session::SessionContext;

mod overlay_service;
mod search_service;

pub use search_service::SearchOutcome;

/// Page-level entry point: configuration, session and the optional backend.
///
/// The backend exists only when the credential gate passes. Every operation
/// that needs it degrades to an explicit "no data" result otherwise.
pub struct FactIndex {
    config: AppConfig,
    session: SessionContext,
    backend: Option<Box<dyn SearchBackend>>,
}

impl std::fmt::Debug for FactIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactIndex")
            .field("base_path", &self.config.base_path)
            .field("enabled", &self.backend.is_some())
            .finish_non_exhaustive()
    }
}

impl FactIndex {
    pub fn new(config: AppConfig, session: SessionContext) -> Result<Self> {
        let report = config.search.credential_report();
        let backend = if report.enabled {
            let client = HostedSearchClient::new(config.search.clone(), &session.search_session_id)?;
            Some(Box::new(client) as Box<dyn SearchBackend>)
        } else {
            tracing::debug!(
                app_id_valid = report.app_id_valid,
                api_key_valid = report.api_key_valid,
                "search disabled: credentials missing or malformed"
            );
            None
        };
        Ok(Self {
            config,
            session,
            backend,
        })
    }

    /// Skips the credential gate; the caller supplies the backend.
    #[must_use]
    pub fn with_backend(
        config: AppConfig,
        session: SessionContext,
        backend: Box<dyn SearchBackend>,
    ) -> Self {
        Self {
            config,
            session,
            backend: Some(backend),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    #[must_use]
    pub fn credential_report(&self) -> CredentialReport {
        self.config.search.credential_report()
    }
}
