//! Application state construction.

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Start building an [`AppState`]; finish with [`StateBuilder::build`].
pub fn build_state() -> StateBuilder {
    StateBuilder {
        profile: DbProfile::Prod,
        security: None,
    }
}

pub struct StateBuilder {
    profile: DbProfile,
    security: Option<SecurityConfig>,
}

impl StateBuilder {
    pub fn with_profile(mut self, profile: DbProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security
            .ok_or_else(|| AppError::config("security config is required"))?;

        let url = db_url(self.profile)?;
        let db = connect_db(&url).await?;

        Ok(AppState::new(db, security))
    }
}
