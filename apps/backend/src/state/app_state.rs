use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Debug)]
pub struct AppState {
    /// Database connection (absent in some test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including token settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    /// State without a database connection, for tests that never touch the
    /// account store.
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        Self::new_without_db(SecurityConfig::for_tests())
    }
}
