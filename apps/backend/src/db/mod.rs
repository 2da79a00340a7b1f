use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// Returns a borrowed reference to the DatabaseConnection if available, or
/// `AppError::DbUnavailable` if the state was built without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_db_without_db_is_unavailable() {
        let app_state = AppState::for_tests_without_db();

        match require_db(&app_state) {
            Err(AppError::DbUnavailable) => {}
            other => panic!("expected DbUnavailable, got {other:?}"),
        }
    }
}
