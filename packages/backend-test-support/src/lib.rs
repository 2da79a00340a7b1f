//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests, currently
//! unified logging initialization.

pub mod logging;
