pub mod clubs;
pub mod users;
