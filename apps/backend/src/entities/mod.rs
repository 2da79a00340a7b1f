// Entity files pull in the sea-orm prelude wholesale.
#[allow(clippy::wildcard_imports)]
pub mod clubs;
#[allow(clippy::wildcard_imports)]
pub mod users;
