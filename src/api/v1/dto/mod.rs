pub mod reset;
pub mod sessions;
pub mod users;
