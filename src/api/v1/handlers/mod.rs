pub mod profile;
pub mod reset;
pub mod sessions;
pub mod status;
pub mod users;
