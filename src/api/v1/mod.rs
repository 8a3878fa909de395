pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use self::routes::routes;
