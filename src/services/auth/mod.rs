pub mod credentials;
pub mod password;
pub mod policy;
pub mod service;
