pub mod auth_ctx;

pub use self::auth_ctx::{AuthCtx, AuthCtxExtractor};
