pub mod auth;
pub mod response;

pub use auth::{session_guard, AdminSession, LOGIN_PATH};
pub use response::{ApiResponse, ApiResult};
