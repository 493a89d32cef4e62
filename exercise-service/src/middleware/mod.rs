pub mod auth;
pub mod blank_fields;
pub mod json;

pub use auth::{AccessTokenClaims, AuthUser, TokenVerifier};
pub use blank_fields::{remove_blank_fields, NonBlankJson};
pub use json::AppJson;
