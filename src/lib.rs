//! Claims of JSON Web Token payloads with typed access to the registered
//! claim names, plus the verb dispatch used by REST resource handlers.

pub mod config;
pub mod error;
pub mod helpers;
pub mod jwt_core;
pub mod rest;
pub mod types;

pub use error::{ClaimsError, DispatchError};
pub use types::Claims;
