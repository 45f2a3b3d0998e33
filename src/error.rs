use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("cannot marshal claims to JSON: {0}")]
    JsonMarshalling(#[source] serde_json::Error),
    #[error("cannot unmarshal claims from JSON: {0}")]
    JsonUnmarshalling(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Invalid JWT format")]
    InvalidFormat,
    #[error("Invalid base64url segment: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Signature verification failed: {0}")]
    SignatureVerification(String),
    #[error("Signing failed: {0}")]
    Signing(String),
    #[error(transparent)]
    Claims(#[from] ClaimsError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no {method} handler for {id}")]
    NoHandler { method: String, id: String },
    #[error("method not supported: {0}")]
    MethodNotSupported(String),
    #[error("cannot initialize handler {id}: {reason}")]
    Init { id: String, reason: String },
    #[error("handler {id} failed: {reason}")]
    Handler { id: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Cli(#[from] clap::Error),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidArgument { name: &'static str, value: String },
}
