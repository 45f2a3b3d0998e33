// src/types/mod.rs
pub mod claims;
pub mod coerce;
pub mod output;
pub mod reserved;

pub use claims::Claims;
pub use output::{Output, ReservedClaim};
