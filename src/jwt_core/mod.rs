pub mod token_inspector;

pub use token_inspector::{IssueRequest, TokenInspector};
