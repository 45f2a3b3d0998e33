pub mod handler;

pub use handler::{handle_job, Capabilities, Environment, Job, Registration, ResourceHandler, Verb};
