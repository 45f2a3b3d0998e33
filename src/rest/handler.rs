use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::DispatchError;

/// Methods a resource handler may implement. Each HTTP method maps to a
/// primary verb and, for some, a REST-style alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Read,
    Head,
    Put,
    Update,
    Post,
    Create,
    Patch,
    Modify,
    Delete,
    Options,
    Info,
}

impl Verb {
    /// Primary verb and alias for an HTTP method.
    pub fn for_method(method: &str) -> Option<(Verb, Option<Verb>)> {
        let verbs = match method {
            "GET" => (Verb::Get, Some(Verb::Read)),
            "HEAD" => (Verb::Head, None),
            "PUT" => (Verb::Put, Some(Verb::Update)),
            "POST" => (Verb::Post, Some(Verb::Create)),
            "PATCH" => (Verb::Patch, Some(Verb::Modify)),
            "DELETE" => (Verb::Delete, None),
            "OPTIONS" => (Verb::Options, Some(Verb::Info)),
            _ => return None,
        };
        Some(verbs)
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The set of verbs a handler serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities(u16);

impl Capabilities {
    pub const fn none() -> Self {
        Capabilities(0)
    }

    pub fn of(verbs: &[Verb]) -> Self {
        verbs.iter().fold(Self::none(), |caps, &verb| caps.with(verb))
    }

    pub fn with(self, verb: Verb) -> Self {
        Capabilities(self.0 | verb.bit())
    }

    pub fn contains(&self, verb: Verb) -> bool {
        self.0 & verb.bit() != 0
    }
}

/// Deployment scoped context handed to handlers on initialization.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    name: String,
    values: HashMap<String, String>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Environment {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// An inbound request as seen by the dispatcher.
pub trait Job {
    fn method(&self) -> &str;
    fn domain(&self) -> &str;
    fn resource(&self) -> &str;
}

pub trait ResourceHandler {
    /// Deployment id, unique per domain and resource.
    fn id(&self) -> &str;

    fn init(&mut self, env: &Environment, domain: &str, resource: &str) -> Result<(), DispatchError>;

    fn capabilities(&self) -> Capabilities;

    /// Handles a job with one of the verbs from `capabilities`. Returns
    /// whether processing should continue.
    fn handle(&self, verb: Verb, job: &dyn Job) -> Result<bool, DispatchError>;
}

/// An initialized handler together with the verbs it serves, resolved once.
pub struct Registration {
    handler: Box<dyn ResourceHandler>,
    capabilities: Capabilities,
}

impl Registration {
    pub fn new(
        mut handler: Box<dyn ResourceHandler>,
        env: &Environment,
        domain: &str,
        resource: &str,
    ) -> Result<Self, DispatchError> {
        handler.init(env, domain, resource)?;
        let capabilities = handler.capabilities();
        debug!(id = handler.id(), domain, resource, "registered resource handler");
        Ok(Registration {
            handler,
            capabilities,
        })
    }

    pub fn id(&self) -> &str {
        self.handler.id()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn handle_job(&self, job: &dyn Job) -> Result<bool, DispatchError> {
        handle_job(self.handler.as_ref(), self.capabilities, job)
    }
}

/// Dispatches a job to the handler, trying the primary verb of the request
/// method first and its alias second.
pub fn handle_job(
    handler: &dyn ResourceHandler,
    capabilities: Capabilities,
    job: &dyn Job,
) -> Result<bool, DispatchError> {
    let method = job.method();
    let (primary, alias) = Verb::for_method(method)
        .ok_or_else(|| DispatchError::MethodNotSupported(method.to_string()))?;

    let verb = std::iter::once(primary)
        .chain(alias)
        .find(|&verb| capabilities.contains(verb));

    match verb {
        Some(verb) => {
            debug!(id = handler.id(), %verb, "dispatching job");
            handler.handle(verb, job)
        }
        None => {
            let id = format!("{}@{}/{}", handler.id(), job.domain(), job.resource());
            warn!(%id, method, "no handler for method");
            Err(DispatchError::NoHandler {
                method: method.to_string(),
                id,
            })
        }
    }
}
