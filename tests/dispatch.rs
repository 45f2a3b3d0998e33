//! Verb dispatch against resource handlers.

use std::cell::RefCell;
use std::rc::Rc;

use rusty_claims::rest::{Capabilities, Environment, Job, Registration, ResourceHandler, Verb};
use rusty_claims::DispatchError;

struct TestJob {
    method: &'static str,
}

impl Job for TestJob {
    fn method(&self) -> &str {
        self.method
    }

    fn domain(&self) -> &str {
        "api"
    }

    fn resource(&self) -> &str {
        "tokens"
    }
}

struct RecordingHandler {
    id: String,
    verbs: Vec<Verb>,
    calls: Rc<RefCell<Vec<Verb>>>,
    initialized: bool,
}

impl RecordingHandler {
    fn new(verbs: &[Verb], calls: Rc<RefCell<Vec<Verb>>>) -> Self {
        RecordingHandler {
            id: "recorder".to_string(),
            verbs: verbs.to_vec(),
            calls,
            initialized: false,
        }
    }
}

impl ResourceHandler for RecordingHandler {
    fn id(&self) -> &str {
        &self.id
    }

    fn init(&mut self, env: &Environment, domain: &str, resource: &str) -> Result<(), DispatchError> {
        if env.value("fail").is_some() {
            return Err(DispatchError::Init {
                id: self.id.clone(),
                reason: format!("refusing {}/{}", domain, resource),
            });
        }
        self.initialized = true;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::of(&self.verbs)
    }

    fn handle(&self, verb: Verb, _job: &dyn Job) -> Result<bool, DispatchError> {
        assert!(self.initialized);
        self.calls.borrow_mut().push(verb);
        Ok(true)
    }
}

fn register(verbs: &[Verb]) -> (Registration, Rc<RefCell<Vec<Verb>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let registration = Registration::new(
        Box::new(RecordingHandler::new(verbs, Rc::clone(&calls))),
        &Environment::new("test"),
        "api",
        "tokens",
    )
    .unwrap();
    (registration, calls)
}

#[test]
fn test_primary_verb_wins_over_alias() {
    let (registration, calls) = register(&[Verb::Get, Verb::Read]);
    assert_eq!(registration.handle_job(&TestJob { method: "GET" }), Ok(true));
    assert_eq!(*calls.borrow(), vec![Verb::Get]);
}

#[test]
fn test_alias_is_used_when_primary_missing() {
    let (registration, calls) =
        register(&[Verb::Read, Verb::Update, Verb::Create, Verb::Modify, Verb::Info]);
    for method in ["GET", "PUT", "POST", "PATCH", "OPTIONS"] {
        assert_eq!(registration.handle_job(&TestJob { method }), Ok(true), "{}", method);
    }
    assert_eq!(
        *calls.borrow(),
        vec![Verb::Read, Verb::Update, Verb::Create, Verb::Modify, Verb::Info]
    );
}

#[test]
fn test_missing_verb_reports_handler_identity() {
    let (registration, calls) = register(&[Verb::Get]);
    for method in ["HEAD", "DELETE", "PUT"] {
        let err = registration.handle_job(&TestJob { method }).unwrap_err();
        assert_eq!(
            err,
            DispatchError::NoHandler {
                method: method.to_string(),
                id: "recorder@api/tokens".to_string(),
            }
        );
    }
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_unknown_method() {
    let (registration, _) = register(&[Verb::Get]);
    let err = registration.handle_job(&TestJob { method: "TRACE" }).unwrap_err();
    assert_eq!(err, DispatchError::MethodNotSupported("TRACE".to_string()));
}

#[test]
fn test_capabilities_are_resolved_at_registration() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut handler = RecordingHandler::new(&[Verb::Head], Rc::clone(&calls));
    handler.init(&Environment::new("test"), "api", "tokens").unwrap();

    let err = rusty_claims::rest::handle_job(&handler, Capabilities::none(), &TestJob { method: "HEAD" })
        .unwrap_err();
    assert!(matches!(err, DispatchError::NoHandler { .. }));

    let caps = handler.capabilities();
    assert_eq!(rusty_claims::rest::handle_job(&handler, caps, &TestJob { method: "HEAD" }), Ok(true));
    assert_eq!(*calls.borrow(), vec![Verb::Head]);
}

#[test]
fn test_failed_init_prevents_registration() {
    let env = Environment::new("test").with_value("fail", "yes");
    let result = Registration::new(
        Box::new(RecordingHandler::new(&[Verb::Get], Rc::default())),
        &env,
        "api",
        "tokens",
    );
    assert!(matches!(result, Err(DispatchError::Init { .. })));
}
