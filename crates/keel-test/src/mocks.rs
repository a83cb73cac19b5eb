//! Recording mocks for the host and component contracts.
//!
//! Every mock writes to a shared [`EventLog`] so a test can assert on the
//! exact interleaving of host and component lifecycle calls.

use std::sync::{Arc, Mutex};

use keel_component::{
    Capability, Component, ComponentDef, ComponentError, ComponentResult, Host, HostDescriptor,
    RequestServer,
};
use keel_config::Config;

/// Shared, ordered record of lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&self, event: impl Into<String>) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.into());
        }
    }

    /// Snapshot of all recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Index of the first occurrence of `event`.
    #[must_use]
    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    /// Number of times `event` was recorded.
    #[must_use]
    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().map(|g| g.is_empty()).unwrap_or(true)
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.events.lock() {
            guard.clear();
        }
    }
}

/// Host lifecycle phase, used to inject failures into [`MockHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    /// `init_server`.
    InitServer,
    /// `init_request_context`.
    RequestContext,
    /// `start_server`.
    StartServer,
}

/// Mock implementation of the [`Host`] trait.
///
/// Records `host:init_server`, `host:init_request_context` and
/// `host:start_server`.
#[derive(Debug, Clone)]
pub struct MockHost {
    descriptor: HostDescriptor,
    log: EventLog,
    serves_requests: bool,
    fail_on: Option<HostPhase>,
    last_config: Arc<Mutex<Option<Config>>>,
}

impl MockHost {
    /// Create a host named `name` that provides nothing.
    #[must_use]
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            descriptor: HostDescriptor::new(name),
            log,
            serves_requests: false,
            fail_on: None,
            last_config: Arc::new(Mutex::new(None)),
        }
    }

    /// Declare a natively provided capability.
    ///
    /// # Panics
    ///
    /// Panics if `capability` is not a valid capability id.
    #[must_use]
    pub fn providing(mut self, capability: &str) -> Self {
        let capability = Capability::new(capability).expect("valid capability id");
        self.descriptor = self.descriptor.with_capability(capability);
        self
    }

    /// Expose a request-serving facet.
    #[must_use]
    pub fn serving_requests(mut self) -> Self {
        self.serves_requests = true;
        self
    }

    /// Fail during the given phase.
    #[must_use]
    pub fn failing_on(mut self, phase: HostPhase) -> Self {
        self.fail_on = Some(phase);
        self
    }

    /// The configuration passed to the last `init_server` call.
    #[must_use]
    pub fn last_config(&self) -> Option<Config> {
        self.last_config.lock().ok().and_then(|g| g.clone())
    }

    fn enter(&self, phase: HostPhase, event: &str) -> ComponentResult<()> {
        self.log.record(event);
        if self.fail_on == Some(phase) {
            return Err(ComponentError::Lifecycle(format!("mock failure in {event}")));
        }
        Ok(())
    }
}

impl Host for MockHost {
    fn descriptor(&self) -> HostDescriptor {
        self.descriptor.clone()
    }

    fn init_server(&mut self, config: &Config) -> ComponentResult<()> {
        if let Ok(mut guard) = self.last_config.lock() {
            *guard = Some(config.clone());
        }
        self.enter(HostPhase::InitServer, "host:init_server")
    }

    fn request_server(&mut self) -> Option<&mut dyn RequestServer> {
        if self.serves_requests {
            Some(self as &mut dyn RequestServer)
        } else {
            None
        }
    }

    fn start_server(&mut self) -> ComponentResult<()> {
        self.enter(HostPhase::StartServer, "host:start_server")
    }
}

impl RequestServer for MockHost {
    fn init_request_context(&mut self) -> ComponentResult<()> {
        self.enter(HostPhase::RequestContext, "host:init_request_context")
    }
}

/// Mock implementation of the [`Component`] trait.
///
/// Records `<name>:init` and `<name>:load`, where `<name>` is the
/// implementation name from the metadata.
#[derive(Debug, Clone)]
pub struct MockComponent {
    def: Option<ComponentDef>,
    label: String,
    log: EventLog,
    fail_init: bool,
    fail_load: bool,
}

impl MockComponent {
    /// Create a component declaring `def`.
    #[must_use]
    pub fn new(def: ComponentDef, log: EventLog) -> Self {
        Self {
            label: def.name.clone(),
            def: Some(def),
            log,
            fail_init: false,
            fail_load: false,
        }
    }

    /// Create an object that declares no component metadata.
    #[must_use]
    pub fn without_metadata(label: &str, log: EventLog) -> Self {
        Self {
            def: None,
            label: label.to_owned(),
            log,
            fail_init: false,
            fail_load: false,
        }
    }

    /// Fail in `init`.
    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Fail in `load`.
    #[must_use]
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Box the mock for a discovery list.
    #[must_use]
    pub fn boxed(self) -> Box<dyn Component> {
        Box::new(self)
    }
}

impl Component for MockComponent {
    fn metadata(&self) -> Option<ComponentDef> {
        self.def.clone()
    }

    fn init(&mut self, _host: &dyn Host, _config: &Config) -> ComponentResult<()> {
        self.log.record(format!("{}:init", self.label));
        if self.fail_init {
            return Err(ComponentError::Lifecycle(format!("{} refused to init", self.label)));
        }
        Ok(())
    }

    fn load(&mut self) -> ComponentResult<()> {
        self.log.record(format!("{}:load", self.label));
        if self.fail_load {
            return Err(ComponentError::Lifecycle(format!("{} refused to load", self.label)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::component_def;

    #[test]
    fn test_event_log_is_shared() {
        let log = EventLog::new();
        let mut component = MockComponent::new(component_def("cdi", "Weld"), log.clone());

        component.load().unwrap();
        assert_eq!(log.events(), vec!["Weld:load"]);
        assert_eq!(log.count("Weld:load"), 1);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_host_failure_injection() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone()).failing_on(HostPhase::StartServer);

        assert!(host.init_server(&Config::default()).is_ok());
        assert!(host.start_server().is_err());
        assert_eq!(log.events(), vec!["host:init_server", "host:start_server"]);
        assert_eq!(host.last_config(), Some(Config::default()));
    }

    #[test]
    fn test_request_server_only_when_enabled() {
        let log = EventLog::new();
        assert!(MockHost::new("Jetty", log.clone()).request_server().is_none());

        let mut host = MockHost::new("Jetty", log.clone()).serving_requests();
        host.request_server().unwrap().init_request_context().unwrap();
        assert_eq!(log.position("host:init_request_context"), Some(0));
    }
}
