//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dubbo_actuator::config::ActuatorConfig;
use dubbo_actuator::container::ConfigContainer;
use dubbo_actuator::http::ActuatorServer;
use dubbo_actuator::lifecycle::Shutdown;
use dubbo_actuator::runtime::{ExposedService, LifecycleError, Protocol, Reference, Registry};

/// A runtime component that counts its destroy calls and can be told to fail.
#[allow(dead_code)]
pub struct FakeComponent {
    pub name: String,
    pub destroyed: AtomicUsize,
    pub fail: AtomicBool,
}

#[allow(dead_code)]
impl FakeComponent {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            destroyed: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    pub fn failing(name: impl Into<String>) -> Arc<Self> {
        let component = Self::new(name);
        component.fail.store(true, Ordering::SeqCst);
        component
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn destroy_once(&self) -> Result<(), LifecycleError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LifecycleError::Destroy {
                component: "fake",
                name: self.name.clone(),
                reason: "resource already closed".into(),
            });
        }
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Registry for FakeComponent {
    fn address(&self) -> &str {
        &self.name
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        self.destroy_once()
    }
}

impl Protocol for FakeComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        self.destroy_once()
    }
}

impl ExposedService for FakeComponent {
    fn interface(&self) -> &str {
        &self.name
    }

    fn is_exported(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst) == 0
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        self.destroy_once()
    }
}

impl Reference for FakeComponent {
    fn interface(&self) -> &str {
        &self.name
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        self.destroy_once()
    }
}

/// Fake runtime components registered in a container.
#[allow(dead_code)]
pub struct Runtime {
    pub registries: Vec<Arc<FakeComponent>>,
    pub protocols: Vec<Arc<FakeComponent>>,
    pub services: Vec<Arc<FakeComponent>>,
    pub references: Vec<Arc<FakeComponent>>,
}

/// Register `n` fake components of each kind, without refreshing.
#[allow(dead_code)]
pub fn populate(
    container: &ConfigContainer,
    registries: usize,
    protocols: usize,
    services: usize,
    references: usize,
) -> Runtime {
    let registries: Vec<_> = (0..registries)
        .map(|i| FakeComponent::new(format!("zookeeper://10.0.0.{i}:2181")))
        .collect();
    let protocols: Vec<_> = (0..protocols).map(|i| FakeComponent::new(format!("protocol-{i}"))).collect();
    let services: Vec<_> = (0..services).map(|i| FakeComponent::new(format!("service-{i}"))).collect();
    let references: Vec<_> = (0..references).map(|i| FakeComponent::new(format!("reference-{i}"))).collect();

    for r in &registries {
        container.register_registry(r.clone()).unwrap();
    }
    for p in &protocols {
        container.register_protocol(p.name.clone(), p.clone()).unwrap();
    }
    for s in &services {
        container.register_service(s.name.clone(), s.clone()).unwrap();
    }
    for r in &references {
        container.register_reference(r.name.clone(), r.clone()).unwrap();
    }

    Runtime { registries, protocols, services, references }
}

/// A running actuator server bound to an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the actuator over `container` and wait until it accepts connections.
#[allow(dead_code)]
pub async fn start_server(config: ActuatorConfig, container: Arc<ConfigContainer>) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = ActuatorServer::new(config, container);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    TestServer { addr, shutdown }
}

/// Config with both endpoints enabled and no authentication.
#[allow(dead_code)]
pub fn open_config() -> ActuatorConfig {
    let mut config = ActuatorConfig::default();
    config.management.endpoints.dubboshutdown.enabled = true;
    config
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
