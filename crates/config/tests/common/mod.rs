//! Shared helpers for hotparam-config integration tests

#![allow(dead_code)]

use hotparam_config::{ParamRecord, SchemaBuilder};
use hotparam_core::{DynamicType, Fixed};
use hotparam_types::{DynBool, DynInt, DynString};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Route tracing output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .try_init();
}

/// Run `f` on its own thread, failing the test instead of hanging when it
/// does not finish within `timeout`.
pub fn within<T: Send + 'static>(timeout: Duration, f: impl FnOnce() -> T + Send + 'static) -> T {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    match rx.recv_timeout(timeout) {
        Ok(value) => value,
        Err(mpsc::RecvTimeoutError::Timeout) => panic!("did not finish within {timeout:?}"),
        Err(mpsc::RecvTimeoutError::Disconnected) => panic!("worker thread panicked"),
    }
}

/// Writer whose content can be read back after being moved into the loader
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A small service configuration: one required static parameter, one
/// optional static parameter, two dynamic ones and a database set.
pub struct ServiceParams {
    pub server: Fixed<String>,
    pub port: Fixed<u16>,
    pub greeting: Arc<DynString>,
    pub verbose: Arc<DynBool>,
    pub db_host: Fixed<String>,
    pub db_password: Fixed<String>,
    pub db_pool: Arc<DynInt<u8>>,
}

impl ServiceParams {
    pub fn new() -> Self {
        Self::with_greeting(DynString::new("hello"))
    }

    pub fn with_greeting(greeting: DynString) -> Self {
        Self {
            server: Fixed::default(),
            port: Fixed::new(8080),
            greeting: Arc::new(greeting),
            verbose: Arc::new(DynBool::new(false)),
            db_host: Fixed::new("localhost".to_string()),
            db_password: Fixed::default(),
            db_pool: Arc::new(DynInt::new(4)),
        }
    }

    pub fn greeting(&self) -> String {
        self.greeting.value()
    }
}

impl ParamRecord for ServiceParams {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema
            .param("server", &self.server)
            .describe("Server to connect to");
        schema.param("port", &self.port).optional();
        schema.dynamic("greeting", &self.greeting).optional();
        schema.dynamic("verbose", &self.verbose).optional();
        schema.set("db", "Database connection", |set| {
            set.param("host", &self.db_host).optional();
            set.param("password", &self.db_password).optional().secret();
            set.dynamic("pool", &self.db_pool).optional();
        });
    }
}
