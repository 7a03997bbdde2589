use std::sync::{Arc, Mutex};

use observable::{Observer, UpdateError};
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::DEBUG).with_test_writer().init(); }

/// Records every event it is notified of
pub struct Watcher<E> {
    notifications: Mutex<Vec<E>>,
}

#[allow(unused)]
impl<E: Clone> Watcher<E> {
    pub fn new() -> Arc<Self> { Arc::new(Self { notifications: Mutex::new(Vec::new()) }) }

    pub fn notifications(&self) -> Vec<E> { self.notifications.lock().unwrap().clone() }
}

impl<E: Clone + Send> Observer<E> for Watcher<E> {
    fn update(&self, event: &E) -> Result<(), UpdateError> {
        self.notifications.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A shared line buffer standing in for stdout, so tests can assert on what observers "printed"
#[derive(Clone, Default)]
pub struct Output(Arc<Mutex<Vec<String>>>);

#[allow(unused)]
impl Output {
    pub fn print(&self, line: impl Into<String>) { self.0.lock().unwrap().push(line.into()) }

    /// Returns and clears everything printed so far
    pub fn take(&self) -> Vec<String> { self.0.lock().unwrap().drain(..).collect() }
}
