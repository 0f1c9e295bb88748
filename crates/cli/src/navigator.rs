//! Terminal stand-in for page navigation

use informado_core::SessionNavigator;
use informado_domain::Destination;
use parking_lot::Mutex;
use tracing::info;

/// Logs where a browser client would have been sent and remembers the
/// latest destination so the command can report it.
#[derive(Debug, Default)]
pub struct LoggingNavigator {
    last: Mutex<Option<Destination>>,
}

impl LoggingNavigator {
    pub fn last(&self) -> Option<Destination> {
        *self.last.lock()
    }
}

impl SessionNavigator for LoggingNavigator {
    fn navigate(&self, destination: Destination) {
        info!(page = %destination, "Navigating");
        *self.last.lock() = Some(destination);
    }
}
