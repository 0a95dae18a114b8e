//! Page routes and the navigation seam.
//!
//! The core never switches pages itself. It asks a `Navigator` to go
//! somewhere and the front end performs the switch on its own loop.

use std::fmt;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A page the front end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Products,
    NewProduct,
    EditProduct(i64),
}

impl Route {
    /// Path form of the route, as used in logs and status lines.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Products => "/products".to_string(),
            Route::NewProduct => "/products/new".to_string(),
            Route::EditProduct(id) => format!("/products/edit/{}", id),
        }
    }

    /// Whether the page behind this route requires a session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Products | Route::NewProduct | Route::EditProduct(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Issues page navigations.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that forwards routes to the front end's event loop.
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiver the UI loop drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        debug!(%route, "Navigation requested");
        if self.tx.send(route).is_err() {
            warn!(%route, "Navigation dropped, UI loop has shut down");
        }
    }
}

/// Navigator that only remembers what was asked of it.
///
/// Used by the CLI commands, where there is no page to switch to, and by
/// tests asserting on redirects.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes issued so far, oldest first.
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        let mut routes = self
            .routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        routes.push(route);
    }
}
