//! Navigation port definition.

use crate::domain::routes::Route;

/// Port for the navigation collaborator: given a route key, causes the
/// corresponding view to render. Fire-and-forget.
pub trait NavigationPort: Send + Sync {
    /// Requests that the view for `route` be rendered.
    fn navigate(&self, route: Route);
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Mock navigation recording requested routes.
    pub struct MockNavigation {
        routes: Mutex<Vec<Route>>,
    }

    impl MockNavigation {
        /// Creates a recorder with no navigations.
        pub fn new() -> Self {
            Self {
                routes: Mutex::new(Vec::new()),
            }
        }

        /// Returns the recorded routes in order.
        pub fn recorded(&self) -> Vec<Route> {
            self.routes.lock().unwrap().clone()
        }
    }

    impl Default for MockNavigation {
        fn default() -> Self {
            Self::new()
        }
    }

    impl NavigationPort for MockNavigation {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }
}
