//! Channel-backed navigation adapter.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::ports::NavigationPort;
use crate::domain::routes::Route;

/// Navigation adapter sending route changes into the main event loop.
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    /// Creates the navigator and the receiving end the event loop drains.
    #[must_use]
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl NavigationPort for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(route).is_err() {
            warn!(route = %route, "Navigation requested after the event loop stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_reaches_the_receiver() {
        let (navigator, mut rx) = ChannelNavigator::new();

        navigator.navigate(Route::Bills);
        navigator.navigate(Route::NewBill);

        assert_eq!(rx.recv().await, Some(Route::Bills));
        assert_eq!(rx.recv().await, Some(Route::NewBill));
    }

    #[test]
    fn test_navigate_after_receiver_dropped_does_not_panic() {
        let (navigator, rx) = ChannelNavigator::new();
        drop(rx);

        navigator.navigate(Route::Bills);
    }
}
