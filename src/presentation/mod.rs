//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// Navigation adapter feeding the main event loop.
pub mod navigation;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use navigation::ChannelNavigator;
pub use ui::App;
