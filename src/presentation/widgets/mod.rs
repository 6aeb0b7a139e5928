//! Reusable widgets.

mod footer_bar;
mod input;

pub use footer_bar::FooterBar;
pub use input::TextInput;
