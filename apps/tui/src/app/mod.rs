// App module for data_modules_tui
// Handles viewer state, layout and key handling

pub mod input;
pub mod layout;
pub mod picker;
pub mod state;

pub use input::handle_input;
pub use state::{App, ScrollWatch, SectionView, Viewport};
