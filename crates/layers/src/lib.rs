pub mod config;
pub mod events;
pub mod marker_layer;
pub mod markers;
pub mod overlay;
pub mod theme;

pub use config::*;
pub use events::*;
pub use marker_layer::*;
pub use markers::*;
pub use overlay::*;
pub use theme::*;
