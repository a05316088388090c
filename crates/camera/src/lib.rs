pub mod handle;
pub mod mercator_camera;
pub mod options;
pub mod recording;
pub mod viewport;

pub use handle::*;
pub use mercator_camera::*;
pub use options::*;
pub use recording::*;
pub use viewport::*;
