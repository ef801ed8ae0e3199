pub mod camera;
pub mod pointers;
pub mod rotation;
pub mod scale;
pub mod touch;
pub mod view;

pub use camera::Camera;
pub use view::ViewState;
