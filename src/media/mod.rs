pub mod binder;
pub mod hls;
pub mod image;
pub mod recovery;
pub mod source;

pub use binder::VideoBinder;
pub use image::ImageLoader;
