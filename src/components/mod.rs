pub mod app;
pub mod disk_view;

pub use app::App;
