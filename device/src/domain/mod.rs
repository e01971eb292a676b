pub mod color;
pub mod dataset;
pub mod mode;
pub mod role;

pub use color::Rgb8;
pub use dataset::{Component, Dataset};
pub use mode::DeviceMode;
pub use role::NetworkRole;
