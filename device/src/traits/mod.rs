pub mod led;
pub mod platform;
pub mod serial;
pub mod thread;
