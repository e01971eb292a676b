#[cfg(feature = "std")]
pub mod std;
