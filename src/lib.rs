pub mod api;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod explain;
pub mod gestures;
pub mod landmarks;
pub mod loader;
pub mod response;
pub mod simulate;
// cmd and reports belong to the binary (main.rs).

pub use error::{SfResult, SignForgeError};
