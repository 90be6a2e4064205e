//! Configuration and parameters
//!
//! Constants and bucket settings.

pub mod bucket_params;
pub mod constants;

pub use bucket_params::*;
pub use constants::*;
