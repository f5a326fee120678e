//! Face detection and annotation pipeline.

pub mod annotation;
pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod shared;
