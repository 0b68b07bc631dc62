//! Browser host for the gift gallery
//!
//! The page fetches gift lists and draws; this crate keeps the bubbles
//! moving and tells the page where they are.

mod log;

pub mod gallery;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use gallery::{instance_floats, BubbleInstance, Gallery};
