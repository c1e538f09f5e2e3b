//! pixelpolicy - image transformation policies as flat attributes
//!
//! This library crate exposes configuration and the activation layer for
//! integration testing. The codecs live in `pixelpolicy-model` and
//! `pixelpolicy-flat`, re-exported here for convenience.

pub mod activation;
pub mod config;

pub use pixelpolicy_flat as flat;
pub use pixelpolicy_model as model;
