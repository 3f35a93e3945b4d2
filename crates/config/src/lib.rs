//! Configuration for latinum.

mod config;

pub use config::*;
