//! Functionality shared by latinum binaries.

pub mod logging;
