//! Error presentation shared by latinum command line tools.

pub mod errors;
