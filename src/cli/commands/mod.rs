//! CLI command implementations

pub mod convert;
pub mod demo;
pub mod init;
pub mod validate;
