pub mod analyze;
pub mod checkoff;
pub mod config;
pub mod habit;

mod common;
