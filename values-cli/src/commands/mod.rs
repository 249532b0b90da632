//! Command implementations for valuesctl

pub mod db_check;
pub mod serve;

pub use db_check::run_db_check;
pub use serve::run_serve;
