pub mod actions;
pub mod config;
pub mod exec;
pub mod validate;
