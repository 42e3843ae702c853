//! CLI commands for simblog

pub mod create;
pub mod dispatch;
pub mod list;
pub mod seed;
pub mod show;
