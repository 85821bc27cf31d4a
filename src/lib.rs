pub mod action;
pub mod app;
pub mod config;
pub mod delta;
pub mod event;
pub mod format;
pub mod system;
#[cfg(feature = "trace-polls")]
pub mod trace;
pub mod ui;
