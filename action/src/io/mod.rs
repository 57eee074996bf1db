//! I/O adapters for the batch action.

pub mod apply;
pub mod config;
pub mod context;
pub mod discovery;
pub mod fixer;
pub mod process;
pub mod publisher;
pub mod workflow;
