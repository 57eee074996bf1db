//! Deterministic, pure logic shared by the batch orchestrator.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod batch_state;
pub mod exit_status;
pub mod report;
pub mod selection;
pub mod types;
pub mod verdict;
