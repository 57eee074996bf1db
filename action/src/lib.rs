//! Repository-wide batch runner for the DeMarkX Markdown fixer.
//!
//! The action discovers Markdown documents, runs the single-document fixer on
//! each one in turn, aggregates the findings, optionally writes safe fixes
//! back, posts one summary comment on pull requests, and decides whether the
//! CI step passes. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (aggregation, rendering, verdict).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, fixer process, GitHub API).
//!   Behind traits where tests need fakes.
//!
//! [`batch`] coordinates the two to implement a run.

pub mod batch;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
