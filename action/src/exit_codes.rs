//! Stable exit codes for the action binary.

/// Run completed and the verdict passed.
pub const OK: i32 = 0;
/// Run completed but the verdict failed (findings over threshold).
pub const FAILED: i32 = 1;
/// Run aborted: invalid configuration, publish failure or another fault.
pub const ERROR: i32 = 2;
