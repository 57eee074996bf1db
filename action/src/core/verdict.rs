//! Pass/fail decision for a finished batch.

use crate::core::batch_state::BatchState;
use crate::core::report::{inferred_line, lint_line};
use crate::core::types::Verdict;

/// Which finding tiers fail the run when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub fail_on_inferred: bool,
    pub fail_on_lint: bool,
}

/// Decide the run verdict from tally lengths alone.
///
/// Safe fixes never affect the outcome, whether or not they were applied.
pub fn decide(thresholds: Thresholds, state: &BatchState) -> Verdict {
    let inferred = state.inferred_fixes.len();
    let lint = state.lint_issues.len();

    let mut reasons = Vec::new();
    if thresholds.fail_on_inferred && inferred > 0 {
        reasons.push(inferred_line(inferred));
    }
    if thresholds.fail_on_lint && lint > 0 {
        reasons.push(lint_line(lint));
    }

    if reasons.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Fail(format!(
            "DeMarkX found issues that require attention: {}",
            reasons.join("; ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::outcome;
    use std::path::PathBuf;

    const STRICT: Thresholds = Thresholds {
        fail_on_inferred: true,
        fail_on_lint: true,
    };

    fn state(safe: &[&str], inferred: &[&str], lint: &[&str]) -> BatchState {
        let mut state = BatchState::new();
        state.record(PathBuf::from("doc.md"), outcome(safe, inferred, lint));
        state
    }

    #[test]
    fn safe_fixes_alone_always_pass() {
        let state = state(&["a", "b", "c", "d", "e"], &[], &[]);
        for fail_on_inferred in [false, true] {
            for fail_on_lint in [false, true] {
                let thresholds = Thresholds {
                    fail_on_inferred,
                    fail_on_lint,
                };
                assert_eq!(decide(thresholds, &state), Verdict::Pass);
            }
        }
    }

    #[test]
    fn inferred_fails_only_when_enabled() {
        let state = state(&[], &["guess"], &[]);
        assert!(decide(Thresholds::default(), &state).is_pass());
        let verdict = decide(
            Thresholds {
                fail_on_inferred: true,
                fail_on_lint: false,
            },
            &state,
        );
        assert_eq!(
            verdict,
            Verdict::Fail(
                "DeMarkX found issues that require attention: 1 inferred fix requires approval"
                    .to_string()
            )
        );
    }

    #[test]
    fn lint_fails_only_when_enabled() {
        let state = state(&[], &[], &["manual", "manual"]);
        let lenient = Thresholds {
            fail_on_inferred: true,
            fail_on_lint: false,
        };
        assert!(decide(lenient, &state).is_pass());
        assert!(!decide(STRICT, &state).is_pass());
    }

    #[test]
    fn reason_lists_every_triggered_threshold() {
        let state = state(&[], &["i1", "i2"], &["l1"]);
        let Verdict::Fail(reason) = decide(STRICT, &state) else {
            panic!("expected failure");
        };
        assert!(reason.contains("2 inferred fixes require approval"));
        assert!(reason.contains("1 lint issue must be fixed manually"));
    }

    #[test]
    fn empty_batch_passes_strict_thresholds() {
        assert!(decide(STRICT, &BatchState::new()).is_pass());
    }
}
