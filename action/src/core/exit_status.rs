//! Classification of fixer completion signals.

/// What a fixer exit code means for the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixerExit {
    /// Exit 0: the document is clean.
    Clean,
    /// Exit 1: the fixer ran and reported findings.
    IssuesFound,
    /// Anything else, including termination by signal.
    Failed,
}

impl FixerExit {
    pub fn is_success(self) -> bool {
        !matches!(self, FixerExit::Failed)
    }
}

pub fn classify_fixer_exit(code: Option<i32>) -> FixerExit {
    match code {
        Some(0) => FixerExit::Clean,
        Some(1) => FixerExit::IssuesFound,
        Some(_) | None => FixerExit::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one_are_success() {
        assert_eq!(classify_fixer_exit(Some(0)), FixerExit::Clean);
        assert_eq!(classify_fixer_exit(Some(1)), FixerExit::IssuesFound);
        assert!(classify_fixer_exit(Some(1)).is_success());
    }

    #[test]
    fn other_codes_and_signals_fail() {
        assert_eq!(classify_fixer_exit(Some(2)), FixerExit::Failed);
        assert_eq!(classify_fixer_exit(Some(-1)), FixerExit::Failed);
        assert_eq!(classify_fixer_exit(None), FixerExit::Failed);
    }
}
