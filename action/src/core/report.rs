//! Deterministic rendering of the batch summary comment.

use crate::core::batch_state::BatchState;

/// Maximum number of individual findings listed in the details section.
pub const DETAIL_LIMIT: usize = 15;

const HEADER: &str = "### DeMarkX Report:";
const DETAILS_HEADER: &str = "#### Details:";
const USAGE_HINT: &str =
    "> [!TIP]\n> Run `demarkx fix <file> -v` locally to see a detailed report.";

/// Render the summary body for a finished batch.
///
/// Output depends only on the tally lengths and record order, so the same
/// state always yields byte-identical text.
pub fn render_report(state: &BatchState) -> String {
    let safe = state.safe_fixes.len();
    let inferred = state.inferred_fixes.len();
    let lint = state.lint_issues.len();

    let mut body = String::new();
    body.push_str(HEADER);
    body.push('\n');
    body.push_str(&format!("✓ {}\n", safe_line(safe)));
    body.push_str(&format!("⚠ {}\n", inferred_line(inferred)));
    body.push_str(&format!("✗ {}\n\n", lint_line(lint)));

    body.push_str(DETAILS_HEADER);
    body.push('\n');
    for issue in state.all_issues().take(DETAIL_LIMIT) {
        body.push_str(&format!("- {}\n", issue.message));
    }

    let total = state.total_issues();
    if total > DETAIL_LIMIT {
        let omitted = total - DETAIL_LIMIT;
        body.push_str(&format!(
            "\n*...and {omitted} more {}.*",
            plural(omitted, "issue", "issues")
        ));
    }

    body.push_str("\n\n");
    body.push_str(USAGE_HINT);
    body
}

pub fn safe_line(count: usize) -> String {
    format!("{count} safe {} applied", plural(count, "fix", "fixes"))
}

pub fn inferred_line(count: usize) -> String {
    format!(
        "{count} inferred {} {} approval",
        plural(count, "fix", "fixes"),
        plural(count, "requires", "require")
    )
}

pub fn lint_line(count: usize) -> String {
    format!(
        "{count} lint {} must be fixed manually",
        plural(count, "issue", "issues")
    )
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::outcome;
    use std::path::PathBuf;

    fn as_refs(messages: &[String]) -> Vec<&str> {
        messages.iter().map(String::as_str).collect()
    }

    fn state_with(safe: usize, inferred: usize, lint: usize) -> BatchState {
        let safe: Vec<String> = (1..=safe).map(|i| format!("safe {i}")).collect();
        let inferred: Vec<String> = (1..=inferred).map(|i| format!("inferred {i}")).collect();
        let lint: Vec<String> = (1..=lint).map(|i| format!("lint {i}")).collect();

        let mut state = BatchState::new();
        state.record(
            PathBuf::from("doc.md"),
            outcome(&as_refs(&safe), &as_refs(&inferred), &as_refs(&lint)),
        );
        state
    }

    #[test]
    fn count_lines_switch_form_at_one() {
        assert_eq!(safe_line(1), "1 safe fix applied");
        assert_eq!(safe_line(5), "5 safe fixes applied");
        assert_eq!(inferred_line(1), "1 inferred fix requires approval");
        assert_eq!(inferred_line(2), "2 inferred fixes require approval");
        assert_eq!(inferred_line(0), "0 inferred fixes require approval");
        assert_eq!(lint_line(1), "1 lint issue must be fixed manually");
        assert_eq!(lint_line(0), "0 lint issues must be fixed manually");
    }

    #[test]
    fn renders_full_body_for_small_batch() {
        let body = render_report(&state_with(2, 1, 0));
        let expected = "### DeMarkX Report:\n\
                        ✓ 2 safe fixes applied\n\
                        ⚠ 1 inferred fix requires approval\n\
                        ✗ 0 lint issues must be fixed manually\n\
                        \n\
                        #### Details:\n\
                        - safe 1\n\
                        - safe 2\n\
                        - inferred 1\n\
                        \n\
                        \n\
                        > [!TIP]\n\
                        > Run `demarkx fix <file> -v` locally to see a detailed report.";
        assert_eq!(body, expected);
    }

    #[test]
    fn details_capped_with_exact_omitted_count() {
        let body = render_report(&state_with(10, 5, 3));
        let listed = body.lines().filter(|line| line.starts_with("- ")).count();
        assert_eq!(listed, DETAIL_LIMIT);
        assert!(body.contains("- inferred 5\n"));
        assert!(!body.contains("- lint 1\n"));
        assert!(body.contains("*...and 3 more issues.*"));
    }

    #[test]
    fn single_omitted_issue_uses_singular() {
        let body = render_report(&state_with(16, 0, 0));
        assert!(body.contains("*...and 1 more issue.*"));
    }

    #[test]
    fn exactly_limit_has_no_omission_note() {
        let body = render_report(&state_with(15, 0, 0));
        assert!(!body.contains("more issue"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let state = state_with(3, 4, 12);
        assert_eq!(render_report(&state), render_report(&state.clone()));
    }

    #[test]
    fn empty_batch_still_ends_with_usage_hint() {
        let body = render_report(&BatchState::new());
        assert!(body.starts_with("### DeMarkX Report:\n✓ 0 safe fixes applied\n"));
        assert!(body.ends_with(USAGE_HINT));
    }
}
