//! GitHub Actions workflow commands and step outputs.
//!
//! Annotations go to stdout, where the runner picks them up. Step outputs are
//! appended to the file named by `GITHUB_OUTPUT` when it is set.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

pub fn warning(message: &str) {
    println!("{}", command("warning", message));
}

pub fn error(message: &str) {
    println!("{}", command("error", message));
}

/// Format a workflow command line such as `::warning::text`.
pub fn command(name: &str, message: &str) -> String {
    format!("::{name}::{}", escape_data(message))
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Append `name=value` pairs to a step output file.
pub fn write_outputs(path: &Path, outputs: &[(&str, String)]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open step output file {}", path.display()))?;
    for (name, value) in outputs {
        writeln!(file, "{name}={value}")
            .with_context(|| format!("write step output {name}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn command_escapes_newlines_and_percent() {
        assert_eq!(
            command("error", "100% broken\nsecond line"),
            "::error::100%25 broken%0Asecond line"
        );
    }

    #[test]
    fn outputs_append_to_existing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("output");
        fs::write(&path, "previous=1\n").expect("seed");

        write_outputs(&path, &[("lint-issues", "3".to_string())]).expect("write");
        write_outputs(&path, &[("safe-fixes", "0".to_string())]).expect("write");

        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "previous=1\nlint-issues=3\nsafe-fixes=0\n");
    }
}
