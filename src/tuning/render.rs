//! cnf fragment rendering and reading

use super::TuningParameters;
use std::fmt::Write;
use thiserror::Error;

/// Section header of the server options group.
pub const SECTION_HEADER: &str = "[mysqld]";

const FOOTER: &str = "\
# Save in a file with extension .cnf in the directory /etc/mysql/conf.d/
# For example: /etc/mysql/conf.d/tuning_db.cnf

# More details about variables in: https://dev.mysql.com/doc/refman/8.0/en/server-system-variables.html
";

/// Errors raised while reading a cnf fragment back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("line {line}: expected 'key=value', got '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: option '{key}' appears before any section header")]
    OutsideSection { line: usize, key: String },
}

/// Render parameters as a `[mysqld]` option file fragment.
///
/// Output is byte-identical for equal inputs.
pub fn render_cnf(params: &TuningParameters) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(SECTION_HEADER);
    out.push_str("\n\n");

    for (key, value) in params.entries() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}={}", key, value);
    }

    out.push('\n');
    out.push_str(FOOTER);
    out
}

/// Read `key=value` option lines back out of a rendered fragment.
///
/// Blank lines and `#` comments are skipped, section headers are accepted
/// but not returned. Pairs come back in file order.
pub fn parse_cnf(text: &str) -> Result<Vec<(String, String)>, RenderError> {
    let mut pairs = Vec::new();
    let mut in_section = false;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_section = true;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| RenderError::MalformedLine {
            line: index + 1,
            content: line.to_string(),
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(RenderError::MalformedLine {
                line: index + 1,
                content: line.to_string(),
            });
        }
        if !in_section {
            return Err(RenderError::OutsideSection {
                line: index + 1,
                key: key.to_string(),
            });
        }

        pairs.push((key.to_string(), value.trim().to_string()));
    }

    Ok(pairs)
}
