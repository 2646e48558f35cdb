//! Text helpers shared by the documentation and markup renderers.

/// Indentation unit used by every generated snippet.
pub const INDENT: &str = "  ";

/// Indent every non-empty line of `text` by `level` indentation units.
pub fn indent(text: &str, level: usize) -> String {
    let prefix = INDENT.repeat(level);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove the whitespace prefix shared by all non-empty lines.
pub fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(common..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip a surrounding Markdown code fence (```` ```tsx ... ``` ````) if present.
///
/// Text without a fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the info string (e.g. `tsx`) on the opening line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => "",
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim_end().to_string()
}

/// Escape text for use inside a Markdown table cell.
pub fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", 2), "    a\n\n    b");
    }

    #[test]
    fn test_dedent() {
        assert_eq!(dedent("    <A>\n      <B />\n    </A>"), "<A>\n  <B />\n</A>");
        assert_eq!(dedent("x"), "x");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```tsx\n<Button />\n```"), "<Button />");
        assert_eq!(strip_code_fence("```\n<A />\n<B />\n```\n"), "<A />\n<B />");
        assert_eq!(strip_code_fence("  <Plain />  "), "<Plain />");
    }

    #[test]
    fn test_escape_table_cell() {
        assert_eq!(escape_table_cell("'a' | 'b'"), "'a' \\| 'b'");
        assert_eq!(escape_table_cell("line one\n  line two"), "line one line two");
    }
}
