// crates/snippet_extractor/src/utils/dedent.rs

/// Removes the indentation shared by every non-blank line, counting only `delimiter` characters.
///
/// Whitespace-only lines do not take part in computing the common indent, and
/// lines shorter than it are left alone.
pub fn dedent(text: &str, delimiter: char) -> String {
    let min_indent = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|&c| c == delimiter).count())
        .min()
        .unwrap_or(0);
    if min_indent == 0 {
        return text.to_string();
    }

    let indent = delimiter.to_string().repeat(min_indent);
    text.split('\n')
        .map(|line| line.strip_prefix(indent.as_str()).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders captured region text for publishing.
///
/// Leading blank lines and trailing whitespace are dropped, then tab and
/// space indentation are removed in that order.
pub fn render_snippet(text: &str) -> String {
    let text = text.trim_start_matches(['\n', '\r']);
    let text = text.trim_end_matches([' ', '\n', '\r', '\t']);
    let text = dedent(text, '\t');
    dedent(&text, ' ')
}
