// Line filter: drop comments and blank lines, keep the file header

/// Lines at positions `0..HEADER_LINES` are always kept.
const HEADER_LINES: usize = 8;

/// Yields the lines of `content` that the block splitter should see, in order.
///
/// A line starting with `#` or an empty line is dropped unless it is one of
/// the first eight lines of the file. A trailing `\r` is stripped.
pub fn filter_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(pos, line)| *pos < HEADER_LINES || !is_ignorable(line))
        .map(|(_, line)| line)
}

fn is_ignorable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines_survive_but_later_comments_do_not() {
        let content = "\n# header\n\n\n\n\n\n# still header\n\n# gone\ninfo {\n\tcreated=1\n\t}\n";
        let kept: Vec<&str> = filter_lines(content).collect();
        assert_eq!(
            kept,
            vec![
                "",
                "# header",
                "",
                "",
                "",
                "",
                "",
                "# still header",
                "info {",
                "\tcreated=1",
                "\t}",
            ]
        );
    }

    #[test]
    fn strips_carriage_returns() {
        let kept: Vec<&str> = filter_lines("a\r\nb\r\n").collect();
        assert_eq!(kept, vec!["a", "b", ""]);
    }
}
