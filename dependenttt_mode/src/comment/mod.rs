//! Line comment toggling

fn split_indent(line: &str) -> (&str, &str) {
    let body = line.trim_start_matches(|c: char| c == ' ' || c == '\t');
    line.split_at(line.len() - body.len())
}

/// Whether the line, after its indentation, starts with `marker`
pub fn is_commented(line: &str, marker: &str) -> bool {
    !marker.is_empty() && split_indent(line).1.starts_with(marker)
}

/// Comment or uncomment one line.
///
/// Commenting inserts `marker` and a space after the indentation;
/// uncommenting removes the marker and at most one following space.
/// Blank lines are returned unchanged.
pub fn toggle_line_comment(line: &str, marker: &str) -> String {
    let (indent, body) = split_indent(line);
    if body.trim().is_empty() || marker.is_empty() {
        return line.to_string();
    }

    match body.strip_prefix(marker) {
        Some(rest) => {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            format!("{}{}", indent, rest)
        }
        None => format!("{}{} {}", indent, marker, body),
    }
}

/// Toggle a block of lines the way editors do: if every non-blank line
/// is commented, uncomment them all; otherwise comment them all.
pub fn toggle_line_comments<'a, I>(lines: I, marker: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lines: Vec<&str> = lines.into_iter().collect();
    let all_commented = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| is_commented(line, marker));

    lines
        .into_iter()
        .map(|line| {
            if line.trim().is_empty() || is_commented(line, marker) != all_commented {
                line.to_string()
            } else {
                toggle_line_comment(line, marker)
            }
        })
        .collect()
}
