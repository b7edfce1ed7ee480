/// Strips leading and trailing whitespace from `line` in place.
///
/// The retained text is moved to the front of the existing buffer, so no
/// allocation happens. An empty or all-whitespace line becomes `""`.
pub fn trim_white(line: &mut String) -> &str {
    let end = line.trim_end().len();
    line.truncate(end);

    let start = end - line.trim_start().len();
    if start > 0 {
        line.drain(..start);
    }

    line.as_str()
}

/// Like [`trim_white`], but passes an absent line through untouched.
pub fn trim_white_opt(line: Option<&mut String>) -> Option<&str> {
    line.map(trim_white)
}
