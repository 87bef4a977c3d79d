/// Appends a field or name segment to a breadcrumb: `fodo_cell` + `line` -> `fodo_cell.line`.
pub fn child(location: &str, segment: &str) -> String {
    if location.is_empty() {
        segment.to_string()
    } else {
        format!("{location}.{segment}")
    }
}

/// Appends a sequence index to a breadcrumb: `fodo_cell.line` + 2 -> `fodo_cell.line[2]`.
pub fn index(location: &str, i: usize) -> String {
    format!("{location}[{i}]")
}

/// The breadcrumb used for errors at the top of a document.
pub fn or_root(location: &str) -> String {
    if location.is_empty() {
        "document root".to_string()
    } else {
        location.to_string()
    }
}

/// Renders a list of allowed keys the way error messages quote them.
pub fn quoted_list<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = keys.into_iter().map(|k| format!("'{k}'")).collect();
    format!("[{}]", quoted.join(", "))
}
