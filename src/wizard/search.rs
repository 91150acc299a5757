//! Search filtering for searchable multi-choice steps.

/// Narrow `options` to those containing `query` case-insensitively,
/// preserving catalog order.
///
/// Pure view logic: filtering never touches the selection buffer, so an
/// option that was toggled in and later filtered out of view stays selected
/// until explicitly toggled off.
pub fn filter_options<'a>(options: &'a [String], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return options.iter().map(String::as_str).collect();
    }
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|o| o.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}
