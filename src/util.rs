//! Small helpers shared by batch-driving callers.

use crate::logging::Logger;

/// Truncates `items` to at most `limit` elements.
///
/// `None` or a limit of zero means no bound. When trimming happens, an
/// inform line records how many items were dropped; when the list already
/// fits, nothing is logged.
#[must_use]
pub fn trim_to_limit<T>(mut items: Vec<T>, limit: Option<usize>, logger: &Logger) -> Vec<T> {
    let Some(limit) = limit.filter(|&limit| limit > 0) else {
        return items;
    };
    if items.len() > limit {
        logger.inform(&format!("trimmed {} items to {limit}", items.len()));
        items.truncate(limit);
    }
    items
}

/// Strips characters not allowed in filenames (`: < > " \ / | ? *`).
#[must_use]
pub fn clean_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ':' | '<' | '>' | '"' | '\\' | '/' | '|' | '?' | '*'))
        .collect()
}
