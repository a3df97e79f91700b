//! Version discovery from HTTP directory listings (EBI, NCBI, Ensembl, EVS mirrors).

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Collect capture group 1 of `entry` for every `href` in an index page.
///
/// `entry` is matched against the link's last path segment, anchored at both ends.
pub(crate) fn versions_in_listing(html: &str, entry: &str) -> Result<Vec<String>> {
    let href = Regex::new(r#"(?i)href\s*=\s*"([^"]+)""#)
        .map_err(|e| Error::internal_unexpected(e.to_string()))?;
    let entry = Regex::new(&format!("^(?:{})$", entry))
        .map_err(|e| Error::internal_unexpected(format!("invalid listing pattern: {}", e)))?;

    let found: BTreeSet<String> = href
        .captures_iter(html)
        .filter_map(|cap| {
            let link = cap.get(1)?.as_str();
            let name = link.trim_end_matches('/').rsplit('/').next()?;
            let matched = entry.captures(name)?;
            Some(matched.get(1)?.as_str().to_string())
        })
        .collect();

    Ok(found.into_iter().collect())
}

/// Modification date (`YYYY-MM-DD`) printed next to `file_name` in an index page.
pub(crate) fn modified_in_listing(html: &str, file_name: &str) -> Result<Option<String>> {
    let pattern = Regex::new(&format!(
        r#"(?i)href\s*=\s*"(?:[^"]*/)?{}"[^>]*>[^<]*</a>\s*(\d{{4}}-\d{{2}}-\d{{2}})"#,
        regex::escape(file_name)
    ))
    .map_err(|e| Error::internal_unexpected(format!("invalid listing pattern: {}", e)))?;

    Ok(pattern
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string()))
}
