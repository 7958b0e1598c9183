use regex::Regex;

use super::client::{ApiError, Result};
use super::models::SiteInfo;

/// Locate the `window.siteInfo = {...}` assignment in `html` and decode it.
pub fn extract_site_info(html: &str) -> Result<SiteInfo> {
    let literal = find_site_info_literal(html).ok_or(ApiError::SiteInfoNotFound)?;
    serde_json::from_str(literal)
        .map_err(|e| ApiError::InvalidResponse(format!("siteInfo is not valid JSON: {}", e)))
}

fn find_site_info_literal(html: &str) -> Option<&str> {
    // Stops at the opening brace; the object itself is delimited by the scanner
    let re = Regex::new(r"window\.siteInfo\s*=\s*\{").ok()?;
    let m = re.find(html)?;
    let start = m.end() - 1;
    let len = object_literal_len(&html[start..])?;
    Some(&html[start..start + len])
}

/// Byte length of the brace-delimited object at the start of `text`,
/// or `None` if it never closes. Braces inside JSON strings are ignored.
fn object_literal_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
