//! JSON extraction from free-form model replies.
//!
//! Models wrap the requested object in prose or code fences. The extractor
//! scans every `{` in the reply, finds its matching `}` while honouring JSON
//! string literals, and returns the first candidate that deserialises.

use crate::planning::ports::{OracleError, OracleResult};
use serde::de::DeserializeOwned;

/// Parses the first JSON object in `reply` that deserialises as `T`.
///
/// # Errors
///
/// Returns [`OracleError::Malformed`] when no candidate object parses.
pub(crate) fn parse_reply<T: DeserializeOwned>(reply: &str) -> OracleResult<T> {
    let mut last_error = None;
    for (start, _) in reply.match_indices('{') {
        let Some(candidate) = reply.get(start..).and_then(balanced_object) else {
            continue;
        };
        match serde_json::from_str(candidate) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => last_error = Some(err),
        }
    }
    Err(last_error.map_or_else(
        || OracleError::malformed("reply contains no JSON object"),
        |err| OracleError::malformed(format!("reply is not the expected JSON: {err}")),
    ))
}

/// Returns the object starting at the head of `text`, braces balanced.
fn balanced_object(text: &str) -> Option<&str> {
    let end = matching_brace(text)?;
    text.get(..=end)
}

fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
