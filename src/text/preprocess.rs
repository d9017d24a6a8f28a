//! Turns physical lines into logical lines.

use crate::error::ParseError;

const CONTINUATION: char = '+';
const COMMENT: &str = "//";

/// Drop blank and comment-only lines and join `+`-continued lines.
///
/// Only the first physical line of a continued line keeps its leading
/// whitespace, so tree indentation survives the join. The marker is
/// stripped and the next line is appended with its own leading and
/// trailing whitespace removed.
pub fn preprocess<I, S>(lines: I) -> Result<Vec<String>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut logical = Vec::new();
    let mut pending: Option<String> = None;
    for raw in lines {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
            continue;
        }
        let (body, continued) = match pending {
            Some(_) => match trimmed.strip_suffix(CONTINUATION) {
                Some(body) => (body, true),
                None => (trimmed, false),
            },
            None => {
                let raw = raw.trim_end();
                match raw.strip_suffix(CONTINUATION) {
                    Some(body) => (body, true),
                    None => (raw, false),
                }
            }
        };
        let mut line = pending.take().unwrap_or_default();
        line.push_str(body);
        if continued {
            pending = Some(line);
        } else {
            logical.push(line);
        }
    }
    match pending {
        Some(open) => Err(ParseError::UnclosedContinuation(open)),
        None => Ok(logical),
    }
}
