use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

lazy_static! {
    // Greedy: from the first '[' to the last ']'.
    static ref JSON_ARRAY: Regex = Regex::new(r"(?s)\[.*\]").expect("valid array pattern");
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("response contains no JSON array")]
    NoJsonArray,
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("response JSON is not an array")]
    NotAnArray,
    #[error("response array is empty")]
    EmptyArray,
}

/// Extracts the list of raw recipe objects from a model reply.
///
/// A reply that is itself a bracketed array is parsed as-is; otherwise the
/// first bracketed span inside the text is tried. Either way the result must
/// be a non-empty JSON array.
pub fn extract_recipe_array(text: &str) -> Result<Vec<Value>, ParseError> {
    let trimmed = text.trim();

    let candidate = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        trimmed
    } else {
        JSON_ARRAY
            .find(trimmed)
            .map(|m| m.as_str())
            .ok_or(ParseError::NoJsonArray)?
    };

    match serde_json::from_str::<Value>(candidate)? {
        Value::Array(items) if items.is_empty() => Err(ParseError::EmptyArray),
        Value::Array(items) => Ok(items),
        _ => Err(ParseError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_array() {
        let items = extract_recipe_array("  [{\"title\":\"A\"},{\"title\":\"B\"}]\n").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["title"], "B");
    }

    #[test]
    fn test_array_embedded_in_prose() {
        let text = "Here you go!\n```json\n[{\"title\":\"Kabsa\"}]\n```\nEnjoy.";
        let items = extract_recipe_array(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Kabsa");
    }

    #[test]
    fn test_nested_arrays_survive_greedy_match() {
        let text = "Result: [{\"title\":\"A\",\"tags\":[\"x\",\"y\"]}] done";
        let items = extract_recipe_array(text).unwrap();
        assert_eq!(items[0]["tags"][1], "y");
    }

    #[test]
    fn test_plain_text_has_no_array() {
        assert!(matches!(
            extract_recipe_array("Sorry, I can't help"),
            Err(ParseError::NoJsonArray)
        ));
    }

    #[test]
    fn test_bracketed_but_broken_json_does_not_fall_through_to_regex() {
        assert!(matches!(
            extract_recipe_array("[{\"title\": }]"),
            Err(ParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_empty_array_is_rejected() {
        assert!(matches!(extract_recipe_array("[]"), Err(ParseError::EmptyArray)));
    }

    #[test]
    fn test_two_separate_arrays_in_prose_fail_to_parse() {
        // greedy span covers "[1] and [2]", which is not valid JSON
        assert!(matches!(
            extract_recipe_array("first [1] and [2] last"),
            Err(ParseError::InvalidJson(_))
        ));
    }
}
