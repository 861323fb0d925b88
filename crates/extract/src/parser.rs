use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::ParseError;
use crate::schema::SummaryDetails;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fenced block regex"));

/// Parse raw model output into `SummaryDetails`.
///
/// Accepts bare JSON, JSON inside a markdown code fence, or a JSON object
/// surrounded by prose. Field values are returned untouched.
pub fn parse_summary_details(text: &str) -> Result<SummaryDetails, ParseError> {
    let value = locate_json(text)?;

    let obj = match &value {
        Value::Object(obj) => obj,
        other => return Err(ParseError::NotAnObject(type_name(other).to_string())),
    };

    let [product_class, city] = SummaryDetails::REQUIRED_FIELDS.map(|field| {
        match obj.get(field) {
            None | Some(Value::Null) => Err(ParseError::MissingField(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ParseError::NotAString(field)),
        }
    });

    Ok(SummaryDetails {
        product_class: product_class?,
        city: city?,
    })
}

fn locate_json(text: &str) -> Result<Value, ParseError> {
    let candidate = FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();

    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return Ok(value);
    }

    // Fall back to the outermost braces
    match (candidate.find('{'), candidate.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            Ok(serde_json::from_str(&candidate[start..=end])?)
        }
        _ => Err(ParseError::NoJson),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_json() {
        let details =
            parse_summary_details(r#"{"product_class": "Furniture", "city": "New York"}"#).unwrap();

        assert_eq!(details.product_class, "Furniture");
        assert_eq!(details.city, "New York");
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "Here you go:\n```json\n{\"product_class\": \"Electronics\", \"city\": \"Boston\"}\n```";
        let details = parse_summary_details(text).unwrap();

        assert_eq!(details.product_class, "Electronics");
        assert_eq!(details.city, "Boston");
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let text = r#"Sure! {"product_class": "Toys", "city": "Austin"} Hope that helps."#;
        let details = parse_summary_details(text).unwrap();

        assert_eq!(details.product_class, "Toys");
        assert_eq!(details.city, "Austin");
    }

    #[test]
    fn test_values_are_not_normalized() {
        let details =
            parse_summary_details(r#"{"product_class": " Furniture ", "city": "new  york"}"#).unwrap();

        assert_eq!(details.product_class, " Furniture ");
        assert_eq!(details.city, "new  york");
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let err = parse_summary_details(r#"{"product_class": "Furniture"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("city")));

        let err = parse_summary_details(r#"{"city": "New York", "product_class": null}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("product_class")));
    }

    #[test]
    fn test_non_string_field_is_an_error() {
        let err = parse_summary_details(r#"{"product_class": 3, "city": "New York"}"#).unwrap_err();
        assert!(matches!(err, ParseError::NotAString("product_class")));
    }

    #[test]
    fn test_non_object_is_an_error() {
        let err = parse_summary_details(r#"["Furniture", "New York"]"#).unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject(_)));
    }

    #[test]
    fn test_no_json_is_an_error() {
        let err = parse_summary_details("I could not find anything.").unwrap_err();
        assert!(matches!(err, ParseError::NoJson));

        let err = parse_summary_details("{\"product_class\": }").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }
}
