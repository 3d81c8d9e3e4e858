//! Cell decoding.
//!
//! Every function here receives a cell that is already trimmed and non-empty;
//! empty cells never reach the decoder because they leave their property
//! unset.

use serde::de::DeserializeOwned;

/// Why a single cell could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("expected 'true' or 'false', got '{0}'")]
    Flag(String),

    #[error("expected a non-negative whole number, got '{0}'")]
    Number(String),

    #[error("'{value}' is not an accepted value: {message}")]
    Keyword { value: String, message: String },

    #[error("{0}")]
    Format(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Free text.
pub fn text(cell: &str) -> String {
    cell.to_string()
}

/// Strict boolean; case-insensitive `true` or `false`.
pub fn flag(cell: &str) -> Result<bool, DecodeError> {
    if cell.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(DecodeError::Flag(cell.to_string()))
    }
}

pub fn number(cell: &str) -> Result<u32, DecodeError> {
    cell.parse()
        .map_err(|_| DecodeError::Number(cell.to_string()))
}

/// One value of a closed keyword vocabulary, spelled as in Metadata XML.
pub fn keyword<T: DeserializeOwned>(cell: &str) -> Result<T, DecodeError> {
    serde_json::from_value(serde_json::Value::String(cell.to_string())).map_err(|e| {
        DecodeError::Keyword {
            value: cell.to_string(),
            message: e.to_string(),
        }
    })
}

/// Several keywords separated by `,` or `;`.
pub fn keywords<T: DeserializeOwned>(cell: &str) -> Result<Vec<T>, DecodeError> {
    cell.split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(keyword::<T>)
        .collect()
}

/// A nested structure written as JSON.
pub fn json<T: DeserializeOwned>(cell: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(cell)?)
}

/// A JSON array of structures, or a single JSON object standing for a list of one.
pub fn json_list<T: DeserializeOwned>(cell: &str) -> Result<Vec<T>, DecodeError> {
    if cell.trim_start().starts_with('[') {
        json(cell)
    } else {
        Ok(vec![json(cell)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComplianceGroup, FieldType, FilterItem, FilterOperation};

    #[test]
    fn test_flag() {
        assert!(flag("true").unwrap());
        assert!(flag("TRUE").unwrap());
        assert!(!flag("False").unwrap());
        assert!(matches!(flag("yes"), Err(DecodeError::Flag(_))));
    }

    #[test]
    fn test_number() {
        assert_eq!(number("255").unwrap(), 255);
        assert!(number("-1").is_err());
        assert!(number("12.5").is_err());
        assert!(number("ten").unwrap_err().to_string().contains("ten"));
    }

    #[test]
    fn test_keyword() {
        let field_type: FieldType = keyword("Picklist").unwrap();
        assert_eq!(field_type, FieldType::Picklist);

        let err = keyword::<FieldType>("Picklst").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Picklst"));
        assert!(message.contains("Picklist"));
    }

    #[test]
    fn test_keywords() {
        let groups: Vec<ComplianceGroup> = keywords("PII; GDPR,CCPA").unwrap();
        assert_eq!(
            groups,
            vec![ComplianceGroup::Pii, ComplianceGroup::Gdpr, ComplianceGroup::Ccpa]
        );
        assert!(keywords::<ComplianceGroup>("PII;SOX").is_err());
    }

    #[test]
    fn test_json_list_accepts_single_object() {
        let items: Vec<FilterItem> =
            json_list(r#"{"field":"Opportunity.StageName","operation":"equals","value":"Closed Won"}"#)
                .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].operation, Some(FilterOperation::Equals));

        let items: Vec<FilterItem> =
            json_list(r#"[{"field":"A"},{"field":"B"}]"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_json_rejects_unknown_keys() {
        assert!(json::<FilterItem>(r#"{"fieldName":"A"}"#).is_err());
    }
}
