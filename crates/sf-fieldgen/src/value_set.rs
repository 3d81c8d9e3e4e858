//! Picklist value sets and their cell sub-format.
//!
//! A `valueSet` cell is written as
//!
//! ```text
//! restricted<sorted<defaultValueToken<label|apiName;label|apiName;...
//! ```
//!
//! or, for sheets exported by older tooling, as the JSON shape of
//! [`ValueSet`].

use serde::{Deserialize, Serialize};

use crate::decode::DecodeError;

/// Separator between the four sub-fields of a `valueSet` cell.
pub const SUB_FIELD_DELIMITER: char = '<';
/// Separator between `label|apiName` pairs.
pub const PAIR_DELIMITER: char = ';';
/// Separator between a label and its API name.
pub const LABEL_DELIMITER: char = '|';

/// Picklist value set of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    pub restricted: bool,
    pub value_set_definition: ValueSetDefinition,
}

/// Ordered picklist values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSetDefinition {
    pub sorted: bool,
    pub value: Vec<PicklistValue>,
}

/// One picklist value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValue {
    pub full_name: String,
    pub default: bool,
    pub label: String,
}

impl ValueSet {
    /// Values in sheet order.
    pub fn values(&self) -> &[PicklistValue] {
        &self.value_set_definition.value
    }

    /// The default value, if one is designated.
    pub fn default_value(&self) -> Option<&PicklistValue> {
        self.values().iter().find(|v| v.default)
    }

    /// Decode a `valueSet` cell in either the delimited or the JSON form.
    pub fn decode(cell: &str) -> Result<Self, DecodeError> {
        let cell = cell.trim();
        let value_set = if cell.starts_with('{') {
            serde_json::from_str::<ValueSet>(cell)?
        } else {
            Self::decode_delimited(cell)?
        };
        value_set.validate()?;
        Ok(value_set)
    }

    fn decode_delimited(cell: &str) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = cell.splitn(4, SUB_FIELD_DELIMITER).collect();
        let [restricted, sorted, default_token, pairs] = parts.as_slice() else {
            return Err(DecodeError::Format(format!(
                "expected 4 '{SUB_FIELD_DELIMITER}'-separated parts \
                 (restricted{SUB_FIELD_DELIMITER}sorted{SUB_FIELD_DELIMITER}default{SUB_FIELD_DELIMITER}values), got {}",
                parts.len()
            )));
        };

        let default_token = default_token.trim();
        let mut values = Vec::new();
        for pair in pairs.split(PAIR_DELIMITER) {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (label, api_name) = pair.split_once(LABEL_DELIMITER).ok_or_else(|| {
                DecodeError::Format(format!(
                    "picklist value '{pair}' is not of the form label{LABEL_DELIMITER}apiName"
                ))
            })?;
            let (label, api_name) = (label.trim(), api_name.trim());
            if label.is_empty() || api_name.is_empty() {
                return Err(DecodeError::Format(format!(
                    "picklist value '{pair}' needs both a label and an API name"
                )));
            }
            values.push(PicklistValue {
                full_name: api_name.to_string(),
                default: api_name == default_token,
                label: label.to_string(),
            });
        }

        if !default_token.is_empty() && !values.iter().any(|v| v.default) {
            return Err(DecodeError::Format(format!(
                "default value '{default_token}' is not one of the picklist API names"
            )));
        }

        Ok(ValueSet {
            restricted: lenient_flag(restricted),
            value_set_definition: ValueSetDefinition {
                sorted: lenient_flag(sorted),
                value: values,
            },
        })
    }

    fn validate(&self) -> Result<(), DecodeError> {
        let values = self.values();
        if values.is_empty() {
            return Err(DecodeError::Format("value set has no values".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for value in values {
            if !seen.insert(value.full_name.as_str()) {
                return Err(DecodeError::Format(format!(
                    "picklist value '{}' appears more than once",
                    value.full_name
                )));
            }
        }

        if values.iter().filter(|v| v.default).count() > 1 {
            return Err(DecodeError::Format(
                "more than one picklist value is marked as default".to_string(),
            ));
        }
        Ok(())
    }
}

/// `true` in any case is true; everything else is false.
fn lenient_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_delimited() {
        let set = ValueSet::decode("true<false<GOLD<Gold|GOLD;Silver|SILVER").unwrap();
        assert!(set.restricted);
        assert!(!set.value_set_definition.sorted);
        assert_eq!(
            set.values(),
            &[
                PicklistValue {
                    full_name: "GOLD".to_string(),
                    default: true,
                    label: "Gold".to_string(),
                },
                PicklistValue {
                    full_name: "SILVER".to_string(),
                    default: false,
                    label: "Silver".to_string(),
                },
            ]
        );
        assert_eq!(set.default_value().unwrap().full_name, "GOLD");
    }

    #[test]
    fn test_flags_are_case_insensitive_and_lenient() {
        let set = ValueSet::decode("TRUE<True<<A|a").unwrap();
        assert!(set.restricted);
        assert!(set.value_set_definition.sorted);

        let set = ValueSet::decode("yes<1<<A|a").unwrap();
        assert!(!set.restricted);
        assert!(!set.value_set_definition.sorted);
    }

    #[test]
    fn test_no_default_token() {
        let set = ValueSet::decode("false<false<<A|a;B|b;").unwrap();
        assert_eq!(set.values().len(), 2);
        assert!(set.default_value().is_none());
    }

    #[test]
    fn test_missing_parts() {
        let err = ValueSet::decode("true<false<A|a").unwrap_err();
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_pair_without_separator() {
        let err = ValueSet::decode("true<false<<Gold").unwrap_err();
        assert!(err.to_string().contains("label|apiName"));
    }

    #[test]
    fn test_unknown_default_rejected() {
        let err = ValueSet::decode("true<false<BRONZE<Gold|GOLD").unwrap_err();
        assert!(err.to_string().contains("BRONZE"));
    }

    #[test]
    fn test_duplicate_api_name_rejected() {
        let err = ValueSet::decode("true<false<GOLD<Gold|GOLD;Also Gold|GOLD").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(ValueSet::decode("true<false<<").is_err());
    }

    #[test]
    fn test_decode_json_form() {
        let cell = r#"{"restricted":true,"valueSetDefinition":{"sorted":false,"value":[{"fullName":"GOLD","default":true,"label":"Gold"}]}}"#;
        let set = ValueSet::decode(cell).unwrap();
        assert!(set.restricted);
        assert_eq!(set.default_value().unwrap().label, "Gold");
    }

    #[test]
    fn test_json_form_with_two_defaults_rejected() {
        let cell = r#"{"restricted":true,"valueSetDefinition":{"sorted":false,"value":[
            {"fullName":"A","default":true,"label":"A"},
            {"fullName":"B","default":true,"label":"B"}]}}"#;
        let err = ValueSet::decode(cell).unwrap_err();
        assert!(err.to_string().contains("default"));
    }
}
