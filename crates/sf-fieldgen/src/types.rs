//! Common types for CustomField metadata.

use serde::{Deserialize, Serialize};

/// Default Metadata API version written to the package manifest.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// Namespace carried by every Metadata API document.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// Metadata type name of a custom field.
pub const CUSTOM_FIELD_TYPE: &str = "CustomField";

/// The `$` attribute node carrying the namespace of a metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub xmlns: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            xmlns: METADATA_NAMESPACE.to_string(),
        }
    }
}

/// Field data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Address,
    AutoNumber,
    Lookup,
    MasterDetail,
    MetadataRelationship,
    Checkbox,
    Currency,
    Date,
    DateTime,
    Email,
    EncryptedText,
    Note,
    ExternalLookup,
    IndirectLookup,
    Number,
    Percent,
    Phone,
    Picklist,
    MultiselectPicklist,
    Summary,
    Text,
    TextArea,
    LongTextArea,
    Url,
    Hierarchy,
    File,
    Html,
    Location,
    Time,
}

impl FieldType {
    /// Whether the type is a picklist and takes a `valueSet`.
    pub fn is_picklist(&self) -> bool {
        matches!(self, FieldType::Picklist | FieldType::MultiselectPicklist)
    }
}

/// Business status of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessStatus {
    Active,
    DeprecateCandidate,
    Hidden,
}

/// Compliance categories that apply to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceGroup {
    #[serde(rename = "CCPA")]
    Ccpa,
    #[serde(rename = "COPPA")]
    Coppa,
    #[serde(rename = "GDPR")]
    Gdpr,
    #[serde(rename = "HIPAA")]
    Hipaa,
    #[serde(rename = "PCI")]
    Pci,
    #[serde(rename = "PII")]
    Pii,
}

impl ComplianceGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceGroup::Ccpa => "CCPA",
            ComplianceGroup::Coppa => "COPPA",
            ComplianceGroup::Gdpr => "GDPR",
            ComplianceGroup::Hipaa => "HIPAA",
            ComplianceGroup::Pci => "PCI",
            ComplianceGroup::Pii => "PII",
        }
    }
}

/// What happens to a lookup when the referenced record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteConstraint {
    Cascade,
    Restrict,
    SetNull,
}

/// Shield platform encryption scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionScheme {
    CaseInsensitiveDeterministicEncryption,
    CaseSensitiveDeterministicEncryption,
    None,
    ProbabilisticEncryption,
}

/// Who may change a field in a managed package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldManageability {
    Locked,
    DeveloperControlled,
    SubscriberControlled,
}

/// How blank fields are treated in a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaTreatBlanksAs {
    BlankAsBlank,
    BlankAsZero,
}

/// Mask character of an encrypted text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptedFieldMaskChar {
    #[serde(rename = "asterisk")]
    Asterisk,
    X,
}

/// Mask pattern of an encrypted text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncryptedFieldMaskType {
    All,
    CreditCard,
    LastFour,
    Nino,
    Sin,
    Ssn,
}

/// Data sensitivity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityClassification {
    Public,
    Internal,
    Confidential,
    Restricted,
    MissionCritical,
}

/// Aggregate of a roll-up summary field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryOperations {
    Count,
    Min,
    Max,
    Sum,
}

/// Comparison used by a filter item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperation {
    Equals,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    Contains,
    NotContain,
    StartsWith,
    Includes,
    Excludes,
    Within,
}

/// One criterion of a lookup filter or roll-up summary filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<FilterOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
}

/// Restricts the records a lookup field may reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LookupFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_items: Vec<FilterItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_spelling() {
        assert_eq!(
            serde_json::to_value(EncryptedFieldMaskType::CreditCard).unwrap(),
            "creditCard"
        );
        assert_eq!(serde_json::to_value(SummaryOperations::Sum).unwrap(), "sum");
        assert_eq!(serde_json::to_value(ComplianceGroup::Gdpr).unwrap(), "GDPR");
        assert_eq!(
            serde_json::to_value(EncryptedFieldMaskChar::Asterisk).unwrap(),
            "asterisk"
        );
        assert_eq!(serde_json::to_value(FieldType::Number).unwrap(), "Number");
    }

    #[test]
    fn test_lookup_filter_skips_absent_parts() {
        let filter = LookupFilter {
            active: Some(true),
            filter_items: vec![FilterItem {
                field: Some("Account.Type".to_string()),
                operation: Some(FilterOperation::Equals),
                value: Some("Customer".to_string()),
                value_field: None,
            }],
            ..Default::default()
        };

        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["active"], true);
        assert_eq!(value["filterItems"][0]["operation"], "equals");
        assert!(value.get("errorMessage").is_none());
        assert!(value["filterItems"][0].get("valueField").is_none());
    }

    #[test]
    fn test_picklist_types() {
        assert!(FieldType::Picklist.is_picklist());
        assert!(FieldType::MultiselectPicklist.is_picklist());
        assert!(!FieldType::Text.is_picklist());
    }
}
