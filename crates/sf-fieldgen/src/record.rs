//! CustomField records and their assembly from sheet rows.

use serde::{Serialize, Serializer};

use crate::column::{Column, FieldProperty, Header};
use crate::decode::{self, DecodeError};
use crate::error::{Error, ErrorKind, Result};
use crate::tokenizer::Row;
use crate::types::{
    BusinessStatus, ComplianceGroup, DeleteConstraint, EncryptedFieldMaskChar,
    EncryptedFieldMaskType, EncryptionScheme, FieldManageability, FieldType, FilterItem,
    FormulaTreatBlanksAs, LookupFilter, Namespace, SecurityClassification, SummaryOperations,
    CUSTOM_FIELD_TYPE,
};
use crate::value_set::ValueSet;
use crate::xml;

/// A Salesforce custom field definition.
///
/// Every property is optional; `None` means the sheet left the cell empty and
/// the element is not written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(rename = "$")]
    pub namespace: Namespace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_owner_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_owner_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_status: Option<BusinessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_compliance_groups"
    )]
    pub compliance_group: Option<Vec<ComplianceGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_constraint: Option<DeleteConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_location_in_decimal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_scheme: Option<EncryptionScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_developer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_manageability: Option<FieldManageability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_treat_blanks_as: Option<FormulaTreatBlanksAs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_picklist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_help_text: Option<String>,
    #[serde(rename = "isAIPredictionField", skip_serializing_if = "Option::is_none")]
    pub is_ai_prediction_field: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_filtering_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_name_field: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sorting_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_filter: Option<LookupFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_char: Option<EncryptedFieldMaskChar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_type: Option<EncryptedFieldMaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_relationship_controlling_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub populate_existing_rows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_target_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reparentable_master_detail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_classification: Option<SecurityClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_markup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarized_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_filter_items: Option<Vec<FilterItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_foreign_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_operation: Option<SummaryOperations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_feed_history: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_history: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_trending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_value_indexed: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<ValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_requires_master_read: Option<bool>,
}

impl CustomField {
    /// Decode a non-empty cell into `property`.
    pub fn assign(
        &mut self,
        property: FieldProperty,
        cell: &str,
    ) -> std::result::Result<(), DecodeError> {
        use decode::{flag, json, json_list, keyword, keywords, number, text};

        match property {
            FieldProperty::BusinessOwnerGroup => self.business_owner_group = Some(text(cell)),
            FieldProperty::BusinessOwnerUser => self.business_owner_user = Some(text(cell)),
            FieldProperty::BusinessStatus => self.business_status = Some(keyword(cell)?),
            FieldProperty::CaseSensitive => self.case_sensitive = Some(flag(cell)?),
            FieldProperty::ComplianceGroup => self.compliance_group = Some(keywords(cell)?),
            FieldProperty::CustomDataType => self.custom_data_type = Some(text(cell)),
            FieldProperty::DefaultValue => self.default_value = Some(text(cell)),
            FieldProperty::DeleteConstraint => self.delete_constraint = Some(keyword(cell)?),
            FieldProperty::Deprecated => self.deprecated = Some(flag(cell)?),
            FieldProperty::Description => self.description = Some(text(cell)),
            FieldProperty::DisplayFormat => self.display_format = Some(text(cell)),
            FieldProperty::DisplayLocationInDecimal => {
                self.display_location_in_decimal = Some(flag(cell)?)
            }
            FieldProperty::ElementType => self.element_type = Some(text(cell)),
            FieldProperty::Encrypted => self.encrypted = Some(flag(cell)?),
            FieldProperty::EncryptionScheme => self.encryption_scheme = Some(keyword(cell)?),
            FieldProperty::ExternalDeveloperName => {
                self.external_developer_name = Some(text(cell))
            }
            FieldProperty::ExternalId => self.external_id = Some(flag(cell)?),
            FieldProperty::FieldManageability => self.field_manageability = Some(keyword(cell)?),
            FieldProperty::Formula => self.formula = Some(text(cell)),
            FieldProperty::FormulaTreatBlanksAs => {
                self.formula_treat_blanks_as = Some(keyword(cell)?)
            }
            FieldProperty::FullName => self.full_name = Some(text(cell)),
            FieldProperty::GlobalPicklist => self.global_picklist = Some(text(cell)),
            FieldProperty::Indexed => self.indexed = Some(flag(cell)?),
            FieldProperty::InlineHelpText => self.inline_help_text = Some(text(cell)),
            FieldProperty::IsAiPredictionField => self.is_ai_prediction_field = Some(flag(cell)?),
            FieldProperty::IsFilteringDisabled => self.is_filtering_disabled = Some(flag(cell)?),
            FieldProperty::IsNameField => self.is_name_field = Some(flag(cell)?),
            FieldProperty::IsSortingDisabled => self.is_sorting_disabled = Some(flag(cell)?),
            FieldProperty::Label => self.label = Some(text(cell)),
            FieldProperty::Length => self.length = Some(number(cell)?),
            FieldProperty::LookupFilter => self.lookup_filter = Some(json(cell)?),
            FieldProperty::MaskChar => self.mask_char = Some(keyword(cell)?),
            FieldProperty::MaskType => self.mask_type = Some(keyword(cell)?),
            FieldProperty::MetadataRelationshipControllingField => {
                self.metadata_relationship_controlling_field = Some(text(cell))
            }
            FieldProperty::PopulateExistingRows => self.populate_existing_rows = Some(flag(cell)?),
            FieldProperty::Precision => self.precision = Some(number(cell)?),
            FieldProperty::ReferenceTargetField => self.reference_target_field = Some(text(cell)),
            FieldProperty::ReferenceTo => self.reference_to = Some(text(cell)),
            FieldProperty::RelationshipLabel => self.relationship_label = Some(text(cell)),
            FieldProperty::RelationshipName => self.relationship_name = Some(text(cell)),
            FieldProperty::RelationshipOrder => self.relationship_order = Some(number(cell)?),
            FieldProperty::ReparentableMasterDetail => {
                self.reparentable_master_detail = Some(flag(cell)?)
            }
            FieldProperty::Required => self.required = Some(flag(cell)?),
            FieldProperty::Scale => self.scale = Some(number(cell)?),
            FieldProperty::SecurityClassification => {
                self.security_classification = Some(keyword(cell)?)
            }
            FieldProperty::StartingNumber => self.starting_number = Some(number(cell)?),
            FieldProperty::StripMarkup => self.strip_markup = Some(flag(cell)?),
            FieldProperty::SummarizedField => self.summarized_field = Some(text(cell)),
            FieldProperty::SummaryFilterItems => self.summary_filter_items = Some(json_list(cell)?),
            FieldProperty::SummaryForeignKey => self.summary_foreign_key = Some(text(cell)),
            FieldProperty::SummaryOperation => self.summary_operation = Some(keyword(cell)?),
            FieldProperty::TrackFeedHistory => self.track_feed_history = Some(flag(cell)?),
            FieldProperty::TrackHistory => self.track_history = Some(flag(cell)?),
            FieldProperty::TrackTrending => self.track_trending = Some(flag(cell)?),
            FieldProperty::TrueValueIndexed => self.true_value_indexed = Some(flag(cell)?),
            FieldProperty::Type => self.field_type = Some(keyword(cell)?),
            FieldProperty::Unique => self.unique = Some(flag(cell)?),
            FieldProperty::ValueSet => self.value_set = Some(ValueSet::decode(cell)?),
            FieldProperty::VisibleLines => self.visible_lines = Some(number(cell)?),
            FieldProperty::WriteRequiresMasterRead => {
                self.write_requires_master_read = Some(flag(cell)?)
            }
        }
        Ok(())
    }

    /// Render the field as a `CustomField` metadata document.
    pub fn to_xml(&self) -> Result<String> {
        let tree = serde_json::to_value(self)
            .map_err(|e| Error::with_source(ErrorKind::Xml(e.to_string()), e))?;
        xml::to_document(CUSTOM_FIELD_TYPE, &tree)
    }
}

fn serialize_compliance_groups<S: Serializer>(
    groups: &Option<Vec<ComplianceGroup>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match groups {
        Some(groups) => {
            let joined = groups
                .iter()
                .map(ComplianceGroup::as_str)
                .collect::<Vec<_>>()
                .join(";");
            serializer.serialize_str(&joined)
        }
        None => serializer.serialize_none(),
    }
}

/// A field together with the object that owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// API name of the owning object.
    #[serde(rename = "sobject")]
    pub object: String,
    #[serde(flatten)]
    pub field: CustomField,
    /// Record number of the source row; the header is record 1.
    #[serde(skip)]
    pub record: usize,
}

impl FieldDefinition {
    /// API name of the field.
    pub fn full_name(&self) -> &str {
        self.field.full_name.as_deref().unwrap_or_default()
    }

    /// Manifest member reference, `<object>.<fullName>`.
    pub fn member(&self) -> String {
        format!("{}.{}", self.object, self.full_name())
    }
}

/// Build a field definition from one tokenized row.
///
/// Cells are applied in header order. Empty cells leave their property unset.
/// The owning-object cell is kept apart from the record, and both it and
/// `fullName` must be present.
pub fn assemble(header: &Header, row: &Row) -> Result<FieldDefinition> {
    let record = row.record_number();
    if row.cells.len() != header.len() {
        return Err(Error::new(ErrorKind::MalformedRow {
            record,
            line: row.line,
            expected: header.len(),
            actual: row.cells.len(),
        }));
    }

    let mut object = None;
    let mut field = CustomField::default();

    for (column, cell) in header.columns().iter().zip(&row.cells) {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }

        match column {
            Column::Object => object = Some(cell.to_string()),
            Column::Property(property) => field.assign(*property, cell).map_err(|e| {
                Error::with_source(
                    ErrorKind::Decode {
                        record,
                        line: row.line,
                        column: property.name().to_string(),
                        message: e.to_string(),
                    },
                    e,
                )
            })?,
        }
    }

    let object = object.ok_or_else(|| Error::new(ErrorKind::MissingObject { record }))?;
    let Some(full_name) = field.full_name.as_deref() else {
        return Err(Error::new(ErrorKind::MissingFullName { record }));
    };

    for name in [object.as_str(), full_name] {
        if !is_path_segment(name) {
            return Err(Error::new(ErrorKind::InvalidName {
                record,
                name: name.to_string(),
            }));
        }
    }

    if field.value_set.is_some() && !field.field_type.is_some_and(|t| t.is_picklist()) {
        tracing::warn!(
            record,
            field = full_name,
            "valueSet given for a field that is not a picklist"
        );
    }

    tracing::debug!(record, object = %object, field = full_name, "assembled field");

    Ok(FieldDefinition {
        object,
        field,
        record,
    })
}

/// Object and field names become directory and file names.
fn is_path_segment(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}
