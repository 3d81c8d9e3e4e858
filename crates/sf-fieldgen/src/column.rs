//! Column vocabulary of a field sheet.

use std::collections::HashSet;

use crate::error::{Error, ErrorKind, Result};

/// Header names accepted for the owning-object pseudo-column.
pub const OBJECT_COLUMN_NAMES: &[&str] = &["sobject", "sObject", "SObject"];

macro_rules! field_properties {
    ($($variant:ident => $name:literal,)+) => {
        /// A CustomField property that a sheet column can populate.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FieldProperty {
            $($variant,)+
        }

        impl FieldProperty {
            /// Every recognized property, in declaration order.
            pub const ALL: &'static [FieldProperty] = &[$(FieldProperty::$variant,)+];

            /// Metadata XML element name of the property.
            pub fn name(&self) -> &'static str {
                match self {
                    $(FieldProperty::$variant => $name,)+
                }
            }

            /// Look up a property by its exact, case-sensitive element name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(FieldProperty::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

field_properties! {
    BusinessOwnerGroup => "businessOwnerGroup",
    BusinessOwnerUser => "businessOwnerUser",
    BusinessStatus => "businessStatus",
    CaseSensitive => "caseSensitive",
    ComplianceGroup => "complianceGroup",
    CustomDataType => "customDataType",
    DefaultValue => "defaultValue",
    DeleteConstraint => "deleteConstraint",
    Deprecated => "deprecated",
    Description => "description",
    DisplayFormat => "displayFormat",
    DisplayLocationInDecimal => "displayLocationInDecimal",
    ElementType => "elementType",
    Encrypted => "encrypted",
    EncryptionScheme => "encryptionScheme",
    ExternalDeveloperName => "externalDeveloperName",
    ExternalId => "externalId",
    FieldManageability => "fieldManageability",
    Formula => "formula",
    FormulaTreatBlanksAs => "formulaTreatBlanksAs",
    FullName => "fullName",
    GlobalPicklist => "globalPicklist",
    Indexed => "indexed",
    InlineHelpText => "inlineHelpText",
    IsAiPredictionField => "isAIPredictionField",
    IsFilteringDisabled => "isFilteringDisabled",
    IsNameField => "isNameField",
    IsSortingDisabled => "isSortingDisabled",
    Label => "label",
    Length => "length",
    LookupFilter => "lookupFilter",
    MaskChar => "maskChar",
    MaskType => "maskType",
    MetadataRelationshipControllingField => "metadataRelationshipControllingField",
    PopulateExistingRows => "populateExistingRows",
    Precision => "precision",
    ReferenceTargetField => "referenceTargetField",
    ReferenceTo => "referenceTo",
    RelationshipLabel => "relationshipLabel",
    RelationshipName => "relationshipName",
    RelationshipOrder => "relationshipOrder",
    ReparentableMasterDetail => "reparentableMasterDetail",
    Required => "required",
    Scale => "scale",
    SecurityClassification => "securityClassification",
    StartingNumber => "startingNumber",
    StripMarkup => "stripMarkup",
    SummarizedField => "summarizedField",
    SummaryFilterItems => "summaryFilterItems",
    SummaryForeignKey => "summaryForeignKey",
    SummaryOperation => "summaryOperation",
    TrackFeedHistory => "trackFeedHistory",
    TrackHistory => "trackHistory",
    TrackTrending => "trackTrending",
    TrueValueIndexed => "trueValueIndexed",
    Type => "type",
    Unique => "unique",
    ValueSet => "valueSet",
    VisibleLines => "visibleLines",
    WriteRequiresMasterRead => "writeRequiresMasterRead",
}

impl std::fmt::Display for FieldProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a sheet column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The owning object; used for paths and member names only.
    Object,
    /// A CustomField property.
    Property(FieldProperty),
}

impl Column {
    /// Resolve a trimmed header name.
    pub fn from_header(name: &str) -> Option<Self> {
        if OBJECT_COLUMN_NAMES.contains(&name) {
            return Some(Column::Object);
        }
        FieldProperty::from_name(name).map(Column::Property)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Object => OBJECT_COLUMN_NAMES[0],
            Column::Property(property) => property.name(),
        }
    }
}

/// A resolved header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<Column>,
}

impl Header {
    /// Resolve header names against the column vocabulary.
    ///
    /// Unknown and repeated names are rejected, and the owning-object and
    /// `fullName` columns must both be present.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut columns = Vec::with_capacity(names.len());
        let mut seen = HashSet::new();

        for (position, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();
            let column = Column::from_header(name).ok_or_else(|| {
                Error::new(ErrorKind::UnknownColumn {
                    name: name.to_string(),
                    position: position + 1,
                })
            })?;
            if !seen.insert(column) {
                return Err(Error::new(ErrorKind::DuplicateColumn {
                    name: name.to_string(),
                }));
            }
            columns.push(column);
        }

        for required in [Column::Object, Column::Property(FieldProperty::FullName)] {
            if !seen.contains(&required) {
                return Err(Error::new(ErrorKind::MissingColumn(
                    required.name().to_string(),
                )));
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
