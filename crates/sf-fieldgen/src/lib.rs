//! # busbar-sf-fieldgen
//!
//! Generate Salesforce `CustomField` metadata from a delimited field sheet.
//!
//! ## Features
//!
//! - **Tokenizer** - Semicolon or comma separated sheets, quoted cells, blank rows skipped
//! - **Typed records** - Every recognized column maps to a typed CustomField property
//! - **Picklists** - `restricted<sorted<default<label|api;...` value sets
//! - **Source format output** - One `.field-meta.xml` per field under `force-app/main/default`
//! - **Manifest** - `manifest/generated_package.xml` listing every generated member
//!
//! ## Example
//!
//! ```rust,no_run
//! use busbar_sf_fieldgen::{FieldGenerator, GeneratorConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), busbar_sf_fieldgen::Error> {
//!     let config = GeneratorConfig::builder()
//!         .with_project_root("my-project")
//!         .with_api_version("62.0")
//!         .build();
//!
//!     let report = FieldGenerator::new(config).generate_from_path(Path::new("fields.csv"))?;
//!
//!     for member in report.members() {
//!         println!("  {}", member);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod column;
mod config;
mod decode;
mod error;
mod generator;
mod manifest;
mod output;
mod record;
mod tokenizer;
mod types;
mod value_set;
mod xml;

pub use column::{Column, FieldProperty, Header, OBJECT_COLUMN_NAMES};
pub use config::{Delimiters, GeneratorConfig, GeneratorConfigBuilder, RowDelimiter, TextEncoding};
pub use decode::DecodeError;
pub use error::{Error, ErrorKind, Result};
pub use generator::{FieldGenerator, GenerationReport};
pub use manifest::{MemberList, PackageManifest, PackageTypeMembers};
pub use output::{OutputLayout, RenderedFile};
pub use record::{assemble, CustomField, FieldDefinition};
pub use tokenizer::{Row, TokenizedSheet, Tokenizer};
pub use types::{
    BusinessStatus, ComplianceGroup, DeleteConstraint, EncryptedFieldMaskChar,
    EncryptedFieldMaskType, EncryptionScheme, FieldManageability, FieldType, FilterItem,
    FilterOperation, FormulaTreatBlanksAs, LookupFilter, Namespace, SecurityClassification,
    SummaryOperations, CUSTOM_FIELD_TYPE, DEFAULT_API_VERSION, METADATA_NAMESPACE,
};
pub use value_set::{PicklistValue, ValueSet, ValueSetDefinition};
pub use xml::to_document;
