//! # busbar-sf-generate
//!
//! Generate Salesforce `CustomField` metadata from a spreadsheet-style field
//! sheet instead of writing the XML by hand.
//!
//! ## Crates
//!
//! - **busbar-sf-fieldgen** - Tokenizer, typed CustomField records, XML and manifest output
//!
//! ## Quick Start
//!
//! ```sh
//! sf-generate --path fields.csv --encoding utf-8 --project ./my-project
//! ```
//!
//! A sheet has a header row naming CustomField properties plus an `sobject`
//! column, then one field per row:
//!
//! ```text
//! sobject;fullName;label;type;valueSet
//! Account;Tier__c;Tier;Picklist;"true<false<GOLD<Gold|GOLD;Silver|SILVER"
//! ```

pub mod cli;

// Re-export the generator crate for convenient access
pub use busbar_sf_fieldgen as fieldgen;

// Re-export commonly used types at the top level
pub use busbar_sf_fieldgen::{
    Error, ErrorKind, FieldGenerator, GenerationReport, GeneratorConfig, Result,
};
