//! Package manifest (package.xml) and member accumulation.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};
use crate::types::Namespace;
use crate::xml;

/// Root element of a package manifest.
pub const PACKAGE_ROOT: &str = "Package";

/// Package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    #[serde(rename = "$")]
    pub namespace: Namespace,
    pub types: Vec<PackageTypeMembers>,
    pub version: String,
}

impl PackageManifest {
    /// Create a new package manifest with the given API version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::default(),
            types: Vec::new(),
            version: version.into(),
        }
    }

    /// Add a metadata type with its members.
    pub fn add_type(mut self, name: impl Into<String>, members: Vec<String>) -> Self {
        self.types.push(PackageTypeMembers {
            members,
            name: name.into(),
        });
        self
    }

    /// Members listed for a metadata type.
    pub fn members(&self, name: &str) -> &[String] {
        self.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.members.as_slice())
            .unwrap_or_default()
    }

    /// Render as a `Package` document.
    ///
    /// All values are escaped by the XML writer.
    pub fn to_xml(&self) -> Result<String> {
        let tree = serde_json::to_value(self)
            .map_err(|e| Error::with_source(ErrorKind::Xml(e.to_string()), e))?;
        xml::to_document(PACKAGE_ROOT, &tree)
    }
}

/// Type members in a package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageTypeMembers {
    pub members: Vec<String>,
    pub name: String,
}

/// Member references collected in row order.
#[derive(Debug, Clone, Default)]
pub struct MemberList {
    members: Vec<String>,
    seen: HashSet<String>,
    dedupe: bool,
}

impl MemberList {
    pub fn new(dedupe: bool) -> Self {
        Self {
            dedupe,
            ..Self::default()
        }
    }

    /// Append a member. Returns false if it was a repeat that got dropped.
    pub fn push(&mut self, member: String) -> bool {
        if !self.seen.insert(member.clone()) {
            tracing::warn!(
                member = %member,
                dropped = self.dedupe,
                "member listed more than once; its field file is overwritten"
            );
            if self.dedupe {
                return false;
            }
        }
        self.members.push(member);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.members
    }
}
