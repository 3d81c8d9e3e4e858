//! Field sheet to metadata pipeline.

use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::column::Header;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::manifest::{MemberList, PackageManifest};
use crate::output::OutputLayout;
use crate::record::{self, FieldDefinition};
use crate::tokenizer::Tokenizer;
use crate::types::CUSTOM_FIELD_TYPE;

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Parsed fields, in sheet order.
    pub fields: Vec<FieldDefinition>,
    /// The manifest that was written.
    pub manifest: PackageManifest,
    /// Field files written, in sheet order.
    pub field_paths: Vec<PathBuf>,
    pub manifest_path: PathBuf,
}

impl GenerationReport {
    /// Members listed in the manifest.
    pub fn members(&self) -> &[String] {
        self.manifest.members(CUSTOM_FIELD_TYPE)
    }
}

/// Turns field sheets into CustomField metadata files and a package manifest.
#[derive(Debug, Clone)]
pub struct FieldGenerator {
    config: GeneratorConfig,
    tokenizer: Tokenizer,
    layout: OutputLayout,
}

impl FieldGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.delimiters),
            layout: OutputLayout::new(config.project_root.clone()),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Parse a sheet into field definitions without writing anything.
    ///
    /// Stops at the first row that fails.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> Result<Vec<FieldDefinition>> {
        let sheet = self.tokenizer.tokenize(text)?;
        let header = Header::resolve(&sheet.headers)?;

        sheet
            .rows
            .iter()
            .map(|row| record::assemble(&header, row))
            .collect()
    }

    /// Collect manifest members for `fields` in order.
    pub fn build_manifest(&self, fields: &[FieldDefinition]) -> PackageManifest {
        let mut members = MemberList::new(self.config.dedupe_members);
        for field in fields {
            members.push(field.member());
        }
        PackageManifest::new(self.config.api_version.clone())
            .add_type(CUSTOM_FIELD_TYPE, members.into_vec())
    }

    /// Parse a sheet and write one file per field plus the manifest.
    ///
    /// Every row is parsed and every document rendered before the first file
    /// is written, so a bad row leaves the project untouched.
    #[instrument(skip(self, text), fields(project = %self.config.project_root.display()))]
    pub fn generate_from_str(&self, text: &str) -> Result<GenerationReport> {
        let fields = self.parse(text)?;
        let manifest = self.build_manifest(&fields);

        let files = fields
            .iter()
            .map(|field| self.layout.render_field(field))
            .collect::<Result<Vec<_>>>()?;
        let manifest_file = self.layout.render_manifest(&manifest)?;

        for file in &files {
            file.write()?;
        }
        manifest_file.write()?;

        let field_paths: Vec<PathBuf> = files.into_iter().map(|file| file.path).collect();
        let manifest_path = manifest_file.path;

        tracing::info!(
            fields = field_paths.len(),
            manifest = %manifest_path.display(),
            "generated custom field metadata"
        );

        Ok(GenerationReport {
            fields,
            manifest,
            field_paths,
            manifest_path,
        })
    }

    /// Read a sheet in the configured encoding and generate from it.
    #[instrument(skip(self))]
    pub fn generate_from_path(&self, path: &Path) -> Result<GenerationReport> {
        let text = self.read_sheet(path)?;
        self.generate_from_str(&text)
    }

    /// Read a sheet in the configured encoding.
    pub fn read_sheet(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        self.config.encoding.decode(bytes)
    }
}
