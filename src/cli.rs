//! Command-line interface of `sf-generate`.

use std::path::PathBuf;

use busbar_sf_fieldgen::{
    Delimiters, Error, FieldGenerator, GenerationReport, GeneratorConfig, TextEncoding,
    DEFAULT_API_VERSION,
};
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing::Level;

/// Generate Salesforce CustomField metadata from a delimited field sheet.
#[derive(Parser, Debug)]
#[command(
    name = "sf-generate",
    about = "Generate CustomField metadata files and a package manifest from a field sheet",
    version,
    long_about = "Reads a delimited sheet with one custom field per row and writes \
                  force-app/main/default/objects/<object>/fields/<field>.field-meta.xml for every row \
                  plus manifest/generated_package.xml into the project."
)]
pub struct Args {
    /// Path of the field sheet
    #[arg(short = 'p', long)]
    pub path: PathBuf,

    /// Text encoding of the field sheet
    #[arg(short = 'e', long)]
    pub encoding: String,

    /// Root of the Salesforce project to write into
    #[arg(short = 's', long)]
    pub project: PathBuf,

    /// Cell delimiter of the field sheet
    #[arg(short = 'd', long, value_enum, default_value = "semicolon")]
    pub delimiter: DelimiterPreset,

    /// API version written into the package manifest
    #[arg(long, env = "SF_GENERATE_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// List each member only once in the manifest
    #[arg(long)]
    pub dedupe_members: bool,

    /// Print machine-readable JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelimiterPreset {
    Semicolon,
    Comma,
}

impl From<DelimiterPreset> for Delimiters {
    fn from(preset: DelimiterPreset) -> Self {
        match preset {
            DelimiterPreset::Semicolon => Delimiters::semicolon(),
            DelimiterPreset::Comma => Delimiters::comma(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl Args {
    /// Generator configuration described by the arguments.
    pub fn config(&self) -> Result<GeneratorConfig, Error> {
        let encoding: TextEncoding = self.encoding.parse()?;
        Ok(GeneratorConfig::builder()
            .with_project_root(&self.project)
            .with_delimiters(self.delimiter.into())
            .with_encoding(encoding)
            .with_api_version(&self.api_version)
            .with_dedupe_members(self.dedupe_members)
            .build())
    }
}

/// Run a generation with the given arguments.
pub fn run(args: &Args) -> Result<GenerationReport, Error> {
    let generator = FieldGenerator::new(args.config()?);
    generator.generate_from_path(&args.path)
}

/// Human-readable confirmation of a successful run.
pub fn confirmation(args: &Args, report: &GenerationReport) -> String {
    format!(
        "Generated {} custom field(s) from {} ({}) into {}; manifest at {}",
        report.fields.len(),
        args.path.display(),
        args.encoding,
        args.project.display(),
        report.manifest_path.display()
    )
}

/// `{"status":0,"result":{"parsedCSV":[...]}}`
pub fn success_json(report: &GenerationReport) -> serde_json::Value {
    json!({
        "status": 0,
        "result": {
            "parsedCSV": report.fields,
        },
    })
}

/// `{"status":1,"name":<kind>,"message":<text>}`
pub fn failure_json(err: &Error) -> serde_json::Value {
    let mut value = json!({
        "status": 1,
        "name": err.kind.name(),
        "message": err.to_string(),
    });
    if let Some(record) = err.record() {
        value["record"] = json!(record);
    }
    if let Some(line) = err.line() {
        value["line"] = json!(line);
    }
    value
}
