//! Output layout of a Salesforce source-format project.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::PackageManifest;
use crate::record::FieldDefinition;

/// Directory under the project root holding object metadata.
pub const OBJECTS_DIR: [&str; 4] = ["force-app", "main", "default", "objects"];
/// Directory under an object holding its field files.
pub const FIELDS_DIR: &str = "fields";
/// Suffix of a field metadata file.
pub const FIELD_FILE_SUFFIX: &str = ".field-meta.xml";
/// Directory under the project root holding manifests.
pub const MANIFEST_DIR: &str = "manifest";
/// File name of the generated manifest.
pub const MANIFEST_FILE: &str = "generated_package.xml";

/// Computes output paths under a project root and writes documents there.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    project_root: PathBuf,
}

impl OutputLayout {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// `<project>/force-app/main/default/objects/<object>/fields/`
    pub fn fields_dir(&self, object: &str) -> PathBuf {
        let mut dir = self.project_root.clone();
        dir.extend(OBJECTS_DIR);
        dir.push(object);
        dir.push(FIELDS_DIR);
        dir
    }

    /// `<project>/force-app/main/default/objects/<object>/fields/<fullName>.field-meta.xml`
    pub fn field_path(&self, object: &str, full_name: &str) -> PathBuf {
        self.fields_dir(object)
            .join(format!("{full_name}{FIELD_FILE_SUFFIX}"))
    }

    /// `<project>/manifest/generated_package.xml`
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(MANIFEST_DIR).join(MANIFEST_FILE)
    }

    /// Render one field file without writing it.
    pub fn render_field(&self, definition: &FieldDefinition) -> Result<RenderedFile> {
        Ok(RenderedFile {
            path: self.field_path(&definition.object, definition.full_name()),
            contents: definition.field.to_xml()?,
        })
    }

    /// Render the manifest without writing it.
    pub fn render_manifest(&self, manifest: &PackageManifest) -> Result<RenderedFile> {
        Ok(RenderedFile {
            path: self.manifest_path(),
            contents: manifest.to_xml()?,
        })
    }
}

/// A rendered document and the path it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl RenderedFile {
    /// Write the document, creating missing directories.
    pub fn write(&self) -> Result<()> {
        write_atomic(&self.path, &self.contents)?;
        tracing::debug!(path = %self.path.display(), "wrote file");
        Ok(())
    }
}

/// Write through a temporary file in the target directory and rename it into
/// place, so the target is either absent, the old file, or the full new file.
///
/// The file gets the same mode a plain `fs::write` would: 0666 less the umask.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| Error::from(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths() {
        let layout = OutputLayout::new("/work/project");
        assert_eq!(
            layout.field_path("Account", "Tier__c"),
            PathBuf::from("/work/project/force-app/main/default/objects/Account/fields/Tier__c.field-meta.xml")
        );
        assert_eq!(
            layout.manifest_path(),
            PathBuf::from("/work/project/manifest/generated_package.xml")
        );
    }

    #[test]
    fn test_render_and_write_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let layout = OutputLayout::new(temp_dir.path());

        let manifest =
            PackageManifest::new("62.0").add_type("CustomField", vec!["Account.A__c".to_string()]);
        let file = layout.render_manifest(&manifest).unwrap();
        assert_eq!(file.path, temp_dir.path().join("manifest/generated_package.xml"));
        assert!(!file.path.exists());

        file.write().unwrap();
        let written = std::fs::read_to_string(&file.path).unwrap();
        assert!(written.contains("<members>Account.A__c</members>"));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/file.xml");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_written_files_are_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("plain.xml");
        std::fs::write(&plain, "plain").unwrap();
        let atomic = temp_dir.path().join("out/atomic.xml");
        write_atomic(&atomic, "atomic").unwrap();

        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&atomic), mode(&plain));
        assert_ne!(mode(&atomic), 0o600);
    }
}
