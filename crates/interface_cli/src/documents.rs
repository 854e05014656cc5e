//! Local files as claim documents
//!
//! Only file metadata is read. The workflow never looks at content.

use std::path::Path;

use domain_claims::DocumentDescriptor;

use crate::error::CliError;

/// Describes the file at `path` as a claim document
///
/// # Errors
///
/// Returns `CliError::Document` if the metadata cannot be read and
/// `CliError::NotAFile` for directories and other non-regular files.
pub fn describe_path(path: &Path) -> Result<DocumentDescriptor, CliError> {
    let metadata = std::fs::metadata(path).map_err(|source| CliError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(CliError::NotAFile(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let document = DocumentDescriptor::new(name).with_size(metadata.len());
    Ok(match media_type_for(path) {
        Some(media_type) => document.with_media_type(media_type),
        None => document,
    })
}

/// Describes every path, failing on the first unreadable one
pub fn describe_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DocumentDescriptor>, CliError> {
    paths.iter().map(|p| describe_path(p.as_ref())).collect()
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match extension.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "json" => "application/json",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn manifest() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
    }

    #[test]
    fn test_describe_existing_file() {
        let document = describe_path(&manifest()).unwrap();
        assert_eq!(document.name, "Cargo.toml");
        assert!(document.size_bytes.unwrap() > 0);
        assert!(document.media_type.is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = describe_path(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, CliError::Document { .. }));
    }

    #[test]
    fn test_directory_rejected() {
        let err = describe_path(Path::new(env!("CARGO_MANIFEST_DIR"))).unwrap_err();
        assert!(matches!(err, CliError::NotAFile(_)));
    }

    #[test]
    fn test_media_types() {
        assert_eq!(media_type_for(Path::new("a/FORM.PDF")), Some("application/pdf"));
        assert_eq!(media_type_for(Path::new("bumper.jpeg")), Some("image/jpeg"));
        assert_eq!(media_type_for(Path::new("notes")), None);
    }
}
