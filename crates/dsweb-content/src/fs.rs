//! Filesystem content source.

use std::fs;
use std::path::PathBuf;

use crate::scanner::Scanner;
use crate::source::{ContentError, ContentNode, ContentSource};

/// Content source backed by a directory of markdown files.
///
/// Every `.md` file below the root becomes one [`ContentNode`]. Reading is
/// strict: an unreadable directory or file, or malformed front matter, fails
/// the whole query.
pub struct FsContentSource {
    source_dir: PathBuf,
    edit_base_url: String,
    scanner: Scanner,
}

impl FsContentSource {
    /// Create a source for `source_dir`, building edit links below `edit_base_url`.
    #[must_use]
    pub fn new(source_dir: PathBuf, edit_base_url: impl Into<String>) -> Self {
        Self {
            scanner: Scanner::new(source_dir.clone()),
            source_dir,
            edit_base_url: edit_base_url.into(),
        }
    }
}

impl ContentSource for FsContentSource {
    fn query(&self) -> Result<Vec<ContentNode>, ContentError> {
        if !self.source_dir.is_dir() {
            return Err(ContentError::not_found(&self.source_dir));
        }

        let files = self.scanner.scan()?;
        tracing::debug!(
            root = %self.source_dir.display(),
            files = files.len(),
            "Scanned content directory"
        );

        files
            .into_iter()
            .map(|relative| {
                let full_path = self.source_dir.join(&relative);
                let text =
                    fs::read_to_string(&full_path).map_err(|e| ContentError::io(e, &full_path))?;
                ContentNode::from_markdown(relative, &text, &self.edit_base_url)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentErrorKind;

    #[test]
    fn test_query_reads_all_documents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("docs/10-core/10-records")).unwrap();
        fs::create_dir_all(root.join("docs/10-core/20-events")).unwrap();
        fs::write(
            root.join("docs/10-core/10-records/index.md"),
            "---\ntitle: Records\n---\nSync",
        )
        .unwrap();
        fs::write(
            root.join("docs/10-core/20-events/index.md"),
            "---\ntitle: Events\n---\nPubSub",
        )
        .unwrap();

        let source = FsContentSource::new(root.to_path_buf(), "https://example.com/edit/");
        let nodes = source.query().unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].title, "Records");
        assert_eq!(nodes[0].slug, "/docs/core/records/index.html");
        assert_eq!(
            nodes[0].github_link,
            "https://example.com/edit/docs/10-core/10-records/index.md"
        );
        assert_eq!(nodes[1].title, "Events");
    }

    #[test]
    fn test_query_missing_root_is_error() {
        let source = FsContentSource::new(PathBuf::from("/nonexistent/content"), "https://x");
        let err = source.query().unwrap_err();
        assert_eq!(err.kind(), &ContentErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_query_unreadable_subtree_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("docs/10-core/10-records")).unwrap();
        fs::create_dir_all(root.join("docs/20-secret")).unwrap();
        fs::write(root.join("docs/10-core/10-records/index.md"), "# Records").unwrap();
        fs::write(root.join("docs/20-secret/index.md"), "# Secret").unwrap();
        let secret = root.join("docs/20-secret");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

        let still_readable = fs::read_dir(&secret).is_ok();
        let result = FsContentSource::new(root.to_path_buf(), "https://x").query();
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o755)).unwrap();
        if still_readable {
            return;
        }

        let err = result.unwrap_err();
        assert_eq!(err.kind(), &ContentErrorKind::PermissionDenied);
    }

    #[test]
    fn test_query_malformed_front_matter_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("bad.md"), "---\ntitle: [x\n---\n").unwrap();

        let source = FsContentSource::new(temp_dir.path().to_path_buf(), "https://x");
        let err = source.query().unwrap_err();

        assert_eq!(err.kind(), &ContentErrorKind::InvalidFrontMatter);
    }
}
