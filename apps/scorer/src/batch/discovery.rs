use std::io;
use std::path::{Path, PathBuf};

use crate::extraction::ResumeFormat;

/// A resume found on disk, with the format implied by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub path: PathBuf,
    pub format: ResumeFormat,
}

impl ResumeFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Lists resume files directly inside `dir` (no recursion).
///
/// Only lowercase `.pdf`, `.docx` and `.doc` extensions match. Files are grouped by
/// format in that order and sorted by name within a group.
pub fn discover_resumes(dir: &Path) -> io::Result<Vec<ResumeFile>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(format) = ResumeFormat::from_path(&path) {
            found.push(ResumeFile { path, format });
        }
    }

    let mut ordered = Vec::with_capacity(found.len());
    for format in ResumeFormat::ALL {
        let mut group: Vec<_> = found.iter().filter(|f| f.format == format).cloned().collect();
        group.sort_by_key(|f| f.file_name());
        ordered.extend(group);
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_discovery_groups_by_format_then_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["d.doc", "b.pdf", "c.docx", "a.pdf", "a.docx"] {
            touch(dir.path(), name);
        }

        let names: Vec<_> = discover_resumes(dir.path())
            .unwrap()
            .iter()
            .map(ResumeFile::file_name)
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "a.docx", "c.docx", "d.doc"]);
    }

    #[test]
    fn test_discovery_ignores_other_files_and_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "SHOUTY.PDF");
        touch(dir.path(), "Mixed.Docx");
        touch(dir.path(), "pdf");
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        std::fs::create_dir(dir.path().join("archive")).unwrap();
        touch(&dir.path().join("archive"), "old.pdf");

        assert!(discover_resumes(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discovered_file_carries_format() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "jane.docx");

        let files = discover_resumes(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].format, ResumeFormat::Docx);
        assert_eq!(files[0].path, dir.path().join("jane.docx"));
    }
}
