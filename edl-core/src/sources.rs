use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CoreError;

/// One `.edl` file collected from a source root, with its path
/// relative to that root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Recursively collect every `.edl` file under `root`.
pub fn collect_sources(root: impl AsRef<Path>) -> Result<Vec<SourceFile>, CoreError> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "edl") {
            let contents = fs::read_to_string(path)?;
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            files.push(SourceFile {
                path: relative,
                contents,
            });
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_edl_files_recursively_with_relative_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).expect("create nested dir");
        fs::write(dir.path().join("app.edl"), "entity A { }").expect("write root file");
        fs::write(nested.join("more.edl"), "entity B { }").expect("write nested file");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write unrelated file");

        let files = collect_sources(dir.path()).expect("collect");
        let paths: Vec<_> = files.iter().map(|file| file.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("app.edl"), PathBuf::from("nested/more.edl")]);
        assert_eq!(files[0].contents, "entity A { }");
    }

    #[test]
    fn missing_root_yields_no_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = collect_sources(dir.path().join("absent")).expect("collect");
        assert!(files.is_empty());
    }
}
