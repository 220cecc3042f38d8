use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A page text file discovered under a batch root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub path: PathBuf,
    /// Path below the batch root; the report mirrors it under the output dir
    pub relative: PathBuf,
}

/// Find every `*.txt` file under `root`, sorted by path.
///
/// Hidden files and directories (leading `.`) are skipped, as are
/// unreadable entries.
pub fn scan_pages(root: &Path) -> Vec<PageFile> {
    let mut pages: Vec<PageFile> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_hidden(e.file_name().to_str().unwrap_or("")))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let path = e.into_path();
            if path.extension().and_then(|x| x.to_str()) != Some("txt") {
                return None;
            }
            let relative = path.strip_prefix(root).ok()?.to_path_buf();
            Some(PageFile { path, relative })
        })
        .collect();

    pages.sort_by(|a, b| a.path.cmp(&b.path));
    pages
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_txt_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("news/2024")).unwrap();
        fs::write(dir.path().join("b.txt"), "Bo").unwrap();
        fs::write(dir.path().join("news/2024/a.txt"), "Ada").unwrap();
        fs::write(dir.path().join("news/notes.md"), "skip").unwrap();

        let pages = scan_pages(dir.path());
        let relative: Vec<&Path> = pages.iter().map(|p| p.relative.as_path()).collect();
        assert_eq!(relative, vec![Path::new("b.txt"), Path::new("news/2024/a.txt")]);
    }

    #[test]
    fn skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache/old.txt"), "x").unwrap();
        fs::write(dir.path().join(".draft.txt"), "x").unwrap();
        fs::write(dir.path().join("page.txt"), "x").unwrap();

        let pages = scan_pages(dir.path());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].relative, PathBuf::from("page.txt"));
    }

    #[test]
    fn same_file_name_in_two_directories_stays_distinct() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/index.txt"), "x").unwrap();
        fs::write(dir.path().join("b/index.txt"), "y").unwrap();

        let pages = scan_pages(dir.path());
        let relative: Vec<&Path> = pages.iter().map(|p| p.relative.as_path()).collect();
        assert_eq!(relative, vec![Path::new("a/index.txt"), Path::new("b/index.txt")]);
    }

    #[test]
    fn missing_root_is_empty() {
        assert!(scan_pages(Path::new("/nonexistent/pages")).is_empty());
    }
}
