use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Expand command-line paths: files are kept as given, directories are
/// walked recursively for files ending in `.{ext}`. Walk failures are
/// returned alongside the files that were found.
pub fn collect(paths: &[PathBuf], ext: &str) -> (Vec<PathBuf>, Vec<(PathBuf, io::Error)>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, ext, &mut files, &mut errors);
        } else {
            files.push(path.clone());
        }
    }
    (files, errors)
}

fn walk(
    dir: &Path,
    ext: &str,
    files: &mut Vec<PathBuf>,
    errors: &mut Vec<(PathBuf, io::Error)>,
) {
    let listing = std::fs::read_dir(dir).and_then(|entries| {
        entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()
    });
    let mut entries = match listing {
        Ok(entries) => entries,
        Err(e) => {
            errors.push((dir.to_path_buf(), e));
            return;
        }
    };
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(&path, ext, files, errors);
        } else if has_extension(&path, ext) {
            files.push(path);
        }
    }
}

pub fn has_extension(path: &Path, ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Read a source file. Legacy pages are often not UTF-8; invalid bytes
/// are replaced rather than rejected.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("site/default.asp"), "asp"));
        assert!(has_extension(Path::new("site/DEFAULT.ASP"), "asp"));
        assert!(has_extension(Path::new("lib.inc"), ".inc"));
        assert!(!has_extension(Path::new("site/default.aspx"), "asp"));
        assert!(!has_extension(Path::new("asp"), "asp"));
    }

    #[test]
    fn test_walk_finds_nested_files() {
        let root = std::env::temp_dir().join(format!("vbscribble-walk-{}", std::process::id()));
        let nested = root.join("inc");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("b.asp"), "").unwrap();
        std::fs::write(root.join("a.txt"), "").unwrap();
        std::fs::write(nested.join("c.asp"), "").unwrap();

        let (files, errors) = collect(&[root.clone()], "asp");
        std::fs::remove_dir_all(&root).unwrap();

        assert!(errors.is_empty());
        assert_eq!(files, vec![root.join("b.asp"), nested.join("c.asp")]);
    }
}
