use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    std::fs::create_dir_all(dest_path.as_ref()).map_err(Error::Io)
}

/// Writes a file, creating parent directories as needed. Existing files are
/// overwritten without diffing.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::Io)
}

/// Recursively copies the contents of `source` into `dest`, overwriting
/// conflicting files.
pub fn copy_dir_all<P: AsRef<Path>>(source: P, dest: P) -> Result<()> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    for entry in WalkDir::new(source) {
        let entry = entry
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        let relative = entry.path().strip_prefix(source).map_err(|e| {
            Error::Other(anyhow::anyhow!("entry escapes its root directory: {e}"))
        })?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target).map_err(Error::Io)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a/b/c.txt");
        write_file("hello", &dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "hello");
    }

    #[test]
    fn copy_dir_all_copies_and_overwrites() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write_file("one", source.path().join("x/one.txt")).unwrap();
        write_file("two", source.path().join("two.txt")).unwrap();
        write_file("stale", dest.path().join("two.txt")).unwrap();

        copy_dir_all(source.path(), dest.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.path().join("x/one.txt")).unwrap(),
            "one"
        );
        assert_eq!(std::fs::read_to_string(dest.path().join("two.txt")).unwrap(), "two");
    }
}
