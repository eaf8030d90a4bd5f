//! Filesystem materializer: no-clobber copies and generated writes

use camino::Utf8Path;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Counts for one recursive copy
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyStats {
    /// Files written to the destination
    pub copied: usize,
    /// Files left untouched because the destination already had them
    pub skipped: usize,
}

/// Recursively copy `src` into `dst` without overwriting existing files
///
/// Destination directories are created as needed; a destination file that
/// already exists is never replaced.
pub fn copy_dir_no_clobber(src: &Utf8Path, dst: &Utf8Path) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    copy_recurse(src.as_std_path(), dst.as_std_path(), &mut stats)?;

    debug!(
        src = %src,
        dst = %dst,
        copied = stats.copied,
        skipped = stats.skipped,
        "copy complete"
    );
    Ok(stats)
}

fn copy_recurse(src: &Path, dst: &Path, stats: &mut CopyStats) -> Result<()> {
    std::fs::create_dir_all(dst)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_recurse(&from, &to, stats)?;
        } else if to.exists() {
            stats.skipped += 1;
        } else {
            std::fs::copy(&from, &to)?;
            stats.copied += 1;
        }
    }

    Ok(())
}

/// Write the project README
pub fn write_readme(target: &Utf8Path, name: &str) -> Result<()> {
    let content = format!("# Welcome to the {name} Project\n");
    std::fs::write(target.join("README.md"), content)?;
    Ok(())
}

/// Write generated file content, creating parent directories as needed
pub fn write_generated(path: &Utf8Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_copy_recurses_into_subdirectories() {
        let temp = TempDir::new().unwrap();
        let base = utf8(&temp);
        let src = base.join("src");
        let dst = base.join("dst");

        std::fs::create_dir_all(src.join("assets/css")).unwrap();
        std::fs::write(src.join("index.txt"), "top").unwrap();
        std::fs::write(src.join("assets/css/style.css"), "body {}").unwrap();

        let stats = copy_dir_no_clobber(&src, &dst).unwrap();

        assert_eq!(stats.copied, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(
            std::fs::read_to_string(dst.join("assets/css/style.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn test_copy_never_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        let base = utf8(&temp);
        let src = base.join("src");
        let dst = base.join("dst");

        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(src.join("config.txt"), "template default").unwrap();
        std::fs::write(dst.join("config.txt"), "user customized").unwrap();

        let stats = copy_dir_no_clobber(&src, &dst).unwrap();

        assert_eq!(stats.copied, 0);
        assert_eq!(stats.skipped, 1);
        assert_eq!(
            std::fs::read_to_string(dst.join("config.txt")).unwrap(),
            "user customized"
        );
    }

    #[test]
    fn test_copy_is_rerunnable() {
        let temp = TempDir::new().unwrap();
        let base = utf8(&temp);
        let src = base.join("src");
        let dst = base.join("dst");

        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("a.txt"), "a").unwrap();

        let first = copy_dir_no_clobber(&src, &dst).unwrap();
        let second = copy_dir_no_clobber(&src, &dst).unwrap();

        assert_eq!(first.copied, 1);
        assert_eq!(second.copied, 0);
        assert_eq!(second.skipped, 1);
    }

    #[test]
    fn test_readme_contains_project_name() {
        let temp = TempDir::new().unwrap();
        let base = utf8(&temp);

        write_readme(&base, "Demo").unwrap();

        let content = std::fs::read_to_string(base.join("README.md")).unwrap();
        assert!(content.contains("Demo"));
    }

    #[test]
    fn test_write_generated_creates_parents() {
        let temp = TempDir::new().unwrap();
        let base = utf8(&temp);
        let path = base.join(".vscode/settings.json");

        write_generated(&path, "{}").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }
}
