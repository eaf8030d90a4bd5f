//! Template directory resolution
//!
//! Templates live on disk under a single root: one directory per archetype
//! plus a `common` directory copied into every project. The root is resolved
//! from the `BROKKR_TEMPLATES_DIR` environment override, falling back to a
//! `templates/` directory next to the installed binary's prefix.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use brokkr_core::TemplateChoice;

use crate::error::{Error, Result};

/// Environment variable overriding the templates root
pub const TEMPLATES_DIR_ENV: &str = "BROKKR_TEMPLATES_DIR";

/// Resolved template directories for one scaffold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    /// Starter files for the selected archetype
    pub template_dir: Utf8PathBuf,

    /// Files copied into every project regardless of archetype
    pub common_dir: Utf8PathBuf,
}

impl TemplateLayout {
    /// Backend subtree of the template, where the archetype carries one
    pub fn backend_dir(&self) -> Utf8PathBuf {
        self.template_dir.join("backend")
    }

    /// Frontend subtree of the template, where the archetype carries one
    pub fn frontend_dir(&self) -> Utf8PathBuf {
        self.template_dir.join("frontend")
    }
}

/// Determine the templates root
///
/// Checks `BROKKR_TEMPLATES_DIR` first, then falls back to
/// `<install prefix>/templates` derived from the running executable
/// (`<prefix>/bin/brokkr` → `<prefix>/templates`).
pub fn templates_root() -> Result<Utf8PathBuf> {
    if let Ok(root) = std::env::var(TEMPLATES_DIR_ENV) {
        if !root.is_empty() {
            return Ok(Utf8PathBuf::from(root));
        }
    }

    let exe = std::env::current_exe()?;
    let exe = Utf8PathBuf::from_path_buf(exe)
        .map_err(|p| Error::template_not_found(p.display().to_string()))?;

    exe.parent()
        .and_then(|bin| bin.parent())
        .map(|prefix| prefix.join("templates"))
        .ok_or_else(|| Error::template_not_found(exe.as_str()))
}

/// Resolve and validate the directory layout for a template choice
///
/// Both directories must exist and be readable before the pipeline starts;
/// an unreadable directory aborts the run.
pub fn resolve_layout(root: &Utf8Path, template: TemplateChoice) -> Result<TemplateLayout> {
    let template_dir = root.join(template.dir_name());
    let common_dir = root.join("common");

    for dir in [&template_dir, &common_dir] {
        std::fs::read_dir(dir).map_err(|_| Error::template_not_found(dir.as_str()))?;
    }

    debug!(template = %template, dir = %template_dir, "template layout resolved");
    Ok(TemplateLayout {
        template_dir,
        common_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root_with(dirs: &[&str]) -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        for dir in dirs {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        (temp, root)
    }

    #[test]
    fn test_resolve_layout_for_each_archetype() {
        let (_temp, root) = root_with(&["frontend", "dcd", "fsf", "common"]);

        for choice in TemplateChoice::all() {
            let layout = resolve_layout(&root, choice).unwrap();
            assert_eq!(layout.template_dir, root.join(choice.dir_name()));
            assert_eq!(layout.common_dir, root.join("common"));
        }
    }

    #[test]
    fn test_missing_template_dir_is_rejected() {
        let (_temp, root) = root_with(&["common"]);

        let err = resolve_layout(&root, TemplateChoice::Frontend).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }

    #[test]
    fn test_missing_common_dir_is_rejected() {
        let (_temp, root) = root_with(&["frontend"]);

        let err = resolve_layout(&root, TemplateChoice::Frontend).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }

    #[test]
    fn test_subtree_views() {
        let (_temp, root) = root_with(&["fsf", "common"]);

        let layout = resolve_layout(&root, TemplateChoice::FullStack).unwrap();
        assert_eq!(layout.backend_dir(), root.join("fsf/backend"));
        assert_eq!(layout.frontend_dir(), root.join("fsf/frontend"));
    }
}
