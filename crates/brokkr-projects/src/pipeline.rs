//! Task pipeline
//!
//! A fixed, ordered sequence of named steps executed strictly sequentially
//! against one shared [`ProjectOptions`]. Each step declares:
//!
//! - `enabled`: evaluated first; a disabled step is omitted from the report
//!   entirely, not merely skipped
//! - `skip`: evaluated immediately before the action; a returned reason
//!   suppresses the action and is surfaced verbatim
//! - `policy`: whether a failure aborts the run (`Fatal`) or is logged and
//!   the pipeline continues (`Recoverable`)
//!
//! Predicates are synchronous and side-effect-free; every action is awaited
//! to completion before the next step's predicates run. The options object
//! is only written by the directory-creation step, which records the
//! resolved `target_directory` and, on precondition failure, `error`.

use camino::Utf8Path;
use tracing::{debug, warn};

use brokkr_core::ProjectOptions;

use crate::error::{Error, Result};
use crate::provider::TemplateLayout;
use crate::{fsops, generate, git, install, pyenv};

/// Whether a step failure aborts the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the pipeline and exit non-zero
    Fatal,
    /// Log the failure and continue with the next step
    Recoverable,
}

/// Identity of each pipeline step, in fixed execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    CreateProjectDir,
    WriteReadme,
    CopyTemplateFiles,
    WriteStarterTemplate,
    WriteEditorSettings,
    CopyCommonFiles,
    CreateVirtualEnv,
    InitGit,
    InstallDependencies,
}

impl StepKind {
    /// The fixed pipeline order
    pub fn all() -> Vec<Self> {
        vec![
            Self::CreateProjectDir,
            Self::WriteReadme,
            Self::CopyTemplateFiles,
            Self::WriteStarterTemplate,
            Self::WriteEditorSettings,
            Self::CopyCommonFiles,
            Self::CreateVirtualEnv,
            Self::InitGit,
            Self::InstallDependencies,
        ]
    }

    /// Human-readable step title
    pub fn title(&self, options: &ProjectOptions) -> String {
        match self {
            Self::CreateProjectDir => format!("Creating {} project structure", options.name),
            Self::WriteReadme => "Creating README file".to_string(),
            Self::CopyTemplateFiles => "Copying project files".to_string(),
            Self::WriteStarterTemplate => "Making starting templates".to_string(),
            Self::WriteEditorSettings => "Generating editor settings".to_string(),
            Self::CopyCommonFiles => "Copying common files".to_string(),
            Self::CreateVirtualEnv => {
                format!("Creating virtual environment '{}'", options.env_name)
            }
            Self::InitGit => "Setting up git".to_string(),
            Self::InstallDependencies => "Installing dependencies".to_string(),
        }
    }

    /// Declared failure policy, evaluated uniformly by the driver
    pub fn policy(&self) -> FailurePolicy {
        match self {
            Self::CreateVirtualEnv | Self::InitGit => FailurePolicy::Recoverable,
            _ => FailurePolicy::Fatal,
        }
    }

    /// Whether the step participates in this run at all
    pub fn enabled(&self, options: &ProjectOptions) -> bool {
        match self {
            Self::WriteEditorSettings => options.template.capabilities().python,
            Self::CreateVirtualEnv => {
                options.needs_python_env() && options.create_env == Some(true)
            }
            Self::InitGit => options.git,
            _ => true,
        }
    }

    /// Reason to skip the action, surfaced in the step report
    pub fn skip(&self, options: &ProjectOptions) -> Option<String> {
        match self {
            Self::InstallDependencies if !options.install => {
                Some("Pass --install to automatically install dependencies".to_string())
            }
            _ => None,
        }
    }
}

/// Per-step outcome in the run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Skipped(String),
    Failed(String),
}

/// One entry of the run report
#[derive(Debug, Clone)]
pub struct StepReport {
    pub kind: StepKind,
    pub title: String,
    pub status: StepStatus,
}

/// Progress sink for the pipeline driver
///
/// The CLI renders these events with its terminal output helpers; tests use
/// [`NullReporter`].
pub trait Reporter {
    fn step_started(&mut self, _title: &str) {}
    fn step_completed(&mut self, _title: &str) {}
    fn step_skipped(&mut self, _title: &str, _reason: &str) {}
    fn step_failed(&mut self, _title: &str, _error: &Error, _fatal: bool) {}
}

/// Reporter that discards all progress events
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Result of one pipeline run
#[derive(Debug)]
pub struct RunOutcome {
    /// Final state of the options object (carries `target_directory`/`error`)
    pub options: ProjectOptions,
    /// One entry per enabled step, in execution order
    pub reports: Vec<StepReport>,
    /// The error that aborted the run, if any
    pub fatal: Option<Error>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.fatal.is_none()
    }

    /// Look up the report entry for a step, if it was enabled
    pub fn report_for(&self, kind: StepKind) -> Option<&StepReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }
}

/// Run the fixed pipeline against resolved options
///
/// `base_dir` is the directory the project directory is created under; the
/// layout must already be validated (see [`crate::provider::resolve_layout`]).
pub async fn run(
    options: ProjectOptions,
    layout: &TemplateLayout,
    base_dir: &Utf8Path,
    reporter: &mut dyn Reporter,
) -> RunOutcome {
    let mut options = options;
    let mut reports = Vec::new();

    debug!(
        template_dir = %layout.template_dir,
        common_dir = %layout.common_dir,
        backend_dir = %layout.backend_dir(),
        frontend_dir = %layout.frontend_dir(),
        "starting pipeline"
    );

    for kind in StepKind::all() {
        if !kind.enabled(&options) {
            debug!(step = ?kind, "step disabled");
            continue;
        }

        let title = kind.title(&options);

        if let Some(reason) = kind.skip(&options) {
            reporter.step_skipped(&title, &reason);
            reports.push(StepReport {
                kind,
                title,
                status: StepStatus::Skipped(reason),
            });
            continue;
        }

        reporter.step_started(&title);

        match execute(kind, &mut options, layout, base_dir).await {
            Ok(()) => {
                reporter.step_completed(&title);
                reports.push(StepReport {
                    kind,
                    title,
                    status: StepStatus::Completed,
                });
            }
            Err(err) => match kind.policy() {
                FailurePolicy::Fatal => {
                    reporter.step_failed(&title, &err, true);
                    reports.push(StepReport {
                        kind,
                        title,
                        status: StepStatus::Failed(err.to_string()),
                    });
                    return RunOutcome {
                        options,
                        reports,
                        fatal: Some(err),
                    };
                }
                FailurePolicy::Recoverable => {
                    warn!(step = ?kind, error = %err, "step failed, continuing");
                    reporter.step_failed(&title, &err, false);
                    reports.push(StepReport {
                        kind,
                        title,
                        status: StepStatus::Failed(err.to_string()),
                    });
                }
            },
        }
    }

    RunOutcome {
        options,
        reports,
        fatal: None,
    }
}

async fn execute(
    kind: StepKind,
    options: &mut ProjectOptions,
    layout: &TemplateLayout,
    base_dir: &Utf8Path,
) -> Result<()> {
    match kind {
        StepKind::CreateProjectDir => create_project_dir(options, layout, base_dir),
        StepKind::WriteReadme => fsops::write_readme(target(options)?, &options.name),
        StepKind::CopyTemplateFiles => {
            fsops::copy_dir_no_clobber(&layout.template_dir, target(options)?).map(|_| ())
        }
        StepKind::WriteStarterTemplate => write_starter_template(options),
        StepKind::WriteEditorSettings => write_editor_settings(options),
        StepKind::CopyCommonFiles => {
            fsops::copy_dir_no_clobber(&layout.common_dir, target(options)?).map(|_| ())
        }
        StepKind::CreateVirtualEnv => {
            pyenv::create_virtualenv(target(options)?, &options.env_name).await
        }
        StepKind::InitGit => git::setup(target(options)?).await,
        StepKind::InstallDependencies => install::install_dependencies(target(options)?).await,
    }
}

/// Derive the target directory from the project name and create it
///
/// An existing target is only acceptable while empty; anything else records
/// the precondition failure on the options and aborts.
fn create_project_dir(
    options: &mut ProjectOptions,
    layout: &TemplateLayout,
    base_dir: &Utf8Path,
) -> Result<()> {
    let target = base_dir.join(options.dir_slug());

    if target.exists() {
        let occupied = std::fs::read_dir(&target)?.next().is_some();
        if occupied {
            options.error = true;
            return Err(Error::directory_exists(target.as_str()));
        }
    }

    std::fs::create_dir_all(&target)?;

    options.target_directory = Some(target);
    options.template_directory = Some(layout.template_dir.clone());
    options.common_dir = Some(layout.common_dir.clone());
    Ok(())
}

fn write_starter_template(options: &ProjectOptions) -> Result<()> {
    let html = generate::starter_html(options);

    // Server-rendered templates live under the framework's templates
    // directory; everything else gets a top-level index page.
    let relative = if options.template.capabilities().flask {
        "templates/index.html"
    } else {
        "index.html"
    };

    fsops::write_generated(&target(options)?.join(relative), &html)
}

fn write_editor_settings(options: &ProjectOptions) -> Result<()> {
    let settings = generate::editor_settings(options)?;
    fsops::write_generated(&target(options)?.join(".vscode/settings.json"), &settings)
}

fn target(options: &ProjectOptions) -> Result<&Utf8Path> {
    options
        .target_directory
        .as_deref()
        .ok_or_else(|| Error::Io(std::io::Error::other("target directory not yet resolved")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brokkr_core::TemplateChoice;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    /// Templates root with starter files, plus an empty base dir to run in
    fn fixture(temp: &TempDir) -> (TemplateLayout, Utf8PathBuf) {
        let root = utf8(temp).join("templates");

        for dir in ["frontend", "dcd", "fsf", "common"] {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        std::fs::create_dir_all(root.join("frontend/assets/css")).unwrap();
        std::fs::write(root.join("frontend/assets/css/style.css"), "body {}").unwrap();
        std::fs::write(root.join("dcd/app.py"), "app = None\n").unwrap();
        std::fs::write(root.join("dcd/requirements.txt"), "flask\n").unwrap();
        std::fs::write(root.join("common/.editorconfig"), "root = true\n").unwrap();

        let base = utf8(temp).join("work");
        std::fs::create_dir_all(&base).unwrap();

        let layout = crate::provider::resolve_layout(&root, TemplateChoice::Frontend).unwrap();
        (layout, base)
    }

    fn options(name: &str, template: TemplateChoice) -> ProjectOptions {
        ProjectOptions {
            name: name.to_string(),
            template,
            git: false,
            clean: false,
            gitpod: false,
            skip_prompts: true,
            install: false,
            env: None,
            env_name: "env".to_string(),
            create_env: None,
            target_directory: None,
            template_directory: None,
            common_dir: None,
            error: false,
        }
    }

    fn layout_for(temp: &TempDir, template: TemplateChoice) -> (TemplateLayout, Utf8PathBuf) {
        let (_, base) = fixture(temp);
        let root = utf8(temp).join("templates");
        (
            crate::provider::resolve_layout(&root, template).unwrap(),
            base,
        )
    }

    #[tokio::test]
    async fn test_frontend_scaffold_end_to_end() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = fixture(&temp);

        let outcome = run(
            options("Demo", TemplateChoice::Frontend),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        assert!(outcome.is_success());
        let target = base.join("demo");
        assert_eq!(outcome.options.target_directory.as_deref(), Some(&*target));

        let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
        assert!(readme.contains("Demo"));

        // Template and common files land; no git directory; no settings.
        assert!(target.join("assets/css/style.css").exists());
        assert!(target.join(".editorconfig").exists());
        assert!(target.join("index.html").exists());
        assert!(!target.join(".git").exists());
        assert!(!target.join(".vscode/settings.json").exists());
    }

    #[tokio::test]
    async fn test_target_directory_is_slugged() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = fixture(&temp);

        let outcome = run(
            options("My Cool App", TemplateChoice::Frontend),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        assert!(outcome.is_success());
        assert!(base.join("my-cool-app").is_dir());
    }

    #[tokio::test]
    async fn test_python_template_generates_editor_settings() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = layout_for(&temp, TemplateChoice::DataCentric);

        let outcome = run(
            options("Data Thing", TemplateChoice::DataCentric),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        assert!(outcome.is_success());
        let target = base.join("data-thing");
        assert!(target.join(".vscode/settings.json").exists());

        // Flask capability routes the starter page into templates/.
        assert!(target.join("templates/index.html").exists());
        assert!(!target.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_occupied_target_aborts_fatally() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = fixture(&temp);

        let target = base.join("demo");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("precious.txt"), "keep me").unwrap();

        let outcome = run(
            options("Demo", TemplateChoice::Frontend),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        assert!(!outcome.is_success());
        assert!(outcome.options.error);
        assert!(matches!(
            outcome.fatal,
            Some(Error::DirectoryExists { .. })
        ));

        // Only the failed first step is in the report; nothing ran after it.
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(
            std::fs::read_to_string(target.join("precious.txt")).unwrap(),
            "keep me"
        );
    }

    #[tokio::test]
    async fn test_empty_existing_target_is_acceptable() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = fixture(&temp);

        std::fs::create_dir_all(base.join("demo")).unwrap();

        let outcome = run(
            options("Demo", TemplateChoice::Frontend),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        assert!(outcome.is_success());
        assert!(base.join("demo/README.md").exists());
    }

    #[tokio::test]
    async fn test_disabled_steps_are_absent_from_report() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = fixture(&temp);

        let outcome = run(
            options("Demo", TemplateChoice::Frontend),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        assert!(outcome.report_for(StepKind::InitGit).is_none());
        assert!(outcome.report_for(StepKind::WriteEditorSettings).is_none());
        assert!(outcome.report_for(StepKind::CreateVirtualEnv).is_none());
    }

    #[tokio::test]
    async fn test_install_step_reports_skip_reason() {
        let temp = TempDir::new().unwrap();
        let (layout, base) = fixture(&temp);

        let outcome = run(
            options("Demo", TemplateChoice::Frontend),
            &layout,
            &base,
            &mut NullReporter,
        )
        .await;

        let report = outcome.report_for(StepKind::InstallDependencies).unwrap();
        match &report.status {
            StepStatus::Skipped(reason) => assert!(reason.contains("--install")),
            other => panic!("expected skipped install step, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_policies() {
        assert_eq!(StepKind::CreateProjectDir.policy(), FailurePolicy::Fatal);
        assert_eq!(StepKind::CopyTemplateFiles.policy(), FailurePolicy::Fatal);
        assert_eq!(StepKind::InitGit.policy(), FailurePolicy::Recoverable);
        assert_eq!(StepKind::CreateVirtualEnv.policy(), FailurePolicy::Recoverable);
        assert_eq!(
            StepKind::InstallDependencies.policy(),
            FailurePolicy::Fatal
        );
    }

    #[test]
    fn test_fixed_order_starts_with_directory_creation() {
        let order = StepKind::all();
        assert_eq!(order.first(), Some(&StepKind::CreateProjectDir));
        assert_eq!(order.last(), Some(&StepKind::InstallDependencies));
        assert_eq!(order.len(), 9);
    }
}
