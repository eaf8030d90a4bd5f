//! Option resolution
//!
//! Merges three layered sources into one configuration object, in priority
//! order: explicit flags, interactive answers, hard-coded defaults.
//! Resolution is an explicit fold over ordered phases; each phase is a
//! transform `(options, prompter) -> options` that only asks for what is
//! still missing, so a flag or an earlier answer always wins over a default
//! and no question is ever asked twice.

use camino::Utf8PathBuf;
use tracing::debug;

use crate::error::{Error, Result};
use crate::template::TemplateChoice;

/// Default virtual-environment folder name
pub const DEFAULT_ENV_NAME: &str = "env";

/// Answer source for the interactive resolution phases
///
/// The binary crate implements this with dialoguer; tests script it. An
/// implementation is expected to re-prompt locally on empty input, but
/// resolution still validates every returned answer.
pub trait Prompter {
    /// Ask for a free-form, non-empty line of input
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Ask the user to pick a template from the archetype menu
    fn select_template(&mut self) -> Result<TemplateChoice>;
}

/// Raw flag layer, straight out of argument parsing
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub name: Option<String>,
    pub template: Option<TemplateChoice>,
    pub git: bool,
    pub clean: bool,
    pub gitpod: bool,
    pub skip_prompts: bool,
    pub install: bool,
}

/// Fully-resolved configuration, consumed by every pipeline step
///
/// Created once by [`resolve`] and then only touched by the
/// directory-creation step, which records `target_directory` and `error`.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Project name (non-empty)
    pub name: String,

    /// Selected template archetype
    pub template: TemplateChoice,

    /// Initialize a git repository after scaffolding
    pub git: bool,

    /// Clean-template flag
    pub clean: bool,

    /// Gitpod environment mode: suppresses all virtual-environment handling
    pub gitpod: bool,

    /// Interactive prompts were skipped
    pub skip_prompts: bool,

    /// Install dependencies after scaffolding
    pub install: bool,

    /// Whether a virtual environment already exists (None: never asked)
    pub env: Option<bool>,

    /// Virtual-environment folder name
    pub env_name: String,

    /// Whether to create a virtual environment (None: never asked)
    pub create_env: Option<bool>,

    /// Resolved target directory; set by the directory-creation step
    pub target_directory: Option<Utf8PathBuf>,

    /// Resolved template directory; set before the pipeline starts
    pub template_directory: Option<Utf8PathBuf>,

    /// Resolved common-files directory; set before the pipeline starts
    pub common_dir: Option<Utf8PathBuf>,

    /// Set when the directory-creation precondition failed
    pub error: bool,
}

impl ProjectOptions {
    /// Directory name derived from the project name
    pub fn dir_slug(&self) -> String {
        slug(&self.name)
    }

    /// Whether this project wants local virtual-environment handling
    pub fn needs_python_env(&self) -> bool {
        self.template.capabilities().python && !self.gitpod
    }

    fn from_raw(raw: &RawOptions, name: String, template: TemplateChoice) -> Self {
        Self {
            name,
            template,
            git: raw.git,
            clean: raw.clean,
            gitpod: raw.gitpod,
            skip_prompts: raw.skip_prompts,
            install: raw.install,
            env: None,
            env_name: DEFAULT_ENV_NAME.to_string(),
            create_env: None,
            target_directory: None,
            template_directory: None,
            common_dir: None,
            error: false,
        }
    }
}

/// Resolve flags, answers, and defaults into a complete [`ProjectOptions`]
pub fn resolve(raw: RawOptions, prompter: &mut dyn Prompter) -> Result<ProjectOptions> {
    let opts = resolve_core(raw, prompter)?;
    let opts = resolve_env_detection(opts, prompter)?;
    let opts = resolve_env_setup(opts, prompter)?;

    debug!(
        name = %opts.name,
        template = %opts.template,
        git = opts.git,
        gitpod = opts.gitpod,
        "options resolved"
    );
    Ok(opts)
}

/// Core phase: name, template, gitpod, and git
///
/// With `--skip` this short-circuits: the template falls back to the default
/// archetype and `clean` is derived from the presence of a template flag
/// (an explicit `--clean` still wins). Otherwise only the missing subset of
/// questions is asked.
fn resolve_core(raw: RawOptions, prompter: &mut dyn Prompter) -> Result<ProjectOptions> {
    if raw.skip_prompts {
        let name = non_empty(raw.name.clone().unwrap_or_default())
            .map_err(|_| Error::validation("a project name is required when prompts are skipped"))?;
        let template = raw.template.unwrap_or_default();
        let clean = raw.clean || raw.template.is_some();

        let mut opts = ProjectOptions::from_raw(&raw, name, template);
        opts.clean = clean;
        return Ok(opts);
    }

    let name = match raw.name.clone() {
        Some(n) if !n.trim().is_empty() => n,
        _ => non_empty(prompter.input("What is the name of this amazing project")?)?,
    };

    let template = match raw.template {
        Some(t) => t,
        None => prompter.select_template()?,
    };

    let gitpod = raw.gitpod || prompter.confirm("Are you using Gitpod?", false)?;
    let git = raw.git || prompter.confirm("Initialize a git repository?", true)?;

    let mut opts = ProjectOptions::from_raw(&raw, name, template);
    opts.gitpod = gitpod;
    opts.git = git;
    Ok(opts)
}

/// Environment-detection phase
///
/// Emits its single question only when the template carries Python and the
/// target runtime is not Gitpod-provisioned.
fn resolve_env_detection(
    mut opts: ProjectOptions,
    prompter: &mut dyn Prompter,
) -> Result<ProjectOptions> {
    if opts.skip_prompts || !opts.needs_python_env() {
        return Ok(opts);
    }

    opts.env = Some(prompter.confirm(
        "Have you created a virtual environment for your project?",
        false,
    )?);
    Ok(opts)
}

/// Environment-setup phase
///
/// Two conditionally-emitted questions: whether to create an environment
/// (none exists yet and the project needs one), and the folder name of an
/// existing one.
fn resolve_env_setup(
    mut opts: ProjectOptions,
    prompter: &mut dyn Prompter,
) -> Result<ProjectOptions> {
    if opts.skip_prompts || opts.gitpod {
        return Ok(opts);
    }

    if opts.env == Some(false) && opts.template.capabilities().python {
        opts.create_env = Some(prompter.confirm("Do you want us to create one for you?", true)?);
    }

    if opts.env == Some(true) {
        opts.env_name = non_empty(
            prompter.input("What is the name of the folder for your virtual environment")?,
        )?;
    }

    Ok(opts)
}

/// Lower-case a project name and collapse non-alphanumeric runs into single
/// separators; leading and trailing runs are dropped.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    out
}

fn non_empty(answer: String) -> Result<String> {
    if answer.trim().is_empty() {
        return Err(Error::validation("answer must not be empty"));
    }
    Ok(answer)
}
