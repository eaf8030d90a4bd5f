//! Scaffold a new project
//!
//! Resolves options (flags, then prompts, then defaults), resolves the
//! template layout, and drives the pipeline with console progress
//! reporting. Fatal failures print a marked error line and exit non-zero;
//! recoverable step failures are surfaced and the run continues.

use anyhow::Result;
use camino::Utf8PathBuf;
use indicatif::ProgressBar;
use tracing::debug;

use brokkr_core::{RawOptions, TemplateChoice};
use brokkr_projects::pipeline::{self, Reporter};
use brokkr_projects::provider;

use crate::cli::NewArgs;
use crate::output;
use crate::prompts::DialoguerPrompter;

pub async fn run(args: NewArgs) -> Result<()> {
    output::header("Create New Project");

    let template = match args.template.as_deref() {
        Some(ident) => match ident.parse::<TemplateChoice>() {
            Ok(choice) => Some(choice),
            Err(err) => fatal(&err),
        },
        None => None,
    };

    let raw = RawOptions {
        name: args.name,
        template,
        git: args.git,
        clean: args.clean,
        gitpod: args.gitpod,
        skip_prompts: args.skip,
        install: args.install,
    };

    let mut prompter = DialoguerPrompter;
    let options = match brokkr_core::resolve(raw, &mut prompter) {
        Ok(options) => options,
        Err(err) => fatal(&err),
    };

    let root = match provider::templates_root() {
        Ok(root) => root,
        Err(err) => fatal(&err),
    };
    debug!("templates root: {}", root);

    let layout = match provider::resolve_layout(&root, options.template) {
        Ok(layout) => layout,
        Err(err) => fatal(&err),
    };

    output::kv("Project name", &options.name);
    output::kv("Template", options.template.label());
    println!();

    let base = current_dir()?;
    let mut reporter = ConsoleReporter::default();
    let outcome = pipeline::run(options, &layout, &base, &mut reporter).await;

    if let Some(err) = outcome.fatal {
        fatal(&err);
    }

    println!();
    output::success("Project ready");

    if let Some(target) = &outcome.options.target_directory {
        println!();
        output::info("Next steps:");
        println!("  1. cd {}", outcome.options.dir_slug());
        if outcome.options.create_env == Some(true) {
            println!("  2. source {}/bin/activate", outcome.options.env_name);
        }
        debug!("project created at {}", target);
    }

    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("current directory is not valid UTF-8: {}", p.display()))
}

/// Print a marked error line and terminate with a non-zero status
fn fatal(err: &dyn std::fmt::Display) -> ! {
    output::error(&err.to_string());
    std::process::exit(1);
}

/// Renders pipeline progress with the shared output helpers
#[derive(Default)]
struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn step_started(&mut self, title: &str) {
        self.spinner = Some(output::spinner(title));
    }

    fn step_completed(&mut self, title: &str) {
        self.clear_spinner();
        output::success(title);
    }

    fn step_skipped(&mut self, title: &str, reason: &str) {
        output::skipped(title, reason);
    }

    fn step_failed(&mut self, title: &str, error: &brokkr_projects::Error, fatal: bool) {
        self.clear_spinner();
        if fatal {
            output::error(title);
        } else {
            output::warning(&format!("{title}: {error}"));
        }
    }
}
