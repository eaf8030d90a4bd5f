//! # brokkr-projects
//!
//! Execution engine for the Brokkr CLI providing:
//! - The task pipeline: a fixed, ordered step sequence with per-step
//!   `enabled`/`skip` predicates and declared failure policies
//! - Filesystem materializer (no-clobber copies, README, generated files)
//! - Template directory resolution and validation
//! - git, virtual-environment, and dependency-install adapters
//!
//! # Examples
//!
//! ```no_run
//! use brokkr_core::ProjectOptions;
//! use brokkr_projects::{pipeline, provider};
//! use camino::Utf8Path;
//!
//! # async fn example(options: ProjectOptions) -> brokkr_projects::Result<()> {
//! let root = provider::templates_root()?;
//! let layout = provider::resolve_layout(&root, options.template)?;
//!
//! let outcome = pipeline::run(
//!     options,
//!     &layout,
//!     Utf8Path::new("."),
//!     &mut pipeline::NullReporter,
//! )
//! .await;
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fsops;
pub mod generate;
pub mod git;
pub mod install;
pub mod pipeline;
pub mod provider;
pub mod pyenv;

pub use error::{Error, Result};
pub use pipeline::{
    FailurePolicy, NullReporter, Reporter, RunOutcome, StepKind, StepReport, StepStatus,
};
pub use provider::{resolve_layout, templates_root, TemplateLayout};
