//! Template archetypes and their capability table

use serde::{Deserialize, Serialize};

/// Project template archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateChoice {
    /// Static frontend project (HTML/CSS)
    Frontend,
    /// Frontend project with JavaScript interactivity
    InteractiveFrontend,
    /// Data-centric application backed by Flask
    DataCentric,
    /// Full-stack application backed by Django
    FullStack,
}

/// Capability flags that gate pipeline steps for a template
///
/// These replace per-template conditionals: a step asks the capability table,
/// never the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Project carries a Python backend
    pub python: bool,
    /// Backend is Django
    pub django: bool,
    /// Backend is Flask (server-rendered templates directory)
    pub flask: bool,
    /// Project ships JavaScript
    pub js: bool,
}

impl TemplateChoice {
    /// Get all available template archetypes, in menu order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Frontend,
            Self::InteractiveFrontend,
            Self::DataCentric,
            Self::FullStack,
        ]
    }

    /// Get the canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::InteractiveFrontend => "interactive",
            Self::DataCentric => "dcd",
            Self::FullStack => "fsf",
        }
    }

    /// Human-readable label shown in the template selection menu
    pub fn label(&self) -> &'static str {
        match self {
            Self::Frontend => "User Centric Frontend (MS1)",
            Self::InteractiveFrontend => "Interactive Frontend (MS2)",
            Self::DataCentric => "Data Centric Development (MS3)",
            Self::FullStack => "Full Stack Frameworks (MS4)",
        }
    }

    /// Name of the template directory under the templates root
    ///
    /// Both frontend archetypes share one set of starter files; interactivity
    /// is a capability, not a separate file tree.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Frontend | Self::InteractiveFrontend => "frontend",
            Self::DataCentric => "dcd",
            Self::FullStack => "fsf",
        }
    }

    /// Capability table for this archetype
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Frontend => Capabilities::default(),
            Self::InteractiveFrontend => Capabilities {
                js: true,
                ..Capabilities::default()
            },
            Self::DataCentric => Capabilities {
                python: true,
                flask: true,
                js: true,
                django: false,
            },
            Self::FullStack => Capabilities {
                python: true,
                django: true,
                flask: false,
                js: true,
            },
        }
    }

    /// Get identifier aliases accepted on the command line
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Frontend => vec!["ucfd", "ms1"],
            Self::InteractiveFrontend => vec!["ifd", "ms2", "interactive-frontend"],
            Self::DataCentric => vec!["data-centric", "ms3"],
            Self::FullStack => vec!["full-stack", "ms4"],
        }
    }

    /// Parse from string, checking aliases
    pub fn from_str_with_aliases(s: &str) -> Option<Self> {
        let s_lower = s.to_lowercase();

        for choice in Self::all() {
            if choice.as_str() == s_lower {
                return Some(choice);
            }

            for alias in choice.aliases() {
                if alias == s_lower {
                    return Some(choice);
                }
            }
        }

        None
    }
}

/// The `--skip` default archetype
impl Default for TemplateChoice {
    fn default() -> Self {
        Self::Frontend
    }
}

impl std::fmt::Display for TemplateChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TemplateChoice {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_aliases(s).ok_or_else(|| {
            crate::error::Error::unknown_template(
                s,
                Self::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })
    }
}
