//! Generated file content
//!
//! Pure functions from resolved options to file content, invoked once each by
//! their pipeline steps. The pipeline treats the content as opaque.

use brokkr_core::ProjectOptions;
use chrono::{Datelike, Utc};
use serde_json::json;

use crate::error::Result;

/// Starter index page for the scaffolded project
pub fn starter_html(options: &ProjectOptions) -> String {
    let caps = options.template.capabilities();

    // Server-rendered templates load assets through the framework's static
    // route; plain frontends use relative paths.
    let asset_prefix = if caps.flask { "/static/" } else { "assets/" };

    let script_tag = if caps.js {
        format!("\n    <script src=\"{asset_prefix}js/script.js\" defer></script>")
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name}</title>
    <link rel="stylesheet" href="{asset_prefix}css/style.css">{script_tag}
</head>
<body>
    <header>
        <h1>{name}</h1>
    </header>
    <main>
        <p>Start building here.</p>
    </main>
    <footer>
        <p>&copy; {year} {name}</p>
    </footer>
</body>
</html>
"#,
        name = options.name,
        year = Utc::now().year(),
    )
}

/// VS Code settings for Python projects
///
/// Points the interpreter at the project's virtual environment; in Gitpod
/// mode the workspace interpreter is pre-provisioned, so the system
/// interpreter is referenced instead.
pub fn editor_settings(options: &ProjectOptions) -> Result<String> {
    let interpreter = if options.gitpod {
        "python3".to_string()
    } else {
        format!("./{}/bin/python", options.env_name)
    };

    let mut files_exclude = serde_json::Map::new();
    files_exclude.insert("**/__pycache__".to_string(), json!(true));
    if !options.gitpod {
        files_exclude.insert(format!("{}/", options.env_name), json!(true));
    }

    let settings = json!({
        "python.defaultInterpreterPath": interpreter,
        "python.terminal.activateEnvironment": true,
        "python.analysis.typeCheckingMode": "basic",
        "files.exclude": files_exclude,
    });

    Ok(serde_json::to_string_pretty(&settings)?)
}
