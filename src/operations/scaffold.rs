//! Scaffold operation module
//!
//! Creates a new package directory with a definitions file declaring one
//! model class, plus the blueprint boilerplate a package needs to serve
//! routes (`urls.py`, `views.py`, `utils.py`, `modules.py` and a page
//! template), then registers the package as enabled. The registry is not
//! touched; the next sync picks the new class up.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::common::string_utils::{is_camel_case, to_snake_case};
use crate::error::{self, Result};
use crate::project::Project;
use crate::store::{DEFAULT_VERSION, PackageDescriptor};
use crate::transaction::Transaction;

const GLOB_METACHARACTERS: &[char] = &['*', '?', '[', ']', '{', '}', '<', '>', '!'];

/// Configuration options for scaffolding
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Replace an existing package directory
    pub force: bool,
}

/// Result of scaffolding a package
#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    /// snake_case package directory name
    pub package: String,
    pub dir: PathBuf,
    /// Files written, in creation order
    pub files: Vec<PathBuf>,
    pub replaced: bool,
}

/// High-level scaffold operation
pub struct ScaffoldOperation<'a> {
    project: &'a Project,
    options: ScaffoldOptions,
}

impl<'a> ScaffoldOperation<'a> {
    pub fn new(project: &'a Project, options: ScaffoldOptions) -> Self {
        Self { project, options }
    }

    /// Directory a CamelCase name scaffolds into
    pub fn target_dir(&self, class_name: &str) -> PathBuf {
        self.project.packages_dir().join(to_snake_case(class_name))
    }

    /// Create the package for `class_name`
    pub fn execute(&self, class_name: &str) -> Result<ScaffoldOutcome> {
        if !is_camel_case(class_name) {
            return Err(error::package::invalid_name(class_name));
        }

        let config = &self.project.config;
        if config.definitions_file.contains(GLOB_METACHARACTERS) {
            return Err(error::config::invalid(format!(
                "definitions_file '{}' is a pattern; scaffolding needs a plain file name",
                config.definitions_file
            )));
        }

        let package = to_snake_case(class_name);
        let dir = self.target_dir(class_name);
        let replaced = dir.exists();
        if replaced && !self.options.force {
            return Err(error::package::exists(&package, self.project.relative(&dir)));
        }
        let descriptor = PackageDescriptor::new(
            &package,
            self.project.relative(&dir),
            true,
            DEFAULT_VERSION,
        )?;

        if replaced {
            info!(package = %package, "Overwriting existing package directory");
            fs::remove_dir_all(&dir)
                .map_err(|e| error::fs::io_error("Failed to remove existing package", e))?;
        }

        let mut transaction = Transaction::new();
        fs::create_dir_all(&dir).map_err(|e| error::fs::write_failed(&dir, e))?;
        transaction.track_dir_created(&dir);

        let definitions = definitions_template(
            class_name,
            &package,
            &config.base_import,
            &config.base_symbol,
        );
        let mut files: Vec<(PathBuf, String)> = boilerplate(&package)
            .into_iter()
            .filter(|(name, _)| *name != config.definitions_file)
            .map(|(name, content)| (dir.join(name), content))
            .collect();
        files.insert(1, (dir.join(&config.definitions_file), definitions));

        for (path, content) in &files {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| error::fs::write_failed(parent, e))?;
            }
            fs::write(path, content).map_err(|e| error::fs::write_failed(path, e))?;
            debug!(path = %path.display(), "Created file");
        }

        self.project
            .store()
            .register(descriptor, "Created Package")?;
        transaction.commit();
        info!(package = %package, "Scaffolded package");

        Ok(ScaffoldOutcome {
            package,
            dir,
            files: files.into_iter().map(|(path, _)| path).collect(),
            replaced,
        })
    }
}

/// Package files other than the definitions file, relative to the package
fn boilerplate(package: &str) -> Vec<(String, String)> {
    vec![
        ("__init__.py".to_string(), format!("# Package {package}\n")),
        (
            "urls.py".to_string(),
            format!(
                "# Define your routes here
from flask import Blueprint, request, jsonify

{package}_bp = Blueprint('{package}', __name__, url_prefix='/{package}')
"
            ),
        ),
        (
            "utils.py".to_string(),
            "# Define your utility functions here\n".to_string(),
        ),
        (
            "views.py".to_string(),
            "# Define your views here\nfrom flask import render_template, request\n".to_string(),
        ),
        (
            "modules.py".to_string(),
            format!(
                "# Register your blueprint here
from .urls import {package}_bp


def register():
    return {package}_bp
"
            ),
        ),
        (
            format!("templates/{package}.html"),
            format!(
                "<!DOCTYPE html>
<html lang='en'>
<head>
    <meta charset='UTF-8'>
    <meta name='viewport' content='width=device-width, initial-scale=1.0'>
    <title>{package}</title>
</head>
<body>
    <h1>{package}</h1>
</body>
</html>
"
            ),
        ),
    ]
}

fn definitions_template(
    class_name: &str,
    table: &str,
    base_import: &str,
    base_symbol: &str,
) -> String {
    format!(
        "# Define your models here
import uuid

from database.core import Mixin
{base_import}


class {class_name}(Mixin, {base_symbol}.Model):

    __tablename__ = '{table}'

    id = {base_symbol}.Column(
        {base_symbol}.String(36),
        primary_key=True,
        default=lambda: str(uuid.uuid4())
    )
",
        base_import = base_import.trim()
    )
}
