//! Descriptor validation.
//!
//! Checks run in a fixed order so the most actionable error surfaces first:
//! reserved name, app-name format, target-directory conflict, module-name
//! format, module-name availability. All checks are read-only; nothing is
//! written before every check passes.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::advisory::parse_semver;
use crate::constants::{MIN_ELIXIR_VERSION, RESERVED_APP_NAMES};
use crate::context::{ExecutionContext, NameRegistry, Prompt};
use crate::error::{Error, Result};
use crate::project::ProjectDescriptor;

const APP_NAME_PATTERN: &str = "^[a-z][a-z0-9_]*$";
const MODULE_NAME_PATTERN: &str = r"^[A-Z]\w*(\.[A-Z]\w*)*$";

fn app_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(APP_NAME_PATTERN).expect("app name pattern"))
}

fn module_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MODULE_NAME_PATTERN).expect("module name pattern"))
}

pub fn validate(descriptor: &ProjectDescriptor, ctx: &ExecutionContext) -> Result<()> {
    check_reserved_name(&descriptor.app_name)?;
    check_app_name(&descriptor.app_name, descriptor.app_name_explicit)?;
    confirm_target_directory(&descriptor.target_path, ctx.prompt.as_ref())?;
    check_module_name(&descriptor.module_name)?;
    check_module_available(&descriptor.module_name, ctx.registry.as_ref())?;
    Ok(())
}

pub fn check_reserved_name(app_name: &str) -> Result<()> {
    if RESERVED_APP_NAMES.contains(&app_name) {
        return Err(Error::ReservedName { name: app_name.to_string() });
    }
    Ok(())
}

pub fn check_app_name(app_name: &str, explicit: bool) -> Result<()> {
    if app_name_regex().is_match(app_name) {
        return Ok(());
    }
    let reason = if explicit {
        "it must start with a lowercase letter and contain only lowercase \
         letters, digits, and underscores"
            .to_string()
    } else {
        "the name was inferred from the path; pass --app with a valid name \
         (lowercase letters, digits, and underscores)"
            .to_string()
    };
    Err(Error::InvalidAppName { name: app_name.to_string(), reason })
}

/// An existing target directory is a confirmation prompt, not an error.
/// Continuing overwrites conflicting files without backup.
pub fn confirm_target_directory(target: &Path, prompt: &dyn Prompt) -> Result<()> {
    if !target.exists() {
        return Ok(());
    }
    let proceed = prompt.confirm(
        &format!(
            "The directory {} already exists. Are you sure you want to continue?",
            target.display()
        ),
        false,
    )?;
    if !proceed {
        return Err(Error::DirectoryExists { path: target.display().to_string() });
    }
    Ok(())
}

pub fn check_module_name(module_name: &str) -> Result<()> {
    if module_name_regex().is_match(module_name) {
        return Ok(());
    }
    Err(Error::InvalidModuleName { name: module_name.to_string() })
}

/// The module name and every hierarchical prefix must be free in the
/// registry: `Phoenix.Sub` is taken when `Phoenix` already resolves.
pub fn check_module_available(
    module_name: &str,
    registry: &dyn NameRegistry,
) -> Result<()> {
    let mut prefix = String::new();
    for segment in module_name.split('.') {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);
        if registry.exists(&prefix) {
            return Err(Error::ModuleNameTaken { name: prefix });
        }
    }
    Ok(())
}

/// Fatal runtime gate, checked before any other work: the external Elixir
/// toolchain must be present and recent enough to build what we generate.
pub fn check_runtime_version(ctx: &ExecutionContext) -> Result<()> {
    let output = ctx.shell.capture("elixir", &["--version"]).map_err(|_| {
        Error::Environment {
            message: "the `elixir` executable was not found on PATH".to_string(),
        }
    })?;
    let version = extract_elixir_version(&output).ok_or_else(|| Error::Environment {
        message: format!("could not determine the Elixir version from {:?}", output.trim()),
    })?;
    if version < MIN_ELIXIR_VERSION {
        let (major, minor, patch) = MIN_ELIXIR_VERSION;
        return Err(Error::Environment {
            message: format!(
                "Elixir {}.{}.{} found, but at least {major}.{minor}.{patch} is required",
                version.0, version.1, version.2
            ),
        });
    }
    Ok(())
}

fn extract_elixir_version(output: &str) -> Option<(u64, u64, u64)> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Elixir "))
        .and_then(|rest| parse_semver(rest.split_whitespace().next()?))
}
