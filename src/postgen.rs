//! Post-generation steps: build-cache copy, repository init, and dependency
//! installation.
//!
//! Each step is best-effort. A failure is logged, recorded as a shell
//! command the user can run by hand, and never aborts the run; the generated
//! tree on disk is already complete by the time these steps execute.

use std::path::Path;
use std::thread;

use log::{debug, warn};

use crate::constants::CACHE_DIR_ENV;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::ioutils;
use crate::project::{ProjectDescriptor, Variant};

/// Runs every post-generation step and returns the commands the user still
/// needs to run themselves.
pub fn run(
    descriptor: &mut ProjectDescriptor,
    install: Option<bool>,
    ctx: &ExecutionContext,
) -> Result<Vec<String>> {
    let mut missing = Vec::new();
    copy_build_cache(descriptor, ctx);
    init_repository(&descriptor.target_path, &mut missing);
    install_dependencies(descriptor, install, ctx, &mut missing)?;
    Ok(missing)
}

/// Copies a pre-built dependency cache over the project directory when
/// `KILN_CACHE_DIR` points at an existing directory, overwriting conflicts.
/// With a cache in place the install steps are skipped entirely.
fn copy_build_cache(descriptor: &mut ProjectDescriptor, ctx: &ExecutionContext) {
    let Some(cache_dir) = ctx.env.var(CACHE_DIR_ENV) else {
        return;
    };
    let source = Path::new(&cache_dir);
    if !source.is_dir() {
        debug!("{CACHE_DIR_ENV} set but {cache_dir} is not a directory, ignoring");
        return;
    }
    match ioutils::copy_dir_all(source, descriptor.target_path.as_path()) {
        Ok(()) => descriptor.cached_build_path = Some(source.to_path_buf()),
        Err(e) => warn!("could not copy build cache from {cache_dir}: {e}"),
    }
}

/// Initializes a git repository in the target directory, unless the target
/// is already inside one.
fn init_repository(target: &Path, missing: &mut Vec<String>) {
    if git2::Repository::discover(target).is_ok() {
        debug!("{} is already inside a git repository", target.display());
        return;
    }
    if let Err(e) = git2::Repository::init(target) {
        warn!("could not initialize a git repository: {e}");
        missing.push("$ git init".to_string());
    }
}

fn install_dependencies(
    descriptor: &ProjectDescriptor,
    install: Option<bool>,
    ctx: &ExecutionContext,
    missing: &mut Vec<String>,
) -> Result<()> {
    if descriptor.cached_build_path.is_some() {
        debug!("build cache in place, skipping dependency installation");
        return Ok(());
    }
    let install = match install {
        Some(decision) => decision,
        None => ctx.prompt.confirm("Fetch and install dependencies?", true)?,
    };
    if !install {
        missing.push("$ mix deps.get".to_string());
        return Ok(());
    }

    run_step(descriptor, ctx, &["deps.get"], missing);

    if !descriptor.asset_builders.is_empty() {
        // The installers share compiled deps; compiling castore up front
        // keeps the parallel installs from racing on it.
        run_step(descriptor, ctx, &["deps.compile", "castore"], missing);

        let target = descriptor.target_path.as_path();
        let shell = ctx.shell.as_ref();
        let results: Vec<(String, bool)> = thread::scope(|scope| {
            let handles: Vec<_> = descriptor
                .asset_builders
                .iter()
                .map(|builder| {
                    scope.spawn(move || {
                        let task = format!("{builder}.install");
                        let ok = shell
                            .run("mix", &[task.as_str()], target)
                            .unwrap_or(false);
                        (format!("$ mix {task}"), ok)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("install thread")).collect()
        });
        for (display, ok) in results {
            if !ok {
                warn!("{display} failed");
                missing.push(display);
            }
        }

        run_step(descriptor, ctx, &["deps.compile"], missing);
    }
    Ok(())
}

/// Runs one `mix` step, recording it as still-to-do when it fails.
fn run_step(
    descriptor: &ProjectDescriptor,
    ctx: &ExecutionContext,
    args: &[&str],
    missing: &mut Vec<String>,
) {
    let display = format!("$ mix {}", args.join(" "));
    match ctx.shell.run("mix", args, &descriptor.target_path) {
        Ok(true) => {}
        Ok(false) => {
            warn!("{display} exited with a failure");
            missing.push(display);
        }
        Err(e) => {
            warn!("{display} could not be run: {e}");
            missing.push(display);
        }
    }
}

/// The closing summary printed after generation, including any steps that
/// failed or were declined.
pub fn summary(descriptor: &ProjectDescriptor, missing: &[String]) -> String {
    let mut out = String::from("\nWe are almost there! The following steps are missing:\n\n");
    out.push_str(&format!("    $ cd {}\n", descriptor.target_path.display()));
    for step in missing {
        out.push_str(&format!("    {step}\n"));
    }
    if descriptor.features.ecto && descriptor.variant != Variant::Web {
        out.push_str(
            "\nThen configure your database in config/dev.exs and run:\n\n    $ mix ecto.create\n",
        );
    }
    if descriptor.variant != Variant::Ecto {
        out.push_str("\nStart your application with:\n\n    $ mix phx.server\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Args;

    fn descriptor(argv: &[&str]) -> ProjectDescriptor {
        let mut full = vec!["kiln"];
        full.extend_from_slice(argv);
        let args = Args::try_parse_from(full).unwrap();
        ProjectDescriptor::resolve(&args).unwrap()
    }

    #[test]
    fn summary_lists_missing_steps_in_order() {
        let descriptor = descriptor(&["hello_world"]);
        let missing = vec!["$ mix deps.get".to_string()];
        let summary = summary(&descriptor, &missing);
        let cd = summary.find("$ cd hello_world").unwrap();
        let deps = summary.find("$ mix deps.get").unwrap();
        assert!(cd < deps);
        assert!(summary.contains("$ mix ecto.create"));
        assert!(summary.contains("$ mix phx.server"));
    }

    #[test]
    fn summary_omits_ecto_without_ecto() {
        let descriptor = descriptor(&["hello_world", "--no-ecto"]);
        let summary = summary(&descriptor, &[]);
        assert!(!summary.contains("ecto.create"));
        assert!(summary.contains("$ mix phx.server"));
    }

    #[test]
    fn summary_for_ecto_only_has_no_server() {
        let descriptor = descriptor(&["hello_world", "--ecto-only"]);
        let summary = summary(&descriptor, &[]);
        assert!(summary.contains("$ mix ecto.create"));
        assert!(!summary.contains("phx.server"));
    }
}
