//! The generation pipeline: validate, render, write, then hand off to the
//! post-generation steps.

use log::{debug, info};

use crate::advisory::VersionCheck;
use crate::cli::Args;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::ioutils;
use crate::manifest;
use crate::postgen;
use crate::project::ProjectDescriptor;
use crate::renderer;
use crate::validation;

/// Runs the full pipeline for one invocation.
pub fn run(args: Args, ctx: &ExecutionContext) -> Result<()> {
    let advisory = VersionCheck::spawn();

    validation::check_runtime_version(ctx)?;
    let mut descriptor = ProjectDescriptor::resolve(&args)?;
    validation::validate(&descriptor, ctx)?;

    generate(&descriptor)?;
    let missing = postgen::run(&mut descriptor, args.install_decision(), ctx)?;
    println!("{}", postgen::summary(&descriptor, &missing));

    advisory.report();
    Ok(())
}

/// Renders and writes every manifest entry for the descriptor's variant.
/// All rendering is pure; two runs with the same descriptor produce
/// byte-identical trees.
pub fn generate(descriptor: &ProjectDescriptor) -> Result<()> {
    ioutils::create_dir_all(&descriptor.target_path)?;
    for section in manifest::manifest(descriptor.variant) {
        let prefix = renderer::render(section.prefix, &descriptor.bindings)?;
        for entry in section.entries {
            if !entry.include.evaluate(&descriptor.features) {
                debug!("skipping {}", entry.target);
                continue;
            }
            let relative = renderer::render(entry.target, &descriptor.bindings)?;
            let body = renderer::render(entry.template, &descriptor.bindings)?;
            let dest = descriptor.target_path.join(&prefix).join(&relative);
            ioutils::write_file(&body, &dest)?;
            info!("created {}", dest.display());
        }
    }
    Ok(())
}
