//! End-to-end tests driving the full pipeline with faked prompts,
//! environment, and subprocesses.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;

use kiln::cli::Args;
use kiln::context::{EnvSource, ExecutionContext, NameRegistry, Prompt, Shell};
use kiln::error::{Error, Result};
use kiln::generator;
use kiln::postgen;
use kiln::project::ProjectDescriptor;
use kiln::validation;

struct FakePrompt {
    answer: bool,
    asked: Arc<Mutex<Vec<String>>>,
}

impl FakePrompt {
    fn answering(answer: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
        let asked = Arc::new(Mutex::new(Vec::new()));
        (FakePrompt { answer, asked: asked.clone() }, asked)
    }
}

impl Prompt for FakePrompt {
    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        self.asked.lock().unwrap().push(message.to_string());
        Ok(self.answer)
    }
}

struct FakeEnv(HashMap<String, String>);

impl EnvSource for FakeEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Records every invocation; `run` always succeeds, `capture` reports a
/// modern Elixir toolchain.
struct FakeShell {
    invocations: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeShell {
    fn new() -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        let invocations = Arc::new(Mutex::new(Vec::new()));
        (FakeShell { invocations: invocations.clone() }, invocations)
    }
}

impl Shell for FakeShell {
    fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<bool> {
        let mut invocation = vec![program.to_string()];
        invocation.extend(args.iter().map(|s| s.to_string()));
        self.invocations.lock().unwrap().push(invocation);
        Ok(true)
    }

    fn capture(&self, _program: &str, _args: &[&str]) -> Result<String> {
        Ok("Erlang/OTP 26\n\nElixir 1.16.2 (compiled with Erlang/OTP 26)\n".to_string())
    }
}

struct EmptyRegistry;

impl NameRegistry for EmptyRegistry {
    fn exists(&self, _module: &str) -> bool {
        false
    }
}

fn ctx_answering(answer: bool, env: HashMap<String, String>) -> ExecutionContext {
    let (prompt, _) = FakePrompt::answering(answer);
    let (shell, _) = FakeShell::new();
    ExecutionContext::new(
        Box::new(prompt),
        Box::new(FakeEnv(env)),
        Box::new(shell),
        Box::new(EmptyRegistry),
    )
}

fn resolve(argv: &[&str]) -> ProjectDescriptor {
    let mut full = vec!["kiln"];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full).unwrap();
    ProjectDescriptor::resolve(&args).unwrap()
}

fn generate_into(dir: &Path, argv: &[&str]) -> (PathBuf, ProjectDescriptor) {
    let mut descriptor = resolve(argv);
    let target = dir.join(descriptor.app_name.clone());
    descriptor.target_path = target.clone();
    generator::generate(&descriptor).unwrap();
    (target, descriptor)
}

fn tree(root: &Path) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            files.push((relative, std::fs::read_to_string(entry.path()).unwrap()));
        }
    }
    files
}

#[test]
fn default_project_has_browser_routes() {
    let dir = tempfile::tempdir().unwrap();
    let (target, _) = generate_into(dir.path(), &["hello_world"]);

    let router =
        std::fs::read_to_string(target.join("lib/hello_world_web/router.ex")).unwrap();
    assert!(router.contains("defmodule HelloWorldWeb.Router"));
    assert!(router.contains("pipeline :browser"));
    assert!(router.contains(r#"get "/", PageController, :home"#));
    assert!(router.contains("pipeline :api"));
}

#[test]
fn no_html_project_is_api_only() {
    let dir = tempfile::tempdir().unwrap();
    let (target, _) = generate_into(dir.path(), &["hello_world", "--no-html"]);

    let router =
        std::fs::read_to_string(target.join("lib/hello_world_web/router.ex")).unwrap();
    assert!(!router.contains("pipeline :browser"));
    assert!(router.contains("pipeline :api"));

    assert!(!target.join("lib/hello_world_web/controllers/page_controller.ex").exists());
    assert!(!target.join("lib/hello_world_web/components/layouts.ex").exists());
    // Assets are implied off without HTML.
    assert!(!target.join("assets/js/app.js").exists());
}

#[test]
fn no_mailer_project_never_mentions_swoosh() {
    let dir = tempfile::tempdir().unwrap();
    let (target, _) = generate_into(dir.path(), &["hello_world", "--no-mailer"]);

    assert!(!target.join("lib/hello_world/mailer.ex").exists());
    for (path, body) in tree(&target) {
        assert!(
            !body.contains("swoosh") && !body.contains("Mailer"),
            "mailer leakage in {}",
            path.display()
        );
    }
}

#[test]
fn generation_is_deterministic() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let (target_a, _) = generate_into(dir_a.path(), &["hello_world", "--binary-id"]);
    let (target_b, _) = generate_into(dir_b.path(), &["hello_world", "--binary-id"]);

    assert_eq!(tree(&target_a), tree(&target_b));
}

#[test]
fn declined_overwrite_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("hello_world");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("precious.txt"), "keep me").unwrap();

    let mut descriptor = resolve(&["hello_world"]);
    descriptor.target_path = target.clone();
    let ctx = ctx_answering(false, HashMap::new());

    let err = validation::validate(&descriptor, &ctx).unwrap_err();
    assert!(matches!(err, Error::DirectoryExists { .. }));
    assert_eq!(std::fs::read_to_string(target.join("precious.txt")).unwrap(), "keep me");
    assert!(!target.join("mix.exs").exists());
}

#[test]
fn accepted_overwrite_proceeds() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("hello_world");
    std::fs::create_dir_all(&target).unwrap();

    let mut descriptor = resolve(&["hello_world"]);
    descriptor.target_path = target;
    let ctx = ctx_answering(true, HashMap::new());

    validation::validate(&descriptor, &ctx).unwrap();
}

#[test]
fn install_runs_builders_in_parallel_after_shared_prereq() {
    let dir = tempfile::tempdir().unwrap();
    let (_, mut descriptor) = generate_into(dir.path(), &["hello_world"]);
    descriptor.asset_builders =
        vec!["esbuild".to_string(), "tailwind".to_string(), "dart_sass".to_string()];

    let (prompt, _) = FakePrompt::answering(true);
    let (shell, invocations) = FakeShell::new();
    let ctx = ExecutionContext::new(
        Box::new(prompt),
        Box::new(FakeEnv(HashMap::new())),
        Box::new(shell),
        Box::new(EmptyRegistry),
    );

    let missing = postgen::run(&mut descriptor, Some(true), &ctx).unwrap();
    assert!(missing.is_empty());

    let recorded = invocations.lock().unwrap().clone();
    assert_eq!(recorded[0], vec!["mix", "deps.get"]);
    assert_eq!(recorded[1], vec!["mix", "deps.compile", "castore"]);
    let installs: Vec<&Vec<String>> =
        recorded.iter().filter(|i| i[1].ends_with(".install")).collect();
    assert_eq!(installs.len(), 3);
    assert_eq!(recorded.last().unwrap(), &vec!["mix", "deps.compile"]);
}

#[test]
fn declined_install_is_reported_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let (_, mut descriptor) = generate_into(dir.path(), &["hello_world"]);

    let ctx = ctx_answering(false, HashMap::new());
    let missing = postgen::run(&mut descriptor, None, &ctx).unwrap();
    assert_eq!(missing, vec!["$ mix deps.get".to_string()]);

    let summary = postgen::summary(&descriptor, &missing);
    assert!(summary.contains("$ mix deps.get"));
    assert!(summary.contains("$ mix phx.server"));
}

#[test]
fn missing_cache_directory_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (target, mut descriptor) = generate_into(dir.path(), &["hello_world"]);

    let env = HashMap::from([(
        "KILN_CACHE_DIR".to_string(),
        dir.path().join("no_such_cache").display().to_string(),
    )]);
    let ctx = ctx_answering(false, env);

    let missing = postgen::run(&mut descriptor, None, &ctx).unwrap();
    assert!(descriptor.cached_build_path.is_none());
    assert!(!target.join("_build").exists());
    // Without a cache the install prompt still applies.
    assert_eq!(missing, vec!["$ mix deps.get".to_string()]);
}

#[test]
fn populated_cache_skips_installation() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache");
    std::fs::create_dir_all(cache.join("_build/dev/lib")).unwrap();
    std::fs::write(cache.join("_build/dev/lib/marker.beam"), "compiled").unwrap();

    let (target, mut descriptor) = generate_into(dir.path(), &["hello_world"]);

    let env = HashMap::from([("KILN_CACHE_DIR".to_string(), cache.display().to_string())]);
    let (prompt, asked) = FakePrompt::answering(true);
    let (shell, _) = FakeShell::new();
    let ctx = ExecutionContext::new(
        Box::new(prompt),
        Box::new(FakeEnv(env)),
        Box::new(shell),
        Box::new(EmptyRegistry),
    );

    let missing = postgen::run(&mut descriptor, None, &ctx).unwrap();
    assert!(missing.is_empty());
    assert_eq!(descriptor.cached_build_path, Some(cache.clone()));
    assert_eq!(
        std::fs::read_to_string(target.join("_build/dev/lib/marker.beam")).unwrap(),
        "compiled"
    );
    // With a cache the install prompt is never shown.
    assert!(asked.lock().unwrap().is_empty());
}

#[test]
fn web_only_project_stands_alone() {
    let dir = tempfile::tempdir().unwrap();
    let (target, _) = generate_into(dir.path(), &["hello_web", "--web-only"]);

    assert!(target.join("lib/hello_web/endpoint.ex").is_file());
    assert!(target.join("lib/hello_web/application.ex").is_file());
    // No core-app artifacts.
    assert!(!target.join("lib/hello_web/repo.ex").exists());
    let mix = std::fs::read_to_string(target.join("mix.exs")).unwrap();
    assert!(mix.contains("app: :hello_web"));
    assert!(!mix.contains("in_umbrella"));
}
