use std::path::Path;
use std::process::{Command, Stdio};

use crate::constants::KNOWN_MODULES;
use crate::error::{Error, Result};

/// Interactive yes/no confirmations.
pub trait Prompt {
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Environment-variable lookup.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Subprocess invocation. `Sync` so parallel install steps can share one
/// instance across threads.
pub trait Shell: Sync {
    /// Runs a command with inherited stdio; `Ok(true)` on a zero exit status.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<bool>;

    /// Runs a command capturing its stdout.
    fn capture(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Answers whether a module name already resolves to a known symbol.
pub trait NameRegistry {
    fn exists(&self, module: &str) -> bool;
}

/// Bundles every ambient capability the pipeline touches, so tests can
/// substitute fakes for the console, environment, and subprocesses.
pub struct ExecutionContext {
    pub prompt: Box<dyn Prompt>,
    pub env: Box<dyn EnvSource>,
    pub shell: Box<dyn Shell>,
    pub registry: Box<dyn NameRegistry>,
}

impl ExecutionContext {
    pub fn new(
        prompt: Box<dyn Prompt>,
        env: Box<dyn EnvSource>,
        shell: Box<dyn Shell>,
        registry: Box<dyn NameRegistry>,
    ) -> Self {
        Self { prompt, env, shell, registry }
    }

    pub fn production() -> Self {
        Self::new(
            Box::new(TerminalPrompt),
            Box::new(ProcessEnv),
            Box::new(SystemShell),
            Box::new(KnownModules),
        )
    }
}

/// Production prompt backed by dialoguer.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| Error::Other(anyhow::anyhow!(e)))
    }
}

/// Production environment lookup backed by the process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Production shell backed by `std::process::Command`.
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .status()?;
        Ok(status.success())
    }

    fn capture(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(Error::Environment {
                message: format!("`{program}` exited with {}", output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Production name registry: a fixed table of well-known module names.
/// There is no live Elixir node to consult at generation time, so collisions
/// are checked against the names every project would see at boot.
pub struct KnownModules;

impl NameRegistry for KnownModules {
    fn exists(&self, module: &str) -> bool {
        KNOWN_MODULES.contains(&module)
    }
}
