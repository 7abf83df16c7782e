//! Best-effort check for a newer published release.
//!
//! The fetch runs on a background thread for the whole process lifetime and
//! is joined with a bounded timeout just before exit. Every failure mode
//! (network error, malformed response, timeout) is swallowed: this subsystem
//! never affects the exit code and never blocks generation.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{ADVISORY_JOIN_TIMEOUT_SECS, REGISTRY_URL};

#[derive(Deserialize)]
struct RegistryResponse {
    #[serde(rename = "crate")]
    krate: RegistryCrate,
}

#[derive(Deserialize)]
struct RegistryCrate {
    max_stable_version: Option<String>,
    max_version: String,
}

/// Handle to the in-flight background fetch. Dropping it without calling
/// [`VersionCheck::report`] cancels the pending result.
pub struct VersionCheck {
    receiver: mpsc::Receiver<String>,
}

impl VersionCheck {
    /// Starts the background fetch.
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            if let Some(latest) = fetch_latest_version(REGISTRY_URL) {
                let _ = sender.send(latest);
            }
        });
        VersionCheck { receiver }
    }

    /// Consumes the result exactly once, waiting at most a few seconds, and
    /// prints an upgrade notice when a newer release exists.
    pub fn report(self) {
        let current = env!("CARGO_PKG_VERSION");
        let timeout = Duration::from_secs(ADVISORY_JOIN_TIMEOUT_SECS);
        if let Ok(latest) = self.receiver.recv_timeout(timeout) {
            if is_newer(&latest, current) {
                println!(
                    "\nA new version of kiln is available: {latest} (you have {current}). Upgrade with:\n\n    $ cargo install kiln\n"
                );
            }
        }
    }
}

fn fetch_latest_version(url: &str) -> Option<String> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(5)))
        .build()
        .into();
    let mut response = agent
        .get(url)
        .header("user-agent", concat!("kiln/", env!("CARGO_PKG_VERSION")))
        .call()
        .ok()?;
    let body = response.body_mut().read_to_string().ok()?;
    parse_registry_document(&body)
}

fn parse_registry_document(body: &str) -> Option<String> {
    let doc: RegistryResponse = serde_json::from_str(body).ok()?;
    Some(doc.krate.max_stable_version.unwrap_or(doc.krate.max_version))
}

/// Parses the `major.minor.patch` core of a version, ignoring prerelease
/// and build-metadata suffixes.
pub(crate) fn parse_semver(version: &str) -> Option<(u64, u64, u64)> {
    let core = version.split(['-', '+']).next()?;
    let mut parts = core.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next().unwrap_or("0").parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

fn is_newer(candidate: &str, current: &str) -> bool {
    match (parse_semver(candidate), parse_semver(current)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}
