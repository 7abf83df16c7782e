//! Constants used throughout the kiln application

/// Environment variable naming a pre-built dependency cache directory.
pub const CACHE_DIR_ENV: &str = "KILN_CACHE_DIR";

/// Application names that collide with built-in infrastructure concepts.
pub const RESERVED_APP_NAMES: &[&str] =
    &["server", "table", "mix", "elixir", "eex", "otp", "kiln"];

/// Asset builder tools installed when assets are enabled.
pub const DEFAULT_ASSET_BUILDERS: &[&str] = &["esbuild", "tailwind"];

/// Minimum supported Elixir toolchain version.
pub const MIN_ELIXIR_VERSION: (u64, u64, u64) = (1, 15, 0);

/// Elixir requirement written into generated mix files.
pub const ELIXIR_REQUIREMENT: &str = "~> 1.15";

/// Registry endpoint consulted by the version advisory.
pub const REGISTRY_URL: &str = "https://crates.io/api/v1/crates/kiln";

/// Bound on how long the advisory result is awaited at shutdown.
pub const ADVISORY_JOIN_TIMEOUT_SECS: u64 = 3;

/// Module names that always resolve in a freshly booted Elixir node, and so
/// can never be claimed by a generated project.
pub const KNOWN_MODULES: &[&str] = &[
    "Kernel",
    "Elixir",
    "Mix",
    "Ecto",
    "Phoenix",
    "Plug",
    "Application",
    "Supervisor",
    "GenServer",
    "Agent",
    "Task",
    "Registry",
    "Node",
    "System",
    "String",
    "Enum",
    "Map",
    "Keyword",
    "Logger",
    "Config",
];

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
