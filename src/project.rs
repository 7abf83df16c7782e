use std::path::PathBuf;

use clap::ValueEnum;
use serde_json::json;

use crate::cli::Args;
use crate::constants::{DEFAULT_ASSET_BUILDERS, ELIXIR_REQUIREMENT};
use crate::error::Result;
use crate::names;
use crate::renderer::Bindings;

/// Database adapters with a closed option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Database {
    Postgres,
    Mysql,
    Mssql,
    Sqlite3,
}

impl Database {
    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Postgres => "postgres",
            Database::Mysql => "mysql",
            Database::Mssql => "mssql",
            Database::Sqlite3 => "sqlite3",
        }
    }

    pub fn adapter_module(&self) -> &'static str {
        match self {
            Database::Postgres => "Ecto.Adapters.Postgres",
            Database::Mysql => "Ecto.Adapters.MyXQL",
            Database::Mssql => "Ecto.Adapters.Tds",
            Database::Sqlite3 => "Ecto.Adapters.SQLite3",
        }
    }

    pub fn dep(&self) -> &'static str {
        match self {
            Database::Postgres => r#"{:postgrex, ">= 0.0.0"}"#,
            Database::Mysql => r#"{:myxql, ">= 0.0.0"}"#,
            Database::Mssql => r#"{:tds, ">= 0.0.0"}"#,
            Database::Sqlite3 => r#"{:ecto_sqlite3, ">= 0.0.0"}"#,
        }
    }

    /// Repo options written into `config/dev.exs`.
    pub fn dev_opts(&self, app: &str) -> String {
        match self {
            Database::Postgres => format!(
                r#"username: "postgres", password: "postgres", hostname: "localhost", database: "{app}_dev", pool_size: 10"#
            ),
            Database::Mysql => format!(
                r#"username: "root", password: "", hostname: "localhost", database: "{app}_dev", pool_size: 10"#
            ),
            Database::Mssql => format!(
                r#"username: "sa", password: "some!Password", hostname: "localhost", database: "{app}_dev", pool_size: 10"#
            ),
            Database::Sqlite3 => {
                format!(r#"database: Path.expand("../{app}_dev.db", __DIR__), pool_size: 5"#)
            }
        }
    }

    /// Repo options written into `config/test.exs`.
    pub fn test_opts(&self, app: &str) -> String {
        match self {
            Database::Postgres => format!(
                r#"username: "postgres", password: "postgres", hostname: "localhost", database: "{app}_test", pool: Ecto.Adapters.SQL.Sandbox"#
            ),
            Database::Mysql => format!(
                r#"username: "root", password: "", hostname: "localhost", database: "{app}_test", pool: Ecto.Adapters.SQL.Sandbox"#
            ),
            Database::Mssql => format!(
                r#"username: "sa", password: "some!Password", hostname: "localhost", database: "{app}_test", pool: Ecto.Adapters.SQL.Sandbox"#
            ),
            Database::Sqlite3 => format!(
                r#"database: Path.expand("../{app}_test.db", __DIR__), pool: Ecto.Adapters.SQL.Sandbox"#
            ),
        }
    }
}

/// HTTP server adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum HttpAdapter {
    Bandit,
    Cowboy,
}

impl HttpAdapter {
    pub fn module(&self) -> &'static str {
        match self {
            HttpAdapter::Bandit => "Bandit.PhoenixAdapter",
            HttpAdapter::Cowboy => "Phoenix.Endpoint.Cowboy2Adapter",
        }
    }

    pub fn dep(&self) -> &'static str {
        match self {
            HttpAdapter::Bandit => r#"{:bandit, "~> 1.5"}"#,
            HttpAdapter::Cowboy => r#"{:plug_cowboy, "~> 2.7"}"#,
        }
    }
}

/// Which shape of project gets generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// A full single-application project.
    App,
    /// An umbrella with core and web child applications.
    Umbrella,
    /// A web-only application, for use inside an existing umbrella.
    Web,
    /// A core application with Ecto but no web layer.
    Ecto,
}

/// Feature toggles, default-on except `binary_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub ecto: bool,
    pub html: bool,
    pub gettext: bool,
    pub mailer: bool,
    pub assets: bool,
    pub binary_id: bool,
}

/// Names a single toggle, for per-file inclusion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Ecto,
    Html,
    Gettext,
    Mailer,
    Assets,
    BinaryId,
}

impl Features {
    pub fn enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Ecto => self.ecto,
            Feature::Html => self.html,
            Feature::Gettext => self.gettext,
            Feature::Mailer => self.mailer,
            Feature::Assets => self.assets,
            Feature::BinaryId => self.binary_id,
        }
    }
}

/// The resolved, immutable set of project options driving generation.
///
/// Constructed once from CLI arguments, validated read-only, enriched once
/// with `cached_build_path` after the cache-copy step, then discarded.
#[derive(Debug)]
pub struct ProjectDescriptor {
    pub app_name: String,
    pub module_name: String,
    pub target_path: PathBuf,
    pub variant: Variant,
    pub features: Features,
    pub database: Database,
    pub adapter: HttpAdapter,
    pub asset_builders: Vec<String>,
    pub bindings: Bindings,
    pub cached_build_path: Option<PathBuf>,
    pub app_name_explicit: bool,
}

fn toggle(on: bool, off: bool, default: bool) -> bool {
    if off {
        false
    } else if on {
        true
    } else {
        default
    }
}

impl ProjectDescriptor {
    /// Merges CLI flags with defaults into a descriptor. Contradictory
    /// feature combinations are allowed; the per-file inclusion rules and
    /// in-template conditionals absorb them.
    pub fn resolve(args: &Args) -> Result<Self> {
        let variant = args.variant();
        let app_name = names::derive_app_name(&args.path, args.app.as_deref())?;
        let module_name = names::derive_module_name(&app_name, args.module.as_deref(), None);

        let mut features = Features {
            ecto: toggle(args.ecto, args.no_ecto, true),
            html: toggle(args.html, args.no_html, true),
            gettext: toggle(args.gettext, args.no_gettext, true),
            mailer: toggle(args.mailer, args.no_mailer, true),
            assets: toggle(args.assets, args.no_assets, true),
            binary_id: args.binary_id,
        };
        match variant {
            Variant::Ecto => {
                features.html = false;
                features.gettext = false;
                features.mailer = false;
            }
            Variant::Web => {
                features.ecto = false;
                features.mailer = false;
            }
            Variant::App | Variant::Umbrella => {}
        }
        if !features.html {
            features.assets = false;
        }

        let asset_builders: Vec<String> = if features.assets {
            DEFAULT_ASSET_BUILDERS.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let (web_app, web_module) = match variant {
            // A web-only app is itself the web application.
            Variant::Web => (app_name.clone(), module_name.clone()),
            _ => (format!("{app_name}_web"), format!("{module_name}Web")),
        };

        let bindings = compute_bindings(
            &app_name,
            &module_name,
            &web_app,
            &web_module,
            variant,
            &features,
            args.database,
            args.adapter,
            &asset_builders,
        );

        Ok(ProjectDescriptor {
            app_name,
            module_name,
            target_path: args.path.clone(),
            variant,
            features,
            database: args.database,
            adapter: args.adapter,
            asset_builders,
            bindings,
            cached_build_path: None,
            app_name_explicit: args.app.is_some(),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn compute_bindings(
    app_name: &str,
    module_name: &str,
    web_app: &str,
    web_module: &str,
    variant: Variant,
    features: &Features,
    database: Database,
    adapter: HttpAdapter,
    asset_builders: &[String],
) -> Bindings {
    let endpoint_in_app = variant == Variant::App;
    let web = variant != Variant::Ecto;

    // Supervision children are pre-joined here because Elixir lists reject
    // trailing commas, which per-line conditionals cannot express.
    let mut children = Vec::new();
    if features.ecto {
        children.push(format!("{module_name}.Repo"));
    }
    if endpoint_in_app {
        children.push(format!("{web_module}.Endpoint"));
    }

    let mut bindings = Bindings::new();
    bindings.insert("app".into(), json!(app_name));
    bindings.insert("module".into(), json!(module_name));
    bindings.insert("web_app".into(), json!(web_app));
    bindings.insert("web_module".into(), json!(web_module));
    bindings.insert("version".into(), json!(env!("CARGO_PKG_VERSION")));
    bindings.insert("elixir_requirement".into(), json!(ELIXIR_REQUIREMENT));
    bindings.insert("database".into(), json!(database.as_str()));
    bindings.insert("db_adapter".into(), json!(database.adapter_module()));
    bindings.insert("db_dep".into(), json!(database.dep()));
    bindings.insert("db_dev_opts".into(), json!(database.dev_opts(app_name)));
    bindings.insert("db_test_opts".into(), json!(database.test_opts(app_name)));
    bindings.insert("adapter_module".into(), json!(adapter.module()));
    bindings.insert("adapter_dep".into(), json!(adapter.dep()));
    bindings.insert("ecto".into(), json!(features.ecto));
    bindings.insert("html".into(), json!(features.html));
    bindings.insert("gettext".into(), json!(features.gettext));
    bindings.insert("mailer".into(), json!(features.mailer));
    bindings.insert("assets".into(), json!(features.assets));
    bindings.insert("binary_id".into(), json!(features.binary_id));
    bindings.insert("web".into(), json!(web));
    bindings.insert("endpoint_in_app".into(), json!(endpoint_in_app));
    // The OTP application owning the web layer: the single app itself, or
    // the web child inside an umbrella.
    bindings.insert(
        "web_otp_app".into(),
        json!(if endpoint_in_app { app_name } else { web_app }),
    );
    bindings.insert("in_umbrella".into(), json!(variant == Variant::Umbrella));
    bindings.insert("asset_builders".into(), json!(asset_builders));
    bindings.insert("sup_children".into(), json!(children.join(",\n      ")));
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["kiln"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_produce_full_app() {
        let descriptor = ProjectDescriptor::resolve(&args(&["hello_world"])).unwrap();
        assert_eq!(descriptor.app_name, "hello_world");
        assert_eq!(descriptor.module_name, "HelloWorld");
        assert_eq!(descriptor.variant, Variant::App);
        assert!(descriptor.features.ecto);
        assert!(descriptor.features.html);
        assert!(descriptor.features.gettext);
        assert!(descriptor.features.mailer);
        assert!(!descriptor.features.binary_id);
        assert_eq!(descriptor.database, Database::Postgres);
        assert_eq!(descriptor.adapter, HttpAdapter::Bandit);
        assert_eq!(descriptor.asset_builders, vec!["esbuild", "tailwind"]);
        assert!(descriptor.cached_build_path.is_none());
    }

    #[test]
    fn no_html_disables_assets() {
        let descriptor =
            ProjectDescriptor::resolve(&args(&["hello_world", "--no-html"])).unwrap();
        assert!(!descriptor.features.html);
        assert!(!descriptor.features.assets);
        assert!(descriptor.asset_builders.is_empty());
    }

    #[test]
    fn ecto_only_variant_drops_web_features() {
        let descriptor =
            ProjectDescriptor::resolve(&args(&["hello_world", "--ecto-only"])).unwrap();
        assert_eq!(descriptor.variant, Variant::Ecto);
        assert!(descriptor.features.ecto);
        assert!(!descriptor.features.html);
        assert!(!descriptor.features.mailer);
        assert_eq!(descriptor.bindings["web"], serde_json::json!(false));
    }

    #[test]
    fn web_only_variant_is_its_own_web_app() {
        let descriptor =
            ProjectDescriptor::resolve(&args(&["hello_web", "--web-only"])).unwrap();
        assert_eq!(descriptor.bindings["web_app"], serde_json::json!("hello_web"));
        assert_eq!(descriptor.bindings["web_module"], serde_json::json!("HelloWeb"));
        assert!(!descriptor.features.ecto);
    }

    #[test]
    fn database_flag_selects_adapter_bindings() {
        let descriptor = ProjectDescriptor::resolve(&args(&[
            "hello_world",
            "--database",
            "mysql",
        ]))
        .unwrap();
        assert_eq!(
            descriptor.bindings["db_adapter"],
            serde_json::json!("Ecto.Adapters.MyXQL")
        );
        assert!(descriptor.bindings["db_dep"].as_str().unwrap().contains("myxql"));
    }

    #[test]
    fn cowboy_adapter_binding() {
        let descriptor = ProjectDescriptor::resolve(&args(&[
            "hello_world",
            "--adapter",
            "cowboy",
        ]))
        .unwrap();
        assert_eq!(
            descriptor.bindings["adapter_module"],
            serde_json::json!("Phoenix.Endpoint.Cowboy2Adapter")
        );
    }

    #[test]
    fn supervision_children_have_no_trailing_comma() {
        let descriptor = ProjectDescriptor::resolve(&args(&["hello_world"])).unwrap();
        let children = descriptor.bindings["sup_children"].as_str().unwrap();
        assert_eq!(children, "HelloWorld.Repo,\n      HelloWorldWeb.Endpoint");
    }

    #[test]
    fn umbrella_sets_binding() {
        let descriptor =
            ProjectDescriptor::resolve(&args(&["hello_world", "--umbrella"])).unwrap();
        assert_eq!(descriptor.variant, Variant::Umbrella);
        assert_eq!(descriptor.bindings["in_umbrella"], serde_json::json!(true));
        // The umbrella core app does not supervise the endpoint.
        let children = descriptor.bindings["sup_children"].as_str().unwrap();
        assert_eq!(children, "HelloWorld.Repo");
    }

    #[test]
    fn explicit_overrides_apply() {
        let descriptor = ProjectDescriptor::resolve(&args(&[
            "anywhere",
            "--app",
            "custom",
            "--module",
            "My.Custom",
        ]))
        .unwrap();
        assert_eq!(descriptor.app_name, "custom");
        assert_eq!(descriptor.module_name, "My.Custom");
        assert!(descriptor.app_name_explicit);
    }
}
