//! The fixed, ordered list of files each generator variant produces.
//!
//! Every entry pairs a template with an output-path expression and an
//! inclusion rule. Skipped entries are never written at all; there is no
//! write-then-delete.

use crate::project::{Feature, Features, Variant};
use crate::templates::{core, umbrella, web};

/// Per-file inclusion rule over the feature set.
#[derive(Debug, Clone, Copy)]
pub enum Include {
    Always,
    If(Feature),
    Unless(Feature),
}

impl Include {
    pub fn evaluate(&self, features: &Features) -> bool {
        match self {
            Include::Always => true,
            Include::If(feature) => features.enabled(*feature),
            Include::Unless(feature) => !features.enabled(*feature),
        }
    }
}

/// One file the generator may produce.
#[derive(Debug)]
pub struct ManifestEntry {
    pub template: &'static str,
    pub target: &'static str,
    pub include: Include,
}

const fn entry(template: &'static str, target: &'static str, include: Include) -> ManifestEntry {
    ManifestEntry { template, target, include }
}

/// A group of entries written under a common path prefix. The prefix is a
/// path expression rendered against the bindings, empty for the project
/// root.
#[derive(Debug)]
pub struct Section {
    pub prefix: &'static str,
    pub entries: &'static [ManifestEntry],
}

const fn section(prefix: &'static str, entries: &'static [ManifestEntry]) -> Section {
    Section { prefix, entries }
}

static META: &[ManifestEntry] = &[
    entry(core::README_MD, "README.md", Include::Always),
    entry(core::GITIGNORE, ".gitignore", Include::Always),
    entry(core::FORMATTER_EXS, ".formatter.exs", Include::Always),
];

static UMBRELLA_META: &[ManifestEntry] = &[
    entry(umbrella::UMBRELLA_README_MD, "README.md", Include::Always),
    entry(core::GITIGNORE, ".gitignore", Include::Always),
    entry(core::FORMATTER_EXS, ".formatter.exs", Include::Always),
    entry(umbrella::UMBRELLA_MIX_EXS, "mix.exs", Include::Always),
];

static CONFIG: &[ManifestEntry] = &[
    entry(core::CONFIG_EXS, "config/config.exs", Include::Always),
    entry(core::DEV_EXS, "config/dev.exs", Include::Always),
    entry(core::TEST_EXS, "config/test.exs", Include::Always),
    entry(core::RUNTIME_EXS, "config/runtime.exs", Include::Always),
];

static APP: &[ManifestEntry] = &[
    entry(core::MIX_EXS, "mix.exs", Include::Always),
    entry(core::APP_EX, "lib/{app}.ex", Include::Always),
    entry(core::APPLICATION_EX, "lib/{app}/application.ex", Include::Always),
    entry(core::REPO_EX, "lib/{app}/repo.ex", Include::If(Feature::Ecto)),
    entry(core::MAILER_EX, "lib/{app}/mailer.ex", Include::If(Feature::Mailer)),
    entry(core::SEEDS_EXS, "priv/repo/seeds.exs", Include::If(Feature::Ecto)),
    entry(core::TEST_HELPER_EXS, "test/test_helper.exs", Include::Always),
    entry(core::DATA_CASE_EX, "test/support/data_case.ex", Include::If(Feature::Ecto)),
];

static WEB: &[ManifestEntry] = &[
    entry(web::WEB_EX, "lib/{web_app}.ex", Include::Always),
    entry(web::ENDPOINT_EX, "lib/{web_app}/endpoint.ex", Include::Always),
    entry(web::ROUTER_EX, "lib/{web_app}/router.ex", Include::Always),
    entry(
        web::ERROR_JSON_EX,
        "lib/{web_app}/controllers/error_json.ex",
        Include::Always,
    ),
    entry(
        web::ERROR_HTML_EX,
        "lib/{web_app}/controllers/error_html.ex",
        Include::If(Feature::Html),
    ),
    entry(
        web::PAGE_CONTROLLER_EX,
        "lib/{web_app}/controllers/page_controller.ex",
        Include::If(Feature::Html),
    ),
    entry(
        web::PAGE_HTML_EX,
        "lib/{web_app}/controllers/page_html.ex",
        Include::If(Feature::Html),
    ),
    entry(
        web::HOME_HEEX,
        "lib/{web_app}/controllers/page_html/home.html.heex",
        Include::If(Feature::Html),
    ),
    entry(
        web::LAYOUTS_EX,
        "lib/{web_app}/components/layouts.ex",
        Include::If(Feature::Html),
    ),
    entry(
        web::ROOT_HEEX,
        "lib/{web_app}/components/layouts/root.html.heex",
        Include::If(Feature::Html),
    ),
    entry(web::GETTEXT_EX, "lib/{web_app}/gettext.ex", Include::If(Feature::Gettext)),
    entry(web::APP_CSS, "assets/css/app.css", Include::If(Feature::Assets)),
    entry(web::APP_JS, "assets/js/app.js", Include::If(Feature::Assets)),
    entry(web::CONN_CASE_EX, "test/support/conn_case.ex", Include::Always),
    entry(
        web::PAGE_CONTROLLER_TEST_EXS,
        "test/{web_app}/controllers/page_controller_test.exs",
        Include::If(Feature::Html),
    ),
];

static WEB_APP: &[ManifestEntry] = &[
    entry(web::WEB_MIX_EXS, "mix.exs", Include::Always),
    entry(web::WEB_APPLICATION_EX, "lib/{web_app}/application.ex", Include::Always),
    entry(core::TEST_HELPER_EXS, "test/test_helper.exs", Include::Always),
];

/// The ordered manifest for a generator variant.
pub fn manifest(variant: Variant) -> Vec<Section> {
    match variant {
        Variant::App => vec![
            section("", META),
            section("", CONFIG),
            section("", APP),
            section("", WEB),
        ],
        Variant::Ecto => {
            vec![section("", META), section("", CONFIG), section("", APP)]
        }
        Variant::Web => vec![
            section("", META),
            section("", CONFIG),
            section("", WEB_APP),
            section("", WEB),
        ],
        Variant::Umbrella => vec![
            section("", UMBRELLA_META),
            section("", CONFIG),
            section("apps/{app}/", APP),
            section("apps/{web_app}/", WEB_APP),
            section("apps/{web_app}/", WEB),
        ],
    }
}
