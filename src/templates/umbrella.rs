//! Templates for the umbrella project shell.

pub const UMBRELLA_MIX_EXS: &str = r##"defmodule {module}.Umbrella.MixProject do
  use Mix.Project

  def project do
    [
      apps_path: "apps",
      version: "0.1.0",
      start_permanent: Mix.env() == :prod,
      deps: []
    ]
  end
end
"##;

pub const UMBRELLA_README_MD: &str = r##"# {module}.Umbrella

An umbrella project holding the `{app}` core application and the
`{web_app}` web application.

To start it:

  * Run `mix setup` inside `apps/{app}` to install and setup dependencies
  * Start the endpoint with `mix phx.server`
"##;
