//! Templates shared by every variant that generates a core application.

pub const README_MD: &str = r##"# {module}

To start your application:

{if ecto}
  * Run `mix setup` to install and setup dependencies
{else}
  * Run `mix deps.get` to install dependencies
{end}
{if web}
  * Start the endpoint with `mix phx.server`

Now you can visit [`localhost:4000`](http://localhost:4000) from your browser.
{else}
  * Start it with `mix run --no-halt`
{end}
"##;

pub const GITIGNORE: &str = r##"# Build artifacts and fetched dependencies.
/_build/
/deps/
/cover/
/doc/
/.fetch

erl_crash.dump
*.ez

{app}-*.tar

{if assets}
# Installed asset tooling and compiled assets.
/assets/node_modules/
/priv/static/assets/
{end}
"##;

pub const FORMATTER_EXS: &str = r##"[
  import_deps: [{if ecto}:ecto{end}{if web}{if ecto}, {end}:phoenix{end}],
  inputs: ["*.{heex,ex,exs}", "{config,lib,test}/**/*.{heex,ex,exs}"]
]
"##;

pub const MIX_EXS: &str = r##"defmodule {module}.MixProject do
  use Mix.Project

  def project do
    [
      app: :{app},
      version: "0.1.0",
{if in_umbrella}
      build_path: "../../_build",
      config_path: "../../config/config.exs",
      deps_path: "../../deps",
      lockfile: "../../mix.lock",
{end}
      elixir: "{elixir_requirement}",
      elixirc_paths: elixirc_paths(Mix.env()),
      start_permanent: Mix.env() == :prod,
      aliases: aliases(),
      deps: deps()
    ]
  end

  def application do
    [
      mod: {{module}.Application, []},
      extra_applications: [:logger, :runtime_tools]
    ]
  end

  defp elixirc_paths(:test), do: ["lib", "test/support"]
  defp elixirc_paths(_), do: ["lib"]

  defp deps do
    [
{if endpoint_in_app}
      {:phoenix, "~> 1.7"},
{end}
{if ecto}
      {:phoenix_ecto, "~> 4.5"},
      {:ecto_sql, "~> 3.11"},
      {db_dep},
{end}
{if endpoint_in_app}
{if html}
      {:phoenix_html, "~> 4.1"},
{end}
{if gettext}
      {:gettext, "~> 0.26"},
{end}
{end}
{if mailer}
      {:swoosh, "~> 1.16"},
{end}
{if endpoint_in_app}
{if assets}
{for builder in asset_builders}
      {:{builder}, "~> 0.2", runtime: Mix.env() == :dev},
{end}
{end}
      {adapter_dep},
{end}
      {:jason, "~> 1.4"}
    ]
  end

  defp aliases do
    [
{if ecto}
      setup: ["deps.get", "ecto.setup"],
      "ecto.setup": ["ecto.create", "ecto.migrate", "run priv/repo/seeds.exs"],
      "ecto.reset": ["ecto.drop", "ecto.setup"],
{end}
      test: {if ecto}["ecto.create --quiet", "ecto.migrate --quiet", "test"]{else}["test"]{end}
    ]
  end
end
"##;

pub const CONFIG_EXS: &str = r##"import Config

{if ecto}
config :{app},
  ecto_repos: [{module}.Repo]

{end}
{if binary_id}
config :{app}, :generators,
  binary_id: true

{end}
{if web}
config :{web_otp_app}, {web_module}.Endpoint,
  url: [host: "localhost"],
  adapter: {adapter_module},
  render_errors: [
    formats: [{if html}html: {web_module}.ErrorHTML, {end}json: {web_module}.ErrorJSON],
    layout: false
  ]

{end}
{if mailer}
config :{app}, {module}.Mailer, adapter: Swoosh.Adapters.Local

{end}
{if assets}
{for builder in asset_builders}
config :{builder}, :version_check, :disabled

{end}
{end}
config :logger, :console,
  format: "$time $metadata[$level] $message\n",
  metadata: [:request_id]

config :phoenix, :json_library, Jason

import_config "#{config_env()}.exs"
"##;

pub const DEV_EXS: &str = r##"import Config

{if ecto}
config :{app}, {module}.Repo,
  {db_dev_opts}

{end}
{if web}
config :{web_otp_app}, {web_module}.Endpoint,
  http: [ip: {127, 0, 0, 1}, port: 4000],
  check_origin: false,
  debug_errors: true,
  secret_key_base: "insecure-dev-only-secret-base-padded-to-the-minimum-valid-length"

{end}
config :logger, :console, format: "[$level] $message\n"
"##;

pub const TEST_EXS: &str = r##"import Config

{if ecto}
config :{app}, {module}.Repo,
  {db_test_opts}

{end}
{if web}
config :{web_otp_app}, {web_module}.Endpoint,
  http: [ip: {127, 0, 0, 1}, port: 4002],
  secret_key_base: "insecure-test-only-secret-base-padded-to-the-minimum-valid-lengt",
  server: false

{end}
{if mailer}
config :{app}, {module}.Mailer, adapter: Swoosh.Adapters.Test

{end}
config :logger, level: :warning
"##;

pub const RUNTIME_EXS: &str = r##"import Config

if config_env() == :prod do
{if ecto}
  database_url =
    System.get_env("DATABASE_URL") ||
      raise """
      environment variable DATABASE_URL is missing.
      """

  config :{app}, {module}.Repo,
    url: database_url,
    pool_size: String.to_integer(System.get_env("POOL_SIZE") || "10")

{end}
{if web}
  secret_key_base =
    System.get_env("SECRET_KEY_BASE") ||
      raise """
      environment variable SECRET_KEY_BASE is missing.
      You can generate one by calling: mix phx.gen.secret
      """

  config :{web_otp_app}, {web_module}.Endpoint,
    http: [port: String.to_integer(System.get_env("PORT") || "4000")],
    secret_key_base: secret_key_base

{end}
end
"##;

pub const APP_EX: &str = r##"defmodule {module} do
  @moduledoc """
  {module} keeps the contexts that define your domain and business logic.
  """
end
"##;

pub const APPLICATION_EX: &str = r##"defmodule {module}.Application do
  @moduledoc false

  use Application

  @impl true
  def start(_type, _args) do
    children = [
      {sup_children}
    ]

    opts = [strategy: :one_for_one, name: {module}.Supervisor]
    Supervisor.start_link(children, opts)
  end
{if endpoint_in_app}

  @impl true
  def config_change(changed, _new, removed) do
    {web_module}.Endpoint.config_change(changed, removed)
    :ok
  end
{end}
end
"##;

pub const REPO_EX: &str = r##"defmodule {module}.Repo do
  use Ecto.Repo,
    otp_app: :{app},
    adapter: {db_adapter}
end
"##;

pub const MAILER_EX: &str = r##"defmodule {module}.Mailer do
  use Swoosh.Mailer, otp_app: :{app}
end
"##;

pub const SEEDS_EXS: &str = r##"# Script for populating the database. You can run it as:
#
#     mix run priv/repo/seeds.exs
#
# The seeds are also run by `mix ecto.setup`.
"##;

pub const TEST_HELPER_EXS: &str = r##"ExUnit.start()
{if ecto}
Ecto.Adapters.SQL.Sandbox.mode({module}.Repo, :manual)
{end}
"##;

pub const DATA_CASE_EX: &str = r##"defmodule {module}.DataCase do
  use ExUnit.CaseTemplate

  using do
    quote do
      alias {module}.Repo

      import Ecto
      import Ecto.Changeset
      import Ecto.Query
      import {module}.DataCase
    end
  end

  setup _tags do
    pid = Ecto.Adapters.SQL.Sandbox.start_owner!({module}.Repo, shared: false)
    on_exit(fn -> Ecto.Adapters.SQL.Sandbox.stop_owner(pid) end)
    :ok
  end
end
"##;
