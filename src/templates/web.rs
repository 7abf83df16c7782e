//! Templates for the web layer.

pub const WEB_EX: &str = r##"defmodule {web_module} do
  @moduledoc """
  The entrypoint for defining your web interface, such as controllers,
  components, and so on.

  This can be used in your application as:

      use {web_module}, :controller
  """

{if html}
  def static_paths, do: ~w(assets favicon.ico robots.txt)

{end}
  def router do
    quote do
      use Phoenix.Router, helpers: false

      import Plug.Conn
      import Phoenix.Controller
    end
  end

  def controller do
    quote do
      use Phoenix.Controller, formats: [{if html}:html, {end}:json]

      import Plug.Conn
{if gettext}
      use Gettext, backend: {web_module}.Gettext
{end}
    end
  end
{if html}

  def html do
    quote do
      use Phoenix.Component

      import Phoenix.HTML
    end
  end
{end}

  defmacro __using__(which) when is_atom(which) do
    apply(__MODULE__, which, [])
  end
end
"##;

pub const ENDPOINT_EX: &str = r##"defmodule {web_module}.Endpoint do
  use Phoenix.Endpoint, otp_app: :{web_otp_app}

  @session_options [
    store: :cookie,
    key: "_{web_otp_app}_key",
    signing_salt: "generated",
    same_site: "Lax"
  ]

{if html}
  plug Plug.Static,
    at: "/",
    from: :{web_otp_app},
    gzip: false,
    only: {web_module}.static_paths()

{end}
  plug Plug.RequestId
  plug Plug.Telemetry, event_prefix: [:phoenix, :endpoint]

  plug Plug.Parsers,
    parsers: [:urlencoded, :multipart, :json],
    pass: ["*/*"],
    json_decoder: Phoenix.json_library()

  plug Plug.MethodOverride
  plug Plug.Head
  plug Plug.Session, @session_options
  plug {web_module}.Router
end
"##;

pub const ROUTER_EX: &str = r##"defmodule {web_module}.Router do
  use {web_module}, :router

{if html}
  pipeline :browser do
    plug :accepts, ["html"]
    plug :fetch_session
    plug :fetch_flash
    plug :put_root_layout, html: {{web_module}.Layouts, :root}
    plug :protect_from_forgery
    plug :put_secure_browser_headers
  end

{end}
  pipeline :api do
    plug :accepts, ["json"]
  end

{if html}
  scope "/", {web_module} do
    pipe_through :browser

    get "/", PageController, :home
  end

{end}
  scope "/api", {web_module} do
    pipe_through :api
  end
end
"##;

pub const PAGE_CONTROLLER_EX: &str = r##"defmodule {web_module}.PageController do
  use {web_module}, :controller

  def home(conn, _params) do
    render(conn, :home)
  end
end
"##;

pub const PAGE_HTML_EX: &str = r##"defmodule {web_module}.PageHTML do
  use {web_module}, :html

  embed_templates "page_html/*"
end
"##;

pub const HOME_HEEX: &str = r##"<div class="wrap">
  <h1>Welcome to {module}!</h1>
  <p>Peace of mind from prototype to production.</p>
  <p>
    Guides and docs are available at
    <a href="https://hexdocs.pm/phoenix">hexdocs.pm/phoenix</a>.
  </p>
</div>
"##;

pub const ERROR_JSON_EX: &str = r##"defmodule {web_module}.ErrorJSON do
  def render(template, _assigns) do
    %{errors: %{detail: Phoenix.Controller.status_message_from_template(template)}}
  end
end
"##;

pub const ERROR_HTML_EX: &str = r##"defmodule {web_module}.ErrorHTML do
  use {web_module}, :html

  def render(template, _assigns) do
    Phoenix.Controller.status_message_from_template(template)
  end
end
"##;

pub const LAYOUTS_EX: &str = r##"defmodule {web_module}.Layouts do
  use {web_module}, :html

  embed_templates "layouts/*"
end
"##;

pub const ROOT_HEEX: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <meta name="csrf-token" content={get_csrf_token()} />
    <title>{module}</title>
{if assets}
    <link phx-track-static rel="stylesheet" href={~p"/assets/app.css"} />
    <script defer phx-track-static type="text/javascript" src={~p"/assets/app.js"}>
    </script>
{end}
  </head>
  <body>
    <%= @inner_content %>
  </body>
</html>
"##;

pub const GETTEXT_EX: &str = r##"defmodule {web_module}.Gettext do
  @moduledoc """
  A module providing Internationalization with a gettext-based API.
  """
  use Gettext.Backend, otp_app: :{web_otp_app}
end
"##;

pub const APP_CSS: &str = r##"/* This file is picked up by the asset pipeline. */

body {
  margin: 0;
  font-family: system-ui, sans-serif;
}

.wrap {
  max-width: 60ch;
  margin: 4rem auto;
}
"##;

pub const APP_JS: &str = r##"// Vendored and app-local JavaScript is bundled from here by the configured
// asset builders. Import dependencies below.

console.debug("{app} assets loaded")
"##;

pub const CONN_CASE_EX: &str = r##"defmodule {web_module}.ConnCase do
  use ExUnit.CaseTemplate

  using do
    quote do
      @endpoint {web_module}.Endpoint

      import Plug.Conn
      import Phoenix.ConnTest
      import {web_module}.ConnCase
    end
  end

  setup _tags do
    {:ok, conn: Phoenix.ConnTest.build_conn()}
  end
end
"##;

pub const PAGE_CONTROLLER_TEST_EXS: &str = r##"defmodule {web_module}.PageControllerTest do
  use {web_module}.ConnCase

  test "GET /", %{conn: conn} do
    conn = get(conn, "/")
    assert html_response(conn, 200) =~ "Welcome to {module}!"
  end
end
"##;

pub const WEB_MIX_EXS: &str = r##"defmodule {web_module}.MixProject do
  use Mix.Project

  def project do
    [
      app: :{web_app},
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
      deps: deps()
    ]
  end

  def application do
    [
      mod: {{web_module}.Application, []},
      extra_applications: [:logger, :runtime_tools]
    ]
  end

  defp elixirc_paths(:test), do: ["lib", "test/support"]
  defp elixirc_paths(_), do: ["lib"]

  defp deps do
    [
      {:phoenix, "~> 1.7"},
{if html}
      {:phoenix_html, "~> 4.1"},
{end}
{if gettext}
      {:gettext, "~> 0.26"},
{end}
{if assets}
{for builder in asset_builders}
      {:{builder}, "~> 0.2", runtime: Mix.env() == :dev},
{end}
{end}
{if in_umbrella}
      {:{app}, in_umbrella: true},
{end}
      {adapter_dep},
      {:jason, "~> 1.4"}
    ]
  end
end
"##;

pub const WEB_APPLICATION_EX: &str = r##"defmodule {web_module}.Application do
  @moduledoc false

  use Application

  @impl true
  def start(_type, _args) do
    children = [
      {web_module}.Endpoint
    ]

    opts = [strategy: :one_for_one, name: {web_module}.Supervisor]
    Supervisor.start_link(children, opts)
  end

  @impl true
  def config_change(changed, _new, removed) do
    {web_module}.Endpoint.config_change(changed, removed)
    :ok
  end
end
"##;
