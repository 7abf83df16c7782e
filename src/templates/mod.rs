//! Embedded project templates.
//!
//! Template bodies are inert text in the generator's mini-language: `{name}`
//! interpolation plus `{if}`/`{for}` blocks over the descriptor bindings.
//! Everything else, including Elixir's own brace syntax, passes through
//! verbatim.

pub mod core;
pub mod umbrella;
pub mod web;
