//! A closed-instruction template renderer.
//!
//! Templates are plain text with four constructs: `{name}` interpolation,
//! `{if flag}...{else}...{end}` blocks, `{for var in list}...{end}` loops,
//! and literal text. There are no expressions and no scripting; rendering is
//! a pure function of the template and the binding set.
//!
//! Generated Elixir sources are full of literal brace groups (`%{...}`,
//! tuples, typespecs), so a brace group only acts as a directive when its
//! content parses as one. Anything else is emitted verbatim, including
//! interpolations that name an unknown binding.

use serde_json::Value;

use crate::error::{Error, Result};

/// Placeholder values substituted into templates, computed once per
/// descriptor and consumed read-only.
pub type Bindings = serde_json::Map<String, Value>;

/// Parses and renders `source` against `bindings` in one step.
pub fn render(source: &str, bindings: &Bindings) -> Result<String> {
    Template::parse(source)?.render(bindings)
}

/// A parsed template.
#[derive(Debug)]
pub struct Template {
    nodes: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Literal(String),
    Value(String),
    If { flag: String, then_body: Vec<Node>, else_body: Vec<Node> },
    For { var: String, list: String, body: Vec<Node> },
}

#[derive(Debug, PartialEq)]
enum Token {
    Text(String),
    Value(String),
    If(String),
    Else,
    End,
    For { var: String, list: String },
}

impl Token {
    /// Block tokens that, when standalone on a line, swallow the line.
    fn is_block(&self) -> bool {
        matches!(self, Token::If(_) | Token::Else | Token::End | Token::For { .. })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Classifies the content of a brace group. Returns `Ok(None)` when the
/// group is not a directive and should be emitted literally. Malformed
/// directives (a recognized keyword with the wrong shape) are errors so
/// template bugs surface instead of leaking into generated files.
fn classify(content: &str) -> Result<Option<Token>> {
    let words: Vec<&str> = content.split_whitespace().collect();
    match words.as_slice() {
        ["if", flag] if is_identifier(flag) => Ok(Some(Token::If(flag.to_string()))),
        ["if", ..] => Err(Error::Template(format!("malformed if directive: {{{content}}}"))),
        ["else"] => Ok(Some(Token::Else)),
        ["end"] => Ok(Some(Token::End)),
        ["for", var, "in", list] if is_identifier(var) && is_identifier(list) => {
            Ok(Some(Token::For { var: var.to_string(), list: list.to_string() }))
        }
        ["for", ..] => {
            Err(Error::Template(format!("malformed for directive: {{{content}}}")))
        }
        [word] if is_identifier(word) => Ok(Some(Token::Value(word.to_string()))),
        _ => Ok(None),
    }
}

/// Splits `source` into text and directive tokens. A block directive that
/// sits alone on its line swallows the line's indentation and trailing
/// newline, so templates can indent directives naturally.
fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        let (before, from_open) = rest.split_at(open);
        text.push_str(before);
        let tail = &from_open[1..];

        let close = tail.find('}');
        let next_open = tail.find('{');
        let group_end = match (close, next_open) {
            (Some(c), Some(o)) if o < c => None,
            (Some(c), _) => Some(c),
            (None, _) => None,
        };

        let directive = match group_end {
            Some(end) => classify(&tail[..end])?.map(|token| (end, token)),
            None => None,
        };

        match directive {
            Some((end, token)) => {
                let mut remainder = &tail[end + 1..];
                if token.is_block() {
                    let line_leading = trailing_line_indent(&text).is_some();
                    let newline_len = leading_newline_len(remainder);
                    if line_leading && (newline_len > 0 || remainder.is_empty()) {
                        if let Some(indent_start) = trailing_line_indent(&text) {
                            text.truncate(indent_start);
                        }
                        remainder = &remainder[newline_len..];
                    }
                }
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(token);
                rest = remainder;
            }
            None => {
                text.push('{');
                rest = tail;
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}

/// When `text` ends in a (possibly empty) run of spaces and tabs that starts
/// a line, returns the index where that run begins.
fn trailing_line_indent(text: &str) -> Option<usize> {
    let line_start = text.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let trailing = &text[line_start..];
    if trailing.chars().all(|c| c == ' ' || c == '\t') {
        Some(line_start)
    } else {
        None
    }
}

fn leading_newline_len(s: &str) -> usize {
    if s.starts_with("\r\n") {
        2
    } else if s.starts_with('\n') {
        1
    } else {
        0
    }
}

enum Terminator {
    Else,
    End,
    Eof,
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    fn parse_body(&mut self, inside_block: bool) -> Result<(Vec<Node>, Terminator)> {
        let mut nodes = Vec::new();
        loop {
            let Some(token) = self.tokens.next() else {
                if inside_block {
                    return Err(Error::Template("unclosed block: missing {end}".into()));
                }
                return Ok((nodes, Terminator::Eof));
            };
            match token {
                Token::Text(text) => nodes.push(Node::Literal(text)),
                Token::Value(name) => nodes.push(Node::Value(name)),
                Token::If(flag) => {
                    let (then_body, terminator) = self.parse_body(true)?;
                    let else_body = match terminator {
                        Terminator::Else => {
                            let (body, terminator) = self.parse_body(true)?;
                            if matches!(terminator, Terminator::Else) {
                                return Err(Error::Template(
                                    "duplicate {else} in if block".into(),
                                ));
                            }
                            body
                        }
                        _ => Vec::new(),
                    };
                    nodes.push(Node::If { flag, then_body, else_body });
                }
                Token::For { var, list } => {
                    let (body, terminator) = self.parse_body(true)?;
                    if matches!(terminator, Terminator::Else) {
                        return Err(Error::Template("{else} is not valid in a for loop".into()));
                    }
                    nodes.push(Node::For { var, list, body });
                }
                Token::Else => {
                    if !inside_block {
                        return Err(Error::Template("stray {else} outside a block".into()));
                    }
                    return Ok((nodes, Terminator::Else));
                }
                Token::End => {
                    if !inside_block {
                        return Err(Error::Template("stray {end} outside a block".into()));
                    }
                    return Ok((nodes, Terminator::End));
                }
            }
        }
    }
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = tokenize(source)?;
        let mut parser = Parser { tokens: tokens.into_iter() };
        let (nodes, _) = parser.parse_body(false)?;
        Ok(Template { nodes })
    }

    pub fn render(&self, bindings: &Bindings) -> Result<String> {
        let mut out = String::new();
        let mut scope = Vec::new();
        render_nodes(&self.nodes, bindings, &mut scope, &mut out)?;
        Ok(out)
    }
}

fn lookup<'a>(
    name: &str,
    bindings: &'a Bindings,
    scope: &'a [(String, Value)],
) -> Option<&'a Value> {
    scope
        .iter()
        .rev()
        .find(|(var, _)| var == name)
        .map(|(_, value)| value)
        .or_else(|| bindings.get(name))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Object(_) => true,
        Value::Null => false,
    }
}

fn render_nodes(
    nodes: &[Node],
    bindings: &Bindings,
    scope: &mut Vec<(String, Value)>,
    out: &mut String,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Value(name) => match lookup(name, bindings, scope) {
                Some(Value::String(s)) => out.push_str(s),
                Some(Value::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
                Some(Value::Number(n)) => out.push_str(&n.to_string()),
                Some(_) => {
                    return Err(Error::Template(format!(
                        "binding '{name}' is not a scalar and cannot be interpolated"
                    )))
                }
                // Not a binding: a literal brace group that happened to
                // look like an identifier.
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
            Node::If { flag, then_body, else_body } => {
                let branch = match lookup(flag, bindings, scope) {
                    Some(value) if is_truthy(value) => then_body,
                    _ => else_body,
                };
                render_nodes(branch, bindings, scope, out)?;
            }
            Node::For { var, list, body } => {
                let items = match lookup(list, bindings, scope) {
                    Some(Value::Array(items)) => items.clone(),
                    Some(_) => {
                        return Err(Error::Template(format!(
                            "binding '{list}' is not a list"
                        )))
                    }
                    None => {
                        return Err(Error::Template(format!("unknown list binding '{list}'")))
                    }
                };
                for item in items {
                    scope.push((var.clone(), item));
                    render_nodes(body, bindings, scope, out)?;
                    scope.pop();
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bindings(pairs: &[(&str, Value)]) -> Bindings {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn interpolates_values() {
        let b = bindings(&[("app", json!("hello_world"))]);
        assert_eq!(render("app: :{app}", &b).unwrap(), "app: :hello_world");
    }

    #[test]
    fn unknown_brace_groups_pass_through() {
        let b = bindings(&[]);
        assert_eq!(render("{:ok, conn}", &b).unwrap(), "{:ok, conn}");
        assert_eq!(render("%{errors: %{}}", &b).unwrap(), "%{errors: %{}}");
        assert_eq!(render("{127, 0, 0, 1}", &b).unwrap(), "{127, 0, 0, 1}");
    }

    #[test]
    fn unknown_identifier_group_stays_literal() {
        let b = bindings(&[]);
        assert_eq!(render("{socket}", &b).unwrap(), "{socket}");
    }

    #[test]
    fn if_blocks_follow_the_flag() {
        let b = bindings(&[("html", json!(true))]);
        assert_eq!(render("[{if html}:html, {end}:json]", &b).unwrap(), "[:html, :json]");

        let b = bindings(&[("html", json!(false))]);
        assert_eq!(render("[{if html}:html, {end}:json]", &b).unwrap(), "[:json]");
    }

    #[test]
    fn else_branch() {
        let b = bindings(&[("ecto", json!(false))]);
        assert_eq!(render("{if ecto}a{else}b{end}", &b).unwrap(), "b");
    }

    #[test]
    fn missing_flag_is_false() {
        let b = bindings(&[]);
        assert_eq!(render("{if nope}a{else}b{end}", &b).unwrap(), "b");
    }

    #[test]
    fn standalone_block_lines_are_swallowed() {
        let b = bindings(&[("ecto", json!(true)), ("module", json!("Demo"))]);
        let source = "children = [\n{if ecto}\n  {module}.Repo\n{end}\n]\n";
        assert_eq!(render(source, &b).unwrap(), "children = [\n  Demo.Repo\n]\n");

        let b = bindings(&[("ecto", json!(false)), ("module", json!("Demo"))]);
        assert_eq!(render(source, &b).unwrap(), "children = [\n]\n");
    }

    #[test]
    fn indented_block_lines_are_swallowed() {
        let b = bindings(&[("ecto", json!(true))]);
        let source = "a\n  {if ecto}\n  x\n  {end}\nb\n";
        assert_eq!(render(source, &b).unwrap(), "a\n  x\nb\n");
    }

    #[test]
    fn inline_end_keeps_following_newline() {
        let b = bindings(&[("ecto", json!(false))]);
        let source = "test: {if ecto}[\"a\"]{else}[\"b\"]{end}\nnext";
        assert_eq!(render(source, &b).unwrap(), "test: [\"b\"]\nnext");
    }

    #[test]
    fn for_loops_iterate_lists() {
        let b = bindings(&[("builders", json!(["esbuild", "tailwind"]))]);
        let source = "{for builder in builders}\n- {builder}\n{end}\n";
        assert_eq!(render(source, &b).unwrap(), "- esbuild\n- tailwind\n");
    }

    #[test]
    fn loop_variable_shadows_bindings() {
        let b = bindings(&[("x", json!("outer")), ("xs", json!(["inner"]))]);
        assert_eq!(render("{for x in xs}{x}{end}{x}", &b).unwrap(), "innerouter");
    }

    #[test]
    fn double_brace_renders_single_literal_brace() {
        let b = bindings(&[("module", json!("Demo"))]);
        assert_eq!(render("mod: {{module}.Application, []}", &b).unwrap(), "mod: {Demo.Application, []}");
    }

    #[test]
    fn unclosed_block_is_an_error() {
        let b = bindings(&[("ecto", json!(true))]);
        assert!(matches!(render("{if ecto}oops", &b), Err(Error::Template(_))));
    }

    #[test]
    fn stray_end_is_an_error() {
        let b = bindings(&[]);
        assert!(matches!(render("oops{end}", &b), Err(Error::Template(_))));
    }

    #[test]
    fn malformed_directives_are_errors() {
        let b = bindings(&[]);
        assert!(matches!(render("{if}", &b), Err(Error::Template(_))));
        assert!(matches!(render("{for x}", &b), Err(Error::Template(_))));
    }

    #[test]
    fn rendering_is_deterministic() {
        let b = bindings(&[("app", json!("demo")), ("html", json!(true))]);
        let source = "{if html}<h1>{app}</h1>{end}";
        assert_eq!(render(source, &b).unwrap(), render(source, &b).unwrap());
    }
}
