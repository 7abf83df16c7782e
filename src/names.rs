use std::path::Path;

use cruet::case::{pascal::to_pascal_case, snake::to_snake_case};

use crate::error::{Error, Result};

/// Derives the application name from the final path segment unless an
/// explicit `--app` value was given. Path-derived names are normalized to
/// lowercase snake case.
pub fn derive_app_name(target: &Path, explicit: Option<&str>) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }

    let segment = target.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    let app = to_snake_case(segment);

    if app.is_empty() {
        return Err(Error::InvalidAppName {
            name: segment.to_string(),
            reason: "the final path segment produced an empty name; \
                     pass --app to name the application explicitly"
                .to_string(),
        });
    }
    if app.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Error::InvalidAppName {
            name: app,
            reason: "it cannot start with a digit".to_string(),
        });
    }
    Ok(app)
}

/// Derives the module name by camel-casing the application name, unless an
/// explicit `--module` value was given. A supplied namespace is prepended
/// with a dot.
pub fn derive_module_name(
    app_name: &str,
    explicit: Option<&str>,
    namespace: Option<&str>,
) -> String {
    if let Some(module) = explicit {
        return module.to_string();
    }
    let base = to_pascal_case(app_name);
    match namespace {
        Some(ns) => format!("{ns}.{base}"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn app_name_from_final_path_segment() {
        let path = PathBuf::from("projects/hello_world");
        assert_eq!(derive_app_name(&path, None).unwrap(), "hello_world");
    }

    #[test]
    fn app_name_normalizes_to_snake_case() {
        let path = PathBuf::from("My-App");
        assert_eq!(derive_app_name(&path, None).unwrap(), "my_app");
    }

    #[test]
    fn explicit_app_name_wins_over_path() {
        let path = PathBuf::from("somewhere/else");
        assert_eq!(derive_app_name(&path, Some("custom")).unwrap(), "custom");
    }

    #[test]
    fn app_name_cannot_start_with_digit() {
        let path = PathBuf::from("123app");
        assert!(matches!(
            derive_app_name(&path, None),
            Err(Error::InvalidAppName { .. })
        ));
    }

    #[test]
    fn empty_segment_is_rejected() {
        let path = PathBuf::from("");
        assert!(matches!(
            derive_app_name(&path, None),
            Err(Error::InvalidAppName { .. })
        ));
    }

    #[test]
    fn module_name_is_camel_cased() {
        assert_eq!(derive_module_name("hello_world", None, None), "HelloWorld");
    }

    #[test]
    fn module_name_namespace_prefix() {
        assert_eq!(
            derive_module_name("hello_world", None, Some("Acme")),
            "Acme.HelloWorld"
        );
    }

    #[test]
    fn explicit_module_name_wins() {
        assert_eq!(
            derive_module_name("hello_world", Some("My.App"), Some("Acme")),
            "My.App"
        );
    }
}
