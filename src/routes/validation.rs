//! Route pattern validation.
//!
//! # Responsibilities
//! - Check each pattern against the HTTP router's path grammar
//! - Detect duplicate and conflicting patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function over the descriptors; runs before the routes are mounted
//! - Grammar: `/`, or `/`-separated non-empty segments where a parameter
//!   occupies a whole segment (`{name}`), and a catch-all (`{*name}`) may
//!   only be the last segment; `{{` and `}}` are literal braces
//! - Two patterns conflict when they have the same shape once parameter
//!   names are erased, or when one has a parameter where the other has a
//!   catch-all after identical leading segments

use crate::routes::descriptor::RouteDescriptor;

/// A problem with one route pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route path is empty")]
    Empty,

    #[error("route path `{path}` must start with `/`")]
    MissingLeadingSlash { path: String },

    #[error("route path `{path}` contains an empty segment")]
    EmptySegment { path: String },

    #[error("route path `{path}` uses `:` parameter syntax; use `{{name}}` instead")]
    LegacyParameter { path: String },

    #[error("route path `{path}` has a malformed parameter segment `{segment}`")]
    MalformedParameter { path: String, segment: String },

    #[error("route path `{path}` has a catch-all parameter before its last segment")]
    CatchAllNotLast { path: String },

    #[error("route path `{path}` is declared more than once")]
    Duplicate { path: String },

    #[error("route path `{path}` conflicts with `{existing}`")]
    Conflict { path: String, existing: String },
}

/// Validate every descriptor. Returns all errors found.
pub fn validate_routes(routes: &[RouteDescriptor]) -> Result<(), Vec<RouteError>> {
    let mut errors = Vec::new();
    // Shapes of the accepted patterns, in declaration order
    let mut accepted: Vec<(Vec<Segment>, &str)> = Vec::new();

    for route in routes {
        let path = route.path();
        let shape = match pattern_shape(path) {
            Ok(shape) => shape,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        match accepted.iter().find(|(other, _)| conflicts(&shape, other)) {
            Some((_, existing)) if *existing == path => {
                errors.push(RouteError::Duplicate {
                    path: path.to_string(),
                });
            }
            Some((_, existing)) => {
                errors.push(RouteError::Conflict {
                    path: path.to_string(),
                    existing: existing.to_string(),
                });
            }
            None => accepted.push((shape, path)),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// One path segment with parameter names erased.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
    CatchAll,
}

/// Whether the router would refuse to hold both shapes.
fn conflicts(a: &[Segment], b: &[Segment]) -> bool {
    if a == b {
        return true;
    }
    let Some(i) = a.iter().zip(b).position(|(x, y)| x != y) else {
        return false;
    };
    matches!(
        (&a[i], &b[i]),
        (Segment::Param, Segment::CatchAll) | (Segment::CatchAll, Segment::Param)
    )
}

/// Check one pattern and return its shape. `/` has an empty shape.
fn pattern_shape(path: &str) -> Result<Vec<Segment>, RouteError> {
    if path.is_empty() {
        return Err(RouteError::Empty);
    }
    let Some(rest) = path.strip_prefix('/') else {
        return Err(RouteError::MissingLeadingSlash {
            path: path.to_string(),
        });
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let segments: Vec<&str> = rest.split('/').collect();
    let mut shape = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(RouteError::EmptySegment {
                path: path.to_string(),
            });
        }
        if segment.starts_with(':') {
            return Err(RouteError::LegacyParameter {
                path: path.to_string(),
            });
        }
        let unescaped = segment.replace("{{", "").replace("}}", "");
        if !unescaped.contains(['{', '}']) {
            shape.push(Segment::Literal(segment.to_string()));
            continue;
        }

        let malformed = || RouteError::MalformedParameter {
            path: path.to_string(),
            segment: segment.to_string(),
        };
        let inner = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(malformed)?;
        let (catch_all, name) = match inner.strip_prefix('*') {
            Some(name) => (true, name),
            None => (false, inner),
        };
        if !is_param_name(name) {
            return Err(malformed());
        }
        if catch_all {
            if i + 1 != segments.len() {
                return Err(RouteError::CatchAllNotLast {
                    path: path.to_string(),
                });
            }
            shape.push(Segment::CatchAll);
        } else {
            shape.push(Segment::Param);
        }
    }

    Ok(shape)
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{RouteMeta, ViewDefinition, ViewProvider};
    use crate::views::LoadError;
    use futures_util::future::BoxFuture;
    use std::sync::Arc;

    #[derive(Debug)]
    struct StaticView;

    impl ViewProvider for StaticView {
        fn id(&self) -> &str {
            "static"
        }

        fn acquire(&self) -> BoxFuture<'_, Result<Arc<ViewDefinition>, LoadError>> {
            Box::pin(async { Ok(Arc::new(ViewDefinition::new("static", ""))) })
        }
    }

    fn routes(paths: &[&str]) -> Vec<RouteDescriptor> {
        paths
            .iter()
            .map(|p| RouteDescriptor::new(*p, RouteMeta::new(), StaticView))
            .collect()
    }

    #[test]
    fn test_valid_patterns() {
        let table = routes(&[
            "/",
            "/about",
            "/streams/{id}",
            "/streams/{id}/frames",
            "/assets/{*rest}",
            "/{{literal}}",
            "/streams/{{id}}",
        ]);
        assert_eq!(validate_routes(&table), Ok(()));
    }

    #[test]
    fn test_malformed_patterns() {
        let cases = [
            ("", RouteError::Empty),
            ("about", RouteError::MissingLeadingSlash { path: "about".into() }),
            ("/a//b", RouteError::EmptySegment { path: "/a//b".into() }),
            ("/about/", RouteError::EmptySegment { path: "/about/".into() }),
            ("/streams/:id", RouteError::LegacyParameter { path: "/streams/:id".into() }),
            (
                "/streams/x{id}",
                RouteError::MalformedParameter {
                    path: "/streams/x{id}".into(),
                    segment: "x{id}".into(),
                },
            ),
            (
                "/streams/{}",
                RouteError::MalformedParameter {
                    path: "/streams/{}".into(),
                    segment: "{}".into(),
                },
            ),
            ("/{*rest}/tail", RouteError::CatchAllNotLast { path: "/{*rest}/tail".into() }),
        ];

        for (path, expected) in cases {
            let errors = validate_routes(&routes(&[path])).unwrap_err();
            assert_eq!(errors, vec![expected], "path {:?}", path);
        }
    }

    #[test]
    fn test_duplicates_and_conflicts() {
        let table = routes(&[
            "/",
            "/streams/{id}",
            "/",
            "/streams/{name}",
            "/{id}",
            "/{*rest}",
        ]);
        let errors = validate_routes(&table).unwrap_err();
        assert_eq!(
            errors,
            vec![
                RouteError::Duplicate { path: "/".into() },
                RouteError::Conflict {
                    path: "/streams/{name}".into(),
                    existing: "/streams/{id}".into(),
                },
                RouteError::Conflict {
                    path: "/{*rest}".into(),
                    existing: "/{id}".into(),
                },
            ]
        );
    }

    #[test]
    fn test_param_and_catch_all_at_same_position_conflict() {
        let cases = [
            ("/{id}", "/{*rest}"),
            ("/{*rest}", "/{id}"),
            ("/a/{x}", "/a/{*y}"),
            ("/a/{x}/b", "/a/{*y}"),
        ];
        for (first, second) in cases {
            let errors = validate_routes(&routes(&[first, second])).unwrap_err();
            assert_eq!(
                errors,
                vec![RouteError::Conflict {
                    path: second.into(),
                    existing: first.into(),
                }]
            );
        }

        // Different leading segments, or a literal next to a catch-all, are fine
        assert!(validate_routes(&routes(&["/a/{x}", "/b/{*y}"])).is_ok());
        assert!(validate_routes(&routes(&["/", "/{*rest}"])).is_ok());
        assert!(validate_routes(&routes(&["/about", "/{*rest}"])).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let table = routes(&["", "nope", "/ok", "/ok"]);
        let errors = validate_routes(&table).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
