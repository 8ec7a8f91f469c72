//! Path pattern matching.

use crate::request::PathParams;

/// Suffix that marks a pattern as a prefix route, as an alternative to
/// a trailing `/`.
const PREFIX_SUFFIX: &str = "...";

/// Splits a path into segments.
///
/// Leading and trailing `/` are trimmed before splitting, so `"/"` and
/// `""` both yield a single empty segment. Interior empty segments are
/// kept.
///
/// # Example
///
/// ```
/// use way_router::split_segments;
///
/// assert_eq!(split_segments("/music/acdc/"), vec!["music", "acdc"]);
/// assert_eq!(split_segments("/"), vec![""]);
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    path.trim_matches('/').split('/').collect()
}

/// A segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A literal string segment, compared case-sensitively.
    Literal(String),
    /// A parameter segment (e.g., `:id`), holding the name without `:`.
    Param(String),
}

impl PathSegment {
    fn parse(part: &str) -> Self {
        match part.strip_prefix(':') {
            Some(name) => Self::Param(name.to_string()),
            None => Self::Literal(part.to_string()),
        }
    }
}

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed segments.
    segments: Vec<PathSegment>,
    /// Whether paths longer than the pattern also match.
    prefix: bool,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/users` - Literal path
    /// - `/users/:id` - Path with parameter
    /// - `/files/` or `/files...` - Prefix, matches `/files` and anything below it
    ///
    /// Any string is accepted. Degenerate patterns such as `//` or a
    /// repeated parameter name still match deterministically.
    ///
    /// # Example
    ///
    /// ```
    /// use way_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/music/:band/:song");
    /// let params = pattern.match_path("/music/acdc/tnt").unwrap();
    /// assert_eq!(params.get("band"), Some("acdc"));
    /// assert_eq!(params.get("song"), Some("tnt"));
    /// ```
    pub fn new(pattern: &str) -> Self {
        let (body, prefix) = match pattern.strip_suffix(PREFIX_SUFFIX) {
            Some(body) => (body, true),
            None => (pattern, pattern.ends_with('/')),
        };

        let segments = split_segments(body)
            .into_iter()
            .map(PathSegment::parse)
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
            prefix,
        }
    }

    /// Attempts to match a path against this pattern.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        self.match_segments(&split_segments(path))
    }

    /// Attempts to match already split request segments.
    ///
    /// Returns the bound parameters on success. A request with more
    /// segments than the pattern only matches a prefix pattern, and the
    /// extra segments are neither checked nor bound. A request with
    /// fewer segments never matches.
    pub fn match_segments(&self, segments: &[&str]) -> Option<PathParams> {
        if segments.len() > self.segments.len() && !self.prefix {
            return None;
        }

        let mut params = PathParams::new();

        for (i, segment) in self.segments.iter().enumerate() {
            let value = *segments.get(i)?;
            match segment {
                PathSegment::Literal(literal) => {
                    if literal != value {
                        return None;
                    }
                }
                PathSegment::Param(name) => params.insert(name.as_str(), value),
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns `true` for a prefix (subtree) pattern.
    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    /// Returns the parameter names in pattern order, duplicates included.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Param(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments(""), vec![""]);
        assert_eq!(split_segments("/"), vec![""]);
        assert_eq!(split_segments("/a/b"), vec!["a", "b"]);
        assert_eq!(split_segments("a/b/"), vec!["a", "b"]);
        assert_eq!(split_segments("/a//b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_literal_path() {
        let pattern = PathPattern::new("/users");
        assert!(!pattern.is_prefix());
        assert!(pattern.match_path("/users").is_some());
        assert!(pattern.match_path("/users/").is_some());
        assert!(pattern.match_path("/posts").is_none());
        assert!(pattern.match_path("/Users").is_none());
    }

    #[test]
    fn test_single_param() {
        let pattern = PathPattern::new("/users/:id");
        let params = pattern.match_path("/users/123").unwrap();
        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::new("/posts/:post_id/comments/:comment_id");
        let params = pattern.match_path("/posts/42/comments/7").unwrap();
        assert_eq!(params.get("post_id"), Some("42"));
        assert_eq!(params.get("comment_id"), Some("7"));
        assert_eq!(
            pattern.param_names().collect::<Vec<_>>(),
            vec!["post_id", "comment_id"]
        );
    }

    #[test]
    fn test_too_many_segments() {
        let pattern = PathPattern::new("/a/:b");
        assert!(pattern.match_path("/a/b/c").is_none());
    }

    #[test]
    fn test_too_few_segments() {
        let pattern = PathPattern::new("/a/:b");
        assert!(pattern.match_path("/a").is_none());

        let prefix = PathPattern::new("/a/b/");
        assert!(prefix.match_path("/a").is_none());
    }

    #[test]
    fn test_trailing_slash_prefix() {
        let pattern = PathPattern::new("/images/");
        assert!(pattern.is_prefix());
        assert_eq!(
            pattern.segments(),
            &[PathSegment::Literal("images".to_string())]
        );
        assert!(pattern.match_path("/images").is_some());
        assert!(pattern.match_path("/images/").is_some());
        let params = pattern.match_path("/images/one/two/three.jpg").unwrap();
        assert!(params.is_empty());
        assert!(pattern.match_path("/img/one").is_none());
    }

    #[test]
    fn test_ellipsis_prefix() {
        let pattern = PathPattern::new("/images...");
        assert!(pattern.is_prefix());
        assert_eq!(pattern.pattern(), "/images...");
        assert!(pattern.match_path("/images").is_some());
        assert!(pattern.match_path("/images/a/b.jpg").is_some());
        assert!(pattern.match_path("/other").is_none());
    }

    #[test]
    fn test_prefix_with_param_does_not_bind_tail() {
        let pattern = PathPattern::new("/files/:owner/");
        let params = pattern.match_path("/files/ann/docs/readme.md").unwrap();
        assert_eq!(params.get("owner"), Some("ann"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::new("/");
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("").is_some());
        assert!(pattern.match_path("/foo").is_none());
        assert!(pattern.match_path("/foo/bar").is_none());
    }

    #[test]
    fn test_empty_pattern() {
        let pattern = PathPattern::new("");
        assert_eq!(pattern.segments(), &[PathSegment::Literal(String::new())]);
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/x").is_none());
    }

    #[test]
    fn test_duplicate_param_last_wins() {
        let pattern = PathPattern::new("/:id/:id");
        let params = pattern.match_path("/first/second").unwrap();
        assert_eq!(params.get("id"), Some("second"));
    }

    #[test]
    fn test_param_matches_empty_segment() {
        let pattern = PathPattern::new("/a/:b/c");
        let params = pattern.match_path("/a//c").unwrap();
        assert_eq!(params.get("b"), Some(""));
    }
}
