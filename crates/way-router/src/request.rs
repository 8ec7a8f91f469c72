//! HTTP request type.

use std::collections::HashMap;

use crate::method::Method;

/// Path parameters extracted from the URL.
///
/// A fresh set is built for every dispatch and handed to the matched
/// handler inside its [`Request`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: HashMap<String, String>,
}

impl PathParams {
    /// Creates new empty path params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any earlier value under the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Gets a parameter value, or `None` if it was never bound.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Gets a parameter value, or `""` if it was never bound.
    ///
    /// Use [`PathParams::get`] when an empty segment and a missing
    /// parameter must be told apart.
    pub fn param(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` if the parameter was bound.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Returns the number of bound parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameter was bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Path parameters bound by the matched route.
    pub params: PathParams,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: PathParams::new(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a request from an origin-form target such as `/search?q=x`.
    ///
    /// The path is percent-decoded with [`decode_path`] before it is
    /// stored, so routes match and bind decoded segments.
    pub fn with_target(method: Method, target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => {
                let mut req = Self::new(method, decode_path(path));
                req.query = Self::parse_query_string(query);
                req
            }
            None => Self::new(method, decode_path(target)),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Gets a path parameter, or `""` if the route did not bind it.
    pub fn param(&self, name: &str) -> &str {
        self.params.param(name)
    }

    /// Gets a header value.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Gets a query parameter.
    pub fn get_query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Parses query parameters from a query string.
    pub fn parse_query_string(query: &str) -> HashMap<String, String> {
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((percent_decode(key, true), percent_decode(value, true)))
            })
            .collect()
    }
}

/// Reads a path parameter bound during dispatch.
///
/// Returns `""` when the parameter is absent, so a missing parameter
/// and an empty segment look the same. Check [`PathParams::get`] to
/// tell them apart.
pub fn param<'a>(req: &'a Request, name: &str) -> &'a str {
    req.param(name)
}

/// Percent-decodes a request path.
///
/// `+` is left alone; only query strings treat it as a space. Invalid
/// escapes are kept verbatim. An encoded `/` (`%2F`) decodes to a real
/// separator.
///
/// ```
/// use way_router::decode_path;
///
/// assert_eq!(decode_path("/music/guns%20n%20roses/c+c"), "/music/guns n roses/c+c");
/// ```
pub fn decode_path(path: &str) -> String {
    percent_decode(path, false)
}

/// Percent-decodes `s`, mapping `+` to a space when `plus_as_space` is set.
fn percent_decode(s: &str, plus_as_space: bool) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let decoded = s
                    .get(i + 1..i + 3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = decoded {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b'+' if plus_as_space => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let mut params = PathParams::new();
        params.insert("id", "123");
        params.insert("name", "test");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.parse::<i64>("id"), Some(123));
        assert_eq!(params.get("missing"), None);
        assert!(params.contains("name"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_param_defaults_to_empty() {
        let mut params = PathParams::new();
        params.insert("blank", "");

        assert_eq!(params.param("missing"), "");
        assert_eq!(params.param("blank"), "");
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.get("blank"), Some(""));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut params = PathParams::new();
        params.insert("id", "first");
        params.insert("id", "second");
        assert_eq!(params.get("id"), Some("second"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_request_builder() {
        let req = Request::get("/users")
            .header("Content-Type", "application/json")
            .query_param("page", "1");

        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/users");
        assert_eq!(req.get_header("content-type"), Some("application/json"));
        assert_eq!(req.get_query("page"), Some("1"));
        assert_eq!(param(&req, "id"), "");
    }

    #[test]
    fn test_with_target() {
        let req = Request::with_target(Method::Get, "/search?q=way+router&page=2");
        assert_eq!(req.path, "/search");
        assert_eq!(req.get_query("q"), Some("way router"));
        assert_eq!(req.get_query("page"), Some("2"));

        let req = Request::with_target(Method::Get, "/plain");
        assert_eq!(req.path, "/plain");
        assert!(req.query.is_empty());
    }

    #[test]
    fn test_decode_path_keeps_plus() {
        assert_eq!(decode_path("/a%20b/c+d"), "/a b/c+d");
        assert_eq!(decode_path("/caf%C3%A9/%zz"), "/café/%zz");
        assert_eq!(decode_path("/plain"), "/plain");
    }

    #[test]
    fn test_with_target_decodes_path() {
        let req = Request::with_target(Method::Get, "/music/guns%20n%20roses/tnt?q=a+b");
        assert_eq!(req.path, "/music/guns n roses/tnt");
        assert_eq!(req.get_query("q"), Some("a b"));
    }

    #[test]
    fn test_query_string_parsing() {
        let query = Request::parse_query_string("name=John+Doe&age=30&city=New%20York");
        assert_eq!(query.get("name"), Some(&"John Doe".to_string()));
        assert_eq!(query.get("age"), Some(&"30".to_string()));
        assert_eq!(query.get("city"), Some(&"New York".to_string()));
    }

    #[test]
    fn test_query_string_utf8_and_bad_escape() {
        let query = Request::parse_query_string("word=caf%C3%A9&odd=100%&&flag");
        assert_eq!(query.get("word"), Some(&"café".to_string()));
        assert_eq!(query.get("odd"), Some(&"100%".to_string()));
        assert_eq!(query.get("flag"), Some(&String::new()));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_json_body() {
        let req = Request::post("/bands").body(r#"{"name":"acdc"}"#);
        let value: serde_json::Value = req.json().unwrap();
        assert_eq!(value["name"], "acdc");
    }
}
