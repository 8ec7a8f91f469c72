//! HTTP methods and route verbs.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RouterError};

/// HTTP request methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// OPTIONS method
    Options,
    /// CONNECT method
    Connect,
    /// TRACE method
    Trace,
    /// Any other method token, stored lower case.
    Extension(String),
}

impl Method {
    /// Parses a method from a string, ignoring case.
    ///
    /// Unknown tokens become [`Method::Extension`], so `"PURGE"` and
    /// `"purge"` compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidMethod`] when the string is empty
    /// or contains whitespace.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(RouterError::InvalidMethod(s.to_string()));
        }

        let method = match s.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            "CONNECT" => Self::Connect,
            "TRACE" => Self::Trace,
            _ => Self::Extension(s.to_ascii_lowercase()),
        };
        Ok(method)
    }

    /// Returns the method as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
            Self::Extension(token) => token.as_str(),
        }
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The method filter of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Matches every method. Spelled `*` at the string boundary.
    Any,
    /// Matches exactly one method.
    Only(Method),
}

impl Verb {
    /// Parses a verb: `*` is the wildcard, anything else a method.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidMethod`] for strings that are not
    /// a valid method token.
    pub fn parse(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(Self::Any);
        }
        Method::parse(s).map(Self::Only)
    }

    /// Returns `true` if a request with `method` passes this filter.
    pub fn matches(&self, method: &Method) -> bool {
        match self {
            Self::Any => true,
            Self::Only(m) => m == method,
        }
    }
}

impl From<Method> for Verb {
    fn from(method: Method) -> Self {
        Self::Only(method)
    }
}

impl FromStr for Verb {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Only(method) => fmt::Display::fmt(method, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::parse("GET"), Ok(Method::Get));
        assert_eq!(Method::parse("post"), Ok(Method::Post));
        assert_eq!(Method::parse("Delete"), Ok(Method::Delete));
        assert_eq!("options".parse::<Method>(), Ok(Method::Options));
    }

    #[test]
    fn test_extension_method_is_case_insensitive() {
        let upper = Method::parse("PURGE").unwrap();
        let lower = Method::parse("purge").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, Method::Extension("purge".to_string()));
        assert_eq!(upper.as_str(), "purge");
    }

    #[test]
    fn test_invalid_method() {
        assert_eq!(
            Method::parse(""),
            Err(RouterError::InvalidMethod(String::new()))
        );
        assert!(Method::parse("GE T").is_err());
    }

    #[test]
    fn test_verb_wildcard() {
        let verb = Verb::parse("*").unwrap();
        assert_eq!(verb, Verb::Any);
        assert!(verb.matches(&Method::Get));
        assert!(verb.matches(&Method::Extension("purge".to_string())));
        assert_eq!(verb.to_string(), "*");
    }

    #[test]
    fn test_verb_exact() {
        let verb = Verb::parse("get").unwrap();
        assert!(verb.matches(&Method::Get));
        assert!(!verb.matches(&Method::Post));
        assert_eq!(Verb::from(Method::Put).to_string(), "PUT");
    }
}
