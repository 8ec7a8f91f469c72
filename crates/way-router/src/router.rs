//! Main router implementation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;
use crate::method::{Method, Verb};
use crate::path::{PathPattern, split_segments};
use crate::request::{PathParams, Request};
use crate::response::Response;

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

fn boxed<F, Fut>(handler: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req| Box::pin(handler(req)))
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
    verb: Verb,
    pattern: PathPattern,
    handler: Handler,
}

impl Route {
    /// Creates a new route.
    pub fn new<F, Fut>(verb: impl Into<Verb>, pattern: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            verb: verb.into(),
            pattern: PathPattern::new(pattern),
            handler: boxed(handler),
        }
    }

    /// Returns the method filter.
    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    /// Returns the compiled path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns `true` for a prefix (subtree) route.
    pub fn is_prefix(&self) -> bool {
        self.pattern.is_prefix()
    }

    /// Matches a request method and its split path against this route.
    pub fn matches(&self, method: &Method, segments: &[&str]) -> Option<PathParams> {
        if !self.verb.matches(method) {
            return None;
        }
        self.pattern.match_segments(segments)
    }

    /// Invokes the bound handler.
    pub fn call(&self, req: Request) -> BoxFuture<'static, Response> {
        (self.handler)(req)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("verb", &self.verb)
            .field("pattern", &self.pattern.pattern())
            .field("prefix", &self.pattern.is_prefix())
            .finish_non_exhaustive()
    }
}

/// A group of routes with a common prefix.
///
/// The prefix is prepended verbatim, so `RouteGroup::new("/api")`
/// with `.get("/users/:id", ..)` registers `/api/users/:id`.
#[derive(Debug)]
pub struct RouteGroup {
    /// URL prefix for all routes in this group.
    prefix: String,
    /// Routes in this group.
    routes: Vec<Route>,
}

impl RouteGroup {
    /// Creates a new route group with the given prefix.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            routes: Vec::new(),
        }
    }

    /// Adds a route with the given verb.
    #[must_use]
    pub fn handle<F, Fut>(mut self, verb: impl Into<Verb>, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let full_path = format!("{}{}", self.prefix, path);
        self.routes.push(Route::new(verb, &full_path, handler));
        self
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Put, path, handler)
    }

    /// Adds a PATCH route.
    #[must_use]
    pub fn patch<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Patch, path, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Delete, path, handler)
    }

    /// Adds a HEAD route.
    #[must_use]
    pub fn head<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Head, path, handler)
    }

    /// Adds an OPTIONS route.
    #[must_use]
    pub fn options<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Options, path, handler)
    }

    /// Adds a route matching every method.
    #[must_use]
    pub fn any<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Verb::Any, path, handler)
    }

    /// Returns the routes in this group.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

/// The main router for handling HTTP requests.
///
/// Routes are tried in registration order and the first match wins.
/// Build the router completely, then share it (e.g. in an `Arc`) for
/// serving; dispatch only takes `&self`.
pub struct Router {
    /// Registered routes.
    routes: Vec<Route>,
    /// Called when no route matches.
    not_found: Handler,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Creates a new empty router answering [`Response::not_found`].
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            not_found: boxed(|_| async { Response::not_found() }),
        }
    }

    /// Adds a route with the given verb. Use [`Verb::Any`] for all methods.
    #[must_use]
    pub fn handle<F, Fut>(mut self, verb: impl Into<Verb>, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(Route::new(verb, path, handler));
        self
    }

    /// Adds a route for a verb given as a string, `*` meaning all methods.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidMethod`](crate::RouterError::InvalidMethod)
    /// when `verb` is not a valid method token.
    pub fn handle_str<F, Fut>(self, verb: &str, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let verb = Verb::parse(verb)?;
        Ok(self.handle(verb, path, handler))
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Put, path, handler)
    }

    /// Adds a PATCH route.
    #[must_use]
    pub fn patch<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Patch, path, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Delete, path, handler)
    }

    /// Adds a HEAD route.
    #[must_use]
    pub fn head<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Head, path, handler)
    }

    /// Adds an OPTIONS route.
    #[must_use]
    pub fn options<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Method::Options, path, handler)
    }

    /// Adds a route matching every method.
    #[must_use]
    pub fn any<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.handle(Verb::Any, path, handler)
    }

    /// Adds a route group, keeping the group's registration order.
    #[must_use]
    pub fn group(mut self, group: RouteGroup) -> Self {
        self.routes.extend(group.into_routes());
        self
    }

    /// Replaces the fallback handler.
    #[must_use]
    pub fn not_found<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.set_not_found(handler);
        self
    }

    /// Replaces the fallback handler in place.
    ///
    /// Requires `&mut self`, so it cannot race with dispatch on a
    /// router that is already shared.
    pub fn set_not_found<F, Fut>(&mut self, handler: F)
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.not_found = boxed(handler);
    }

    /// Returns the registered routes in priority order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the first route matching the request and its bound params.
    pub fn find(&self, request: &Request) -> Option<(&Route, PathParams)> {
        let segments = split_segments(&request.path);
        self.routes.iter().find_map(|route| {
            route
                .matches(&request.method, &segments)
                .map(|params| (route, params))
        })
    }

    /// Dispatches a request to exactly one handler.
    ///
    /// The matched handler receives the request with its params
    /// replaced by the ones the route bound. When nothing matches, the
    /// fallback receives the request untouched.
    pub fn dispatch(&self, request: Request) -> BoxFuture<'static, Response> {
        match self.find(&request) {
            Some((route, params)) => {
                let mut req = request;
                req.params = params;
                route.call(req)
            }
            None => (self.not_found)(request),
        }
    }
}
