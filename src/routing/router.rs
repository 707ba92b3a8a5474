//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the route matching a path
//! - Select the handler bound to the request method
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(n) template scan; first match wins
//! - Overlapping templates are rejected at construction
//! - Explicit NotFound / MethodNotAllowed rather than a silent default

use axum::http::Method;
use thiserror::Error;

use crate::routing::matcher::{PathTemplate, RouteParams, TemplateError};

/// Why a request could not be bound to a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route matches `{0}`")]
    NotFound(String),

    #[error("method {method} not declared for `{template}`")]
    MethodNotAllowed { method: Method, template: String },
}

/// A template and the handlers bound to its methods.
#[derive(Debug, Clone)]
pub struct Route<H> {
    template: PathTemplate,
    handlers: Vec<(Method, H)>,
}

impl<H> Route<H> {
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Methods declared for this route, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.handlers.iter().map(|(m, _)| m)
    }

    fn handler(&self, method: &Method) -> Option<&H> {
        self.handlers
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, h)| h)
    }
}

/// Result of resolving a path and method.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub handler: &'a H,
    pub params: RouteParams,
}

/// Builder collecting templates before compilation.
pub struct RouteTableBuilder<H> {
    entries: Vec<(String, Vec<(Method, H)>)>,
}

impl<H> RouteTableBuilder<H> {
    /// Declare a template and its method handlers. Order of calls is resolution order.
    pub fn route(mut self, template: &str, handlers: Vec<(Method, H)>) -> Self {
        self.entries.push((template.to_string(), handlers));
        self
    }

    /// Compile every template and check that no two can match the same path.
    pub fn build(self) -> Result<RouteTable<H>, TemplateError> {
        let mut routes: Vec<Route<H>> = Vec::with_capacity(self.entries.len());

        for (raw, handlers) in self.entries {
            let template = PathTemplate::compile(&raw)?;
            if let Some(existing) = routes.iter().find(|r| r.template.overlaps(&template)) {
                return Err(TemplateError::Ambiguous {
                    first: existing.template.as_str().to_string(),
                    second: template.as_str().to_string(),
                });
            }
            routes.push(Route { template, handlers });
        }

        Ok(RouteTable { routes })
    }
}

/// Ordered, immutable set of compiled routes.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> RouteTable<H> {
    pub fn builder() -> RouteTableBuilder<H> {
        RouteTableBuilder { entries: Vec::new() }
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    /// First route, in declaration order, whose template accepts the path.
    pub fn find(&self, path: &str) -> Option<(&Route<H>, RouteParams)> {
        self.routes
            .iter()
            .find_map(|route| route.template.matches(path).map(|params| (route, params)))
    }

    /// Resolve a path and method to a handler.
    pub fn resolve(&self, path: &str, method: &Method) -> Result<RouteMatch<'_, H>, RouteError> {
        let (route, params) = self
            .find(path)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))?;

        let handler = route
            .handler(method)
            .ok_or_else(|| RouteError::MethodNotAllowed {
                method: method.clone(),
                template: route.template.as_str().to_string(),
            })?;

        Ok(RouteMatch {
            route,
            handler,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::builder()
            .route("companies", vec![(Method::GET, "list"), (Method::POST, "create")])
            .route(
                "companies/:companyId",
                vec![(Method::GET, "get"), (Method::PUT, "replace"), (Method::DELETE, "delete")],
            )
            .route(
                "companies/:companyId/computer-models",
                vec![(Method::GET, "list_models"), (Method::POST, "create_model")],
            )
            .route(
                "companies/:companyId/computer-models/:computerModelId",
                vec![(Method::GET, "get_model")],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_each_route() {
        let table = table();

        let m = table.resolve("/companies", &Method::POST).unwrap();
        assert_eq!(*m.handler, "create");

        let m = table.resolve("/companies/abc", &Method::DELETE).unwrap();
        assert_eq!(*m.handler, "delete");
        assert_eq!(m.params.get("companyId"), Some("abc"));

        let m = table.resolve("/companies/abc/computer-models", &Method::GET).unwrap();
        assert_eq!(*m.handler, "list_models");
        assert_eq!(m.route.template().as_str(), "companies/:companyId/computer-models");

        let m = table.resolve("/companies/abc/computer-models/m1/", &Method::GET).unwrap();
        assert_eq!(*m.handler, "get_model");
        assert_eq!(m.params.get("computerModelId"), Some("m1"));
    }

    #[test]
    fn test_company_and_models_never_confused() {
        // Declare the longer template first: resolution must not depend on it.
        let reversed = RouteTable::builder()
            .route("companies/:companyId/computer-models", vec![(Method::GET, "list_models")])
            .route("companies/:companyId", vec![(Method::GET, "get")])
            .build()
            .unwrap();

        for table in [table(), reversed] {
            let company = table.resolve("/companies/abc", &Method::GET).unwrap();
            assert_eq!(*company.handler, "get");

            let models = table.resolve("/companies/abc/computer-models", &Method::GET).unwrap();
            assert_eq!(*models.handler, "list_models");
        }
    }

    #[test]
    fn test_not_found_and_method_not_allowed() {
        let table = table();

        assert_eq!(
            table.resolve("/unknown", &Method::GET).unwrap_err(),
            RouteError::NotFound("/unknown".into())
        );
        assert_eq!(
            table.resolve("/companies/abc/computer-models/m1", &Method::DELETE).unwrap_err(),
            RouteError::MethodNotAllowed {
                method: Method::DELETE,
                template: "companies/:companyId/computer-models/:computerModelId".into(),
            }
        );
        assert!(matches!(
            table.resolve("/companies", &Method::PATCH),
            Err(RouteError::MethodNotAllowed { .. })
        ));
    }

    #[test]
    fn test_ambiguous_templates_rejected() {
        let err = RouteTable::builder()
            .route("companies/:companyId", vec![(Method::GET, "get")])
            .route("companies/search", vec![(Method::GET, "search")])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            TemplateError::Ambiguous {
                first: "companies/:companyId".into(),
                second: "companies/search".into(),
            }
        );
    }

    #[test]
    fn test_declared_methods() {
        let table = table();
        let methods: Vec<_> = table.routes()[1].methods().cloned().collect();
        assert_eq!(methods, vec![Method::GET, Method::PUT, Method::DELETE]);
    }
}
