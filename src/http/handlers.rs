//! Resource handlers and the route table binding them.
//!
//! Every handler runs synchronously with exclusive access to the store, so a
//! handler's reads and writes are atomic with respect to other requests.
//!
//! Status mapping:
//! - unknown company or model → 404, message names the id
//! - invalid body → 400, empty body
//! - identity conflict → 412, conflict as reason and body
//! - read → 200 JSON; create → 201; replace → 200; delete → 204

use axum::http::{Method, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::codec::{parse_company, parse_computer_model, render_collection, ApiUrls, Resource};
use crate::http::response;
use crate::routing::{RouteParams, RouteTable, TemplateError};
use crate::store::{ResourceStore, StoreError};

pub const COMPANY_ID: &str = "companyId";
pub const COMPUTER_MODEL_ID: &str = "computerModelId";

/// Inputs available to a handler.
#[derive(Debug)]
pub struct HandlerContext<'a> {
    pub urls: &'a ApiUrls,
    pub params: &'a RouteParams,
    /// Parsed request body; `Null` for methods that carry none.
    pub body: Value,
}

impl HandlerContext<'_> {
    fn param(&self, name: &str) -> &str {
        self.params.get(name).unwrap_or_default()
    }
}

/// A request handler bound to a (template, method) pair.
pub type Handler = fn(&mut ResourceStore, HandlerContext<'_>) -> Response;

/// The API's route table, in resolution order.
pub fn route_table() -> Result<RouteTable<Handler>, TemplateError> {
    RouteTable::builder()
        .route(
            "companies",
            vec![
                (Method::GET, list_companies as Handler),
                (Method::POST, create_company as Handler),
            ],
        )
        .route(
            "companies/:companyId",
            vec![
                (Method::GET, get_company as Handler),
                (Method::PUT, replace_company as Handler),
                (Method::DELETE, delete_company as Handler),
            ],
        )
        .route(
            "companies/:companyId/computer-models",
            vec![
                (Method::GET, list_computer_models as Handler),
                (Method::POST, create_computer_model as Handler),
            ],
        )
        .route(
            "companies/:companyId/computer-models/:computerModelId",
            vec![(Method::GET, get_computer_model as Handler)],
        )
        .build()
}

fn company_not_found(company_id: &str) -> Response {
    response::message(StatusCode::NOT_FOUND, format!("company {} not found", company_id))
}

fn conflict(err: StoreError) -> Response {
    tracing::info!(error = ?err, "Identity conflict");
    response::message(StatusCode::PRECONDITION_FAILED, err.to_string())
}

pub fn list_companies(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let companies = store.list_companies();
    response::json(StatusCode::OK, &render_collection(&companies, ctx.urls))
}

pub fn create_company(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company = match parse_company(&ctx.body) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected company body");
            return response::empty(StatusCode::BAD_REQUEST);
        }
    };

    match store.add_company(company) {
        Ok(()) => response::empty(StatusCode::CREATED),
        Err(e) => conflict(e),
    }
}

pub fn get_company(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company_id = ctx.param(COMPANY_ID);
    match store.get_company(company_id) {
        Some(company) => response::json(StatusCode::OK, &company.document(ctx.urls)),
        None => company_not_found(company_id),
    }
}

pub fn replace_company(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company_id = ctx.param(COMPANY_ID);
    if store.get_company(company_id).is_none() {
        return company_not_found(company_id);
    }

    let replacement = match parse_company(&ctx.body) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(company_id = %company_id, error = %e, "Rejected company body");
            return response::empty(StatusCode::BAD_REQUEST);
        }
    };
    if replacement.id != company_id {
        tracing::debug!(
            company_id = %company_id,
            body_id = %replacement.id,
            "Company id in body differs from path"
        );
        return response::empty(StatusCode::BAD_REQUEST);
    }

    match store.update_company(replacement) {
        Ok(()) => response::empty(StatusCode::OK),
        Err(e) => conflict(e),
    }
}

pub fn delete_company(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company_id = ctx.param(COMPANY_ID);
    match store.remove_company(company_id) {
        Some(_) => response::empty(StatusCode::NO_CONTENT),
        None => company_not_found(company_id),
    }
}

pub fn list_computer_models(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company_id = ctx.param(COMPANY_ID);
    match store.list_models(company_id) {
        Some(models) => response::json(StatusCode::OK, &render_collection(&models, ctx.urls)),
        None => response::message(
            StatusCode::NOT_FOUND,
            format!("computer models from company {} not found", company_id),
        ),
    }
}

pub fn create_computer_model(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company_id = ctx.param(COMPANY_ID);
    let model = match parse_computer_model(&ctx.body) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(company_id = %company_id, error = %e, "Rejected computer model body");
            return response::empty(StatusCode::BAD_REQUEST);
        }
    };

    match store.add_model_to_company(company_id, model) {
        Ok(()) => response::empty(StatusCode::CREATED),
        Err(StoreError::CompanyNotFound(id)) => company_not_found(&id),
        Err(e) => conflict(e),
    }
}

pub fn get_computer_model(store: &mut ResourceStore, ctx: HandlerContext<'_>) -> Response {
    let company_id = ctx.param(COMPANY_ID);
    let model_id = ctx.param(COMPUTER_MODEL_ID);
    match store.get_model(company_id, model_id) {
        Some(model) => response::json(StatusCode::OK, &model.document(ctx.urls)),
        None => response::message(
            StatusCode::NOT_FOUND,
            format!("computer model {} not found in company {}", model_id, company_id),
        ),
    }
}
