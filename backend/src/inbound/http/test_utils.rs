//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use super::configure;
use super::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Build an app over a fresh in-memory store with the exercise routes.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    state_app(HttpState::in_memory(Arc::new(InMemoryStore::default())))
}

/// Build an app with the exercise routes over the given state.
pub fn state_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

/// Call `$app` with a `TestRequest` and return `(status, json_body)`.
macro_rules! send_json {
    ($app:expr, $request:expr) => {{
        let response =
            ::actix_web::test::call_service(&$app, $request.to_request()).await;
        let status = response.status();
        let body: ::serde_json::Value = ::actix_web::test::read_body_json(response).await;
        (status, body)
    }};
}

pub(crate) use send_json;
