//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::middleware::Trace;

use super::routes::{api_services, not_found};
use super::state::HttpState;

/// Cookie session middleware with a throwaway key and `Secure` disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// `Authorization` header value for HTTP Basic credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// The API as the server mounts it, over the given state.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(api_services),
        )
        .default_service(web::to(not_found))
}
