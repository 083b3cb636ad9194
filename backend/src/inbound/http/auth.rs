//! Request authentication for protected routes.
//!
//! A request is authenticated by HTTP Basic credentials
//! (`emailAddress:password`) when an `Authorization` header is present, and
//! otherwise by the user id stored in the session cookie by `POST /login`.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::policy::SIGN_IN_REQUIRED;
use crate::domain::{Error, LoginCredentials, User, UserId};

use super::session::SessionContext;
use super::state::HttpState;

/// The signed-in user, resolved before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Identifier of the signed-in user.
    pub fn id(&self) -> &UserId {
        &self.0.id
    }

    /// The signed-in user record.
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

fn sign_in_required() -> Error {
    Error::unauthorized(SIGN_IN_REQUIRED)
}

/// Parse Basic credentials from the `Authorization` header.
///
/// Returns `Ok(None)` when the header is absent; any other scheme or a
/// malformed value is rejected.
pub(crate) fn basic_credentials(headers: &HeaderMap) -> Result<Option<LoginCredentials>, Error> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| sign_in_required())?;
    let Some((scheme, encoded)) = value.trim().split_once(' ') else {
        return Err(sign_in_required());
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(sign_in_required());
    }
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| sign_in_required())?;
    let decoded = String::from_utf8(decoded).map_err(|_| sign_in_required())?;
    let (email, password) = decoded.split_once(':').ok_or_else(sign_in_required)?;
    LoginCredentials::try_from_parts(email, password)
        .map(Some)
        .map_err(|err| {
            debug!(error = %err, "rejected basic credentials");
            sign_in_required()
        })
}

async fn resolve(
    state: web::Data<HttpState>,
    basic: Option<LoginCredentials>,
    session: SessionContext,
) -> Result<AuthenticatedUser, Error> {
    if let Some(credentials) = basic {
        return state
            .login
            .authenticate(&credentials)
            .await
            .map(AuthenticatedUser);
    }
    let user_id = session.user_id()?.ok_or_else(sign_in_required)?;
    match state.profile.find_user(&user_id).await? {
        Some(user) => Ok(AuthenticatedUser(user)),
        None => {
            debug!(%user_id, "session refers to an unknown user");
            session.clear();
            Err(sign_in_required())
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let basic = basic_credentials(req.headers());
        let session = SessionContext::from(req);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            resolve(state, basic?, session).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, UserDraft};
    use crate::inbound::http::test_utils::{basic_auth, test_session_middleware};
    use crate::test_support::memory_http_state;
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderValue;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value"),
        );
        headers
    }

    #[rstest]
    fn absent_header_is_not_an_error() {
        assert!(
            basic_credentials(&HeaderMap::new())
                .expect("no header")
                .is_none()
        );
    }

    #[rstest]
    fn basic_header_is_decoded() {
        let credentials = basic_credentials(&headers_with(&basic_auth("joe@smith.com", "pass:word")))
            .expect("valid header")
            .expect("credentials");
        assert_eq!(credentials.email_address().as_ref(), "joe@smith.com");
        assert_eq!(credentials.password(), "pass:word");
    }

    #[rstest]
    #[case("Bearer abc")]
    #[case("Basic !!!")]
    #[case("Basic")]
    #[case("Basic am9lQHNtaXRoLmNvbQ==")]
    #[case("Basic bm90LWFuLWVtYWlsOnBhc3N3b3Jk")]
    fn malformed_headers_are_unauthorized(#[case] value: &str) {
        let err = basic_credentials(&headers_with(value)).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), SIGN_IN_REQUIRED);
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.into_inner().full_name)
    }

    #[actix_web::test]
    async fn basic_credentials_resolve_the_user() {
        let (state, _) = memory_http_state();
        state
            .registration
            .register(UserDraft {
                full_name: Some("Joe Smith".into()),
                email_address: Some("joe@smith.com".into()),
                password: Some("password".into()),
                confirm_password: Some("password".into()),
            })
            .await
            .expect("registered");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let ok = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/me")
                .insert_header((AUTHORIZATION, basic_auth("joe@smith.com", "password")))
                .to_request(),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(ok).await, "Joe Smith");

        let wrong = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/me")
                .insert_header((AUTHORIZATION, basic_auth("joe@smith.com", "nope")))
                .to_request(),
        )
        .await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_requests_are_asked_to_sign_in() {
        let (state, _) = memory_http_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["error"]["message"], SIGN_IN_REQUIRED);
    }
}
