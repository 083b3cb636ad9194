//! User account handlers.
//!
//! ```text
//! POST /api/users {"fullName":"Joe Smith","emailAddress":"joe@smith.com",
//!                  "password":"password","confirmPassword":"password"}
//! POST /api/login {"emailAddress":"joe@smith.com","password":"password"}
//! GET  /api/users
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::auth::INVALID_CREDENTIALS;
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Prohibition, User, UserDraft, UserId,
};

use super::auth::AuthenticatedUser;
use super::prohibited::refuse;
use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, DataResponse};

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "joe@smith.com")]
    pub email_address: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email_address, &value.password)
    }
}

/// Account as returned to its owner. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub full_name: String,
    pub email_address: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email_address: user.email_address.to_string(),
        }
    }
}

/// Return the authenticated user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "The authenticated user", body = crate::inbound::http::schemas::UserListSchema),
        (status = 401, description = "Missing or invalid credentials", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users")]
pub async fn current_user(
    user: AuthenticatedUser,
) -> ApiResult<web::Json<DataResponse<UserResponse>>> {
    Ok(web::Json(DataResponse::single(UserResponse::from(user.user()))))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = crate::inbound::http::schemas::UserDraftSchema,
    responses(
        (status = 201, description = "Account created", headers(("Location" = String, description = "Always `/`"))),
        (status = 400, description = "Malformed JSON body", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 422, description = "Validation failed", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<HttpResponse> {
    let user_id = state.registration.register(payload.into_inner()).await?;
    info!(%user_id, "user registered over HTTP");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, "/"))
        .finish())
}

/// Check credentials and store the user in the session cookie.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(|err| {
        if err.is_unmatchable() {
            Error::unauthorized(INVALID_CREDENTIALS)
        } else {
            Error::invalid_request(err.to_string())
        }
    })?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Always refused; see [`Prohibition::EditUserCollection`].
#[put("/users")]
pub async fn edit_users() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::EditUserCollection))
}

/// Always refused; see [`Prohibition::DeleteUserCollection`].
#[delete("/users")]
pub async fn delete_users() -> ApiResult<HttpResponse> {
    Err(refuse(Prohibition::DeleteUserCollection))
}
