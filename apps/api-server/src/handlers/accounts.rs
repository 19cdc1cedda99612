//! Account registration and email verification endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use publisher_core::domain::{User, UserFields};
use publisher_shared::ApiResponse;
use publisher_shared::dto::{RegisterUserRequest, UserResponse};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        full_name: user.full_name,
        is_verified: user.is_verified,
        created_at: user.created_at,
    }
}

/// POST /api/accounts
///
/// Creates an unverified account. The verification mail is sent before the
/// response is written; if sending fails the request fails with 502.
pub async fn register(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let fields = UserFields {
        first_name: req.first_name,
        last_name: req.last_name,
        full_name: req.full_name,
        ..Default::default()
    };

    let user = state
        .accounts
        .create_user(req.email.as_deref(), req.password.as_deref(), fields)
        .await?;

    tracing::info!(request_id = %request_id.as_str(), user_id = %user.id, "Account registered");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(user),
        "Verification email sent",
    )))
}

/// GET /api/accounts/verify/{token}
pub async fn verify(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = state.accounts.verify(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(user))))
}
