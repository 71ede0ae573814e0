use crate::domain::user::UserSignup;
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::schemas::UserResponse;
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

/// Mounts the authentication routes under `/auth`.
pub fn auth_router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/users/{id}", web::get().to(get_user)),
    );
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<UserSignup>,
) -> Result<HttpResponse, ApiError> {
    info!("Signup request received");

    let user = state
        .auth_service
        .signup(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to sign up user");
            ApiError::from(e)
        })?;

    let response = UserResponse::from(&user);
    info!(user_id = response.id, role = %response.role, "User created");
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state), fields(user_id = %*path))]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let user = state.auth_service.get_user(user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}
