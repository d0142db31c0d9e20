// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse};

use crate::auth::jwt::Claims;
use crate::config::settings::ServerMode;
use crate::db::LeagueStore;
use crate::error::AppError;
use crate::handlers::error_response;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::common::ApiResponse;
use crate::models::user::{RegistrationRequest, UserResponse, UserRole};
use crate::services::AuthService;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, auth, mode),
    fields(email = %login_form.email)
)]
pub async fn login_user<S: LeagueStore>(
    login_form: web::Json<LoginRequest>,
    auth: web::Data<AuthService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    if let Err(message) = login_form.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match auth.login(&login_form.email, &login_form.password).await {
        Ok((token, user)) => HttpResponse::Ok().json(ApiResponse::success(
            "Login successful",
            LoginResponse { token, user: UserResponse::from(&user) },
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(
    name = "Adding a new user",
    skip(user_form, auth, mode),
    fields(email = %user_form.email)
)]
pub async fn register_user<S: LeagueStore>(
    user_form: web::Json<RegistrationRequest>,
    auth: web::Data<AuthService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    if let Err(message) = user_form.validate() {
        return AppError::validation(message).to_response(*mode.get_ref());
    }

    match auth
        .register(&user_form.name, &user_form.email, &user_form.password, UserRole::User)
        .await
    {
        Ok(user) => HttpResponse::Created().json(ApiResponse::success(
            "User registered successfully",
            UserResponse::from(&user),
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}

#[tracing::instrument(name = "Get profile", skip(claims, auth, mode), fields(user_id = %claims.sub))]
pub async fn get_profile<S: LeagueStore>(
    claims: web::ReqData<Claims>,
    auth: web::Data<AuthService<S>>,
    mode: web::Data<ServerMode>,
) -> HttpResponse {
    match auth.get_user(claims.user_id()).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(
            "Profile retrieved successfully",
            UserResponse::from(&user),
        )),
        Err(e) => error_response(e, *mode.get_ref()),
    }
}
