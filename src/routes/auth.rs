use crate::{
    error::AppError,
    models::{LoginRequest, SignupRequest},
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Returns the new account's `{id, identity}`. No token is issued; the client
/// logs in separately.
#[post("/signup")]
pub async fn signup(
    auth: web::Data<AuthService>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let summary = auth.register(signup_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Login user
///
/// Returns `{access_token, token_type: "bearer"}`.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.authenticate(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(token))
}
