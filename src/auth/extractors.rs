use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The subject of the verified bearer token: the identity the request speaks for.
///
/// Only meaningful on routes wrapped by `AuthMiddleware`, which stores the verified
/// `Claims` in the request extensions. Without them the extractor fails with
/// `AppError::Unauthenticated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity(pub String);

impl FromRequest for AuthenticatedIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedIdentity(claims.sub.clone()))),
            None => {
                let err = AppError::Unauthenticated(
                    "No authenticated identity on request".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
