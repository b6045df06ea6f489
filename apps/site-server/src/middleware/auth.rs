//! Bearer token extraction for the admin API.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use press_core::domain::Actor;
use press_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated principal extractor.
///
/// Whether the principal may act is decided by the admin service, not here.
#[derive(Debug, Clone)]
pub struct Identity(pub Actor);

impl Identity {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal("Server configuration error".to_string())));
        };

        let result = bearer_token(req)
            .and_then(|token| state.auth.authenticate(token))
            .map(Identity)
            .map_err(AppError::from);
        ready(result)
    }
}
