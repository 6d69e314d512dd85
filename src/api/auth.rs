//! Caller identity for endpoints that act on behalf of a signed-in user.
//!
//! The identity comes from an HS256 token carried in the `token` cookie or an
//! `Authorization: Bearer` header. Its `userId` claim becomes the actor id.
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode, web};
use futures_util::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::api::validation::ErrorResponse;

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub exp: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User not authenticated")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("authentication keys are not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

/// Key used to verify session tokens
#[derive(Clone)]
pub struct TokenKeys {
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                warn!("Rejected token: {}", e);
                AuthError::InvalidToken
            })?;
        Uuid::parse_str(&data.claims.user_id).map_err(|_| AuthError::InvalidToken)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let Some(keys) = req.app_data::<web::Data<TokenKeys>>() else {
        error!("TokenKeys missing from app data");
        return Err(AuthError::NotConfigured);
    };

    let token = req
        .cookie(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| bearer_token(req))
        .ok_or(AuthError::MissingToken)?;

    keys.verify(&token).map(AuthenticatedUser)
}

/// The verified actor of the current request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Sign a token for `user_id` expiring at `exp` (seconds since epoch)
#[cfg(test)]
pub fn issue_token(secret: &str, user_id: Uuid, exp: usize) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = Claims {
        user_id: user_id.to_string(),
        exp,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encodes")
}
