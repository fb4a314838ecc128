//! Bearer token authentication for the JSON API.
//!
//! Handlers opt in to authentication by taking [`Claims`] as an argument.
//! The extractor rejects requests without a valid `Authorization: Bearer`
//! header before the handler body runs.

use std::str::FromStr;

use axum::{
    Json, RequestPartsExt,
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::UserID,
    report::ChartRenderer,
    state::AppState,
    stores::UserStore,
};

/// How long a token stays valid after it is issued.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// The signing and verification keys for JSON Web Tokens, derived from the
/// server secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Derive both keys from `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The contents of a JSON Web Token.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// The id of the authenticated user.
    pub sub: i64,
    /// The time the token was issued.
    pub iat: usize,
    /// The expiry time of the token.
    pub exp: usize,
}

impl Claims {
    /// The id of the user this token was issued to.
    pub fn user_id(&self) -> UserID {
        UserID::new(self.sub)
    }
}

impl<S> FromRequestParts<S> for Claims
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let keys = JwtKeys::from_ref(state);
        let token_data = decode_jwt(bearer.token(), &keys)?;

        Ok(token_data.claims)
    }
}

/// The email and password submitted at sign-in.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The response body for a successful sign-in.
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserID,
}

/// Handler for sign-in requests.
///
/// Unknown emails and wrong passwords produce the same error so the response
/// does not reveal which emails are registered.
pub async fn log_in<C>(
    State(state): State<AppState<C>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let email =
        EmailAddress::from_str(&credentials.email).map_err(|_| Error::InvalidCredentials)?;

    let user = state.user_store.get_by_email(&email).map_err(|e| match e {
        Error::NotFound => Error::InvalidCredentials,
        error => error,
    })?;

    if !user.password_hash().verify(&credentials.password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_jwt(user.id(), &state.jwt_keys)?;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id(),
    }))
}

pub(crate) fn encode_jwt(user_id: UserID, keys: &JwtKeys) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.as_i64(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &keys.encoding).map_err(|_| Error::TokenCreation)
}

pub(crate) fn decode_jwt(token: &str, keys: &JwtKeys) -> Result<TokenData<Claims>, Error> {
    decode(token, &keys.decoding, &Validation::default()).map_err(|_| Error::InvalidToken)
}
