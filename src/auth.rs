// src/auth.rs
use crate::config::IdentitySettings;
use crate::db::{Database, ProfileRepository};
use crate::models::Profile;
use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Identity metadata carried by the provider's tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub aud: String,
    pub iss: String,
    pub sub: String, // user id
    pub email: String,
    pub user_metadata: Option<UserMetadata>,
    pub exp: usize,
    pub iat: usize,
}

impl From<Claims> for IdentityUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            full_name: claims.user_metadata.and_then(|m| m.full_name),
        }
    }
}

pub struct AuthConfig {
    pub settings: IdentitySettings,
    pub provider_keys: HashMap<String, String>, // kid -> public key PEM
}

impl AuthConfig {
    pub fn new(settings: IdentitySettings) -> Self {
        Self {
            settings,
            provider_keys: HashMap::new(),
        }
    }

    /// Fetch the identity provider's public keys for JWT verification
    pub async fn update_provider_keys(&mut self) -> Result<()> {
        let response = reqwest::get(&self.settings.keys_url).await?;
        let keys: HashMap<String, String> = response.json().await?;

        self.provider_keys = keys;
        info!("Updated identity provider public keys");

        Ok(())
    }
}

/// Authenticated caller with their profile row. Every query and mutation a
/// handler runs is scoped through this value; handlers never re-check
/// authentication themselves.
pub struct AuthenticatedUser {
    pub identity: IdentityUser,
    pub profile: Profile,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let db = match req.guard::<&State<Database>>().await {
            Outcome::Success(db) => db,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
            None => {
                warn!("Missing Authorization header");
                return Outcome::Error((Status::Unauthorized, AuthError::MissingToken));
            }
        };

        let identity = match verify_token(token, auth_config) {
            Ok(user) => user,
            Err(e) => {
                error!("Token verification failed: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::TokenVerificationFailed));
            }
        };

        // Profiles exist implicitly alongside the identity record.
        let profiles = ProfileRepository::new(db.pool());
        let profile = match profiles
            .get_or_create(&identity.id, &identity.email, identity.full_name.as_deref())
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                error!(
                    "Failed to get or create profile for {}: {}",
                    identity.email, e
                );
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        info!("User {} authenticated", identity.email);

        Outcome::Success(AuthenticatedUser { identity, profile })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    DatabaseError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::DatabaseError => "Database error occurred",
        }
    }
}

fn verify_token(token: &str, auth_config: &AuthConfig) -> Result<IdentityUser> {
    let header = jsonwebtoken::decode_header(token)?;
    let kid = header
        .kid
        .ok_or_else(|| anyhow::anyhow!("Missing kid in token header"))?;

    let public_key = auth_config
        .provider_keys
        .get(&kid)
        .ok_or_else(|| anyhow::anyhow!("Unknown key ID: {}", kid))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&auth_config.settings.audience]);
    validation.set_issuer(&[&auth_config.settings.issuer]);

    let decoding_key = DecodingKey::from_rsa_pem(public_key.as_bytes())?;
    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    Ok(token_data.claims.into())
}

/// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth { user: Some(auth) }),
            _ => Outcome::Success(OptionalAuth { user: None }),
        }
    }
}
