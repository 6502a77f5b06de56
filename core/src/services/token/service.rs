//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying session tokens
#[derive(Clone)]
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Session token lifetime in seconds
    pub fn expiry_seconds(&self) -> i64 {
        self.config.expiry_seconds
    }

    /// Issues a session token embedding the user's id, email and role
    pub fn issue(&self, user_id: i64, email: &str, role: Role) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, email, role, self.config.expiry_seconds)
            .with_issuer(&self.config.issuer, &self.config.audience);
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience and expiry all check out
    /// * `Err(TokenError)` - Token is expired, forged or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let kind = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAudience
                    | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(kind)
            })
    }

    /// Verifies a session token and turns it into the caller's identity
    pub fn authenticate(&self, token: &str) -> Result<Identity, DomainError> {
        let claims = self.verify(token)?;
        Identity::from_claims(&claims).ok_or(DomainError::Token(TokenError::InvalidClaims))
    }
}
