//! Session token issuing and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Signs and checks the bearer tokens handed out at login
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    access_token_expiry: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Farmer ID
    pub sid: String, // Session ID
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn farmer_id(&self) -> AppResult<i64> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    pub fn session_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sid).map_err(|_| AppError::InvalidToken)
    }
}

/// Authentication token returned at login
#[derive(Debug, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &JwtConfig) -> AppResult<Self> {
        if config.secret.trim().is_empty() {
            return Err(AppError::Configuration("jwt.secret is not set".into()));
        }

        Ok(Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry: config.access_token_expiry,
        })
    }

    /// Issue a token bound to a live session
    pub fn issue_token(&self, session_id: Uuid, farmer_id: i64) -> AppResult<AuthToken> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: farmer_id.to_string(),
            sid: session_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}
