use anyhow::{Context, Result, anyhow, bail};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core_types::UserId;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user_id as string)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

impl Claims {
    /// Parse the subject back into a UserId.
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}

/// User Registration Request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// User Login Request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, Clone)]
struct UserRecord {
    user_id: UserId,
    username: String,
    password_hash: String,
}

/// User directory and token issuer.
///
/// Also the identity service for the lock engine: guardians are entered by
/// username and resolved here to the same UserId space the ledger keys on.
pub struct UserAuthService {
    by_username: DashMap<String, UserRecord>,
    by_id: DashMap<UserId, String>,
    next_user_id: AtomicU64,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl UserAuthService {
    pub fn new(jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            by_username: DashMap::new(),
            by_id: DashMap::new(),
            next_user_id: AtomicU64::new(1),
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// Register a new user
    pub fn register(&self, req: RegisterRequest) -> Result<UserId> {
        if req.username.is_empty() {
            bail!("Username cannot be empty");
        }

        // 1. Hash password
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow!("Hashing failed: {}", e))?
            .to_string();

        // 2. Insert, claiming the username atomically
        match self.by_username.entry(req.username.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                bail!("Username already exists")
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let user_id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(UserRecord {
                    user_id,
                    username: req.username.clone(),
                    password_hash,
                });
                self.by_id.insert(user_id, req.username);
                Ok(user_id)
            }
        }
    }

    /// Login user and issue JWT
    pub fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        // 1. Find user by username
        let user = self
            .by_username
            .get(&req.username)
            .map(|r| r.clone())
            .ok_or_else(|| anyhow!("Invalid username or password"))?;

        // 2. Verify password
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow!("Invalid hash format: {}", e))?;

        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| anyhow!("Invalid username or password"))?;

        // 3. Generate JWT
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::hours(self.token_ttl_hours))
            .context("valid timestamp")?
            .timestamp();

        let claims = Claims {
            sub: user.user_id.to_string(),
            exp: expiration as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .context("Failed to generate token")?;

        Ok(AuthResponse {
            token,
            user_id: user.user_id,
            username: user.username,
        })
    }

    /// Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Resolve a username (e.g. a lock's guardian) to its UserId.
    pub fn resolve_username(&self, username: &str) -> Option<UserId> {
        self.by_username.get(username).map(|r| r.user_id)
    }

    /// Reverse lookup, used when rendering lock records.
    pub fn username_of(&self, user_id: UserId) -> Option<String> {
        self.by_id.get(&user_id).map(|n| n.clone())
    }
}
