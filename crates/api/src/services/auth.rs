//! Authentication service.
//!
//! Registration, login, and bearer-token resolution over the user store.
//! Passwords are hashed with Argon2id; identity is asserted between
//! requests by the signed tokens from [`crate::services::token`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use pinpoint_core::{Email, EmailError, UserId};

use crate::db::{RepositoryError, UserStore};
use crate::models::user::{NewUser, User};
use crate::services::token::{Claims, TokenCodec, TokenError};

/// Errors produced by the authentication flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration hit an email that is already taken.
    #[error("email already registered")]
    DuplicateEmail,

    /// Registration email failed syntax validation.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Login failed. Deliberately identical for an unknown email and a
    /// wrong password, so callers cannot probe which emails exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token resolution failed: undecodable token or vanished user.
    #[error("invalid authentication credentials")]
    Unauthorized,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Token issuance failed.
    #[error("token issuance failed: {0}")]
    Token(TokenError),

    /// Store failure outside the enumerated cases.
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Authentication service.
///
/// Borrowed per request from [`crate::state::AppState`]; holds no state of
/// its own.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenCodec,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(users: &'a dyn UserStore, tokens: &'a TokenCodec) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and issue their first bearer token.
    ///
    /// The duplicate check runs against the raw input before syntax
    /// validation, so a malformed-but-taken email reports
    /// `DuplicateEmail`, not `InvalidEmail`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is taken (also on
    /// an insert race losing to a concurrent registration) and
    /// `AuthError::InvalidEmail` if it fails validation.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        phone: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        if self
            .users
            .find_by_email(email)
            .await
            .map_err(AuthError::Repository)?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail);
        }

        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .insert(NewUser {
                email,
                name: name.to_owned(),
                phone: phone.to_owned(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateEmail,
                other => AuthError::Repository(other),
            })?;

        self.issue_token(&user)
    }

    /// Login with email and password, issuing a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(AuthError::Repository)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(&user)
    }

    /// Resolve the acting user from a presented bearer token.
    ///
    /// Only the `id` claim is trusted; the user is re-fetched from the
    /// store so a deleted account fails closed even while its token still
    /// verifies.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for an undecodable token or a
    /// user that no longer exists.
    pub async fn resolve_current_user(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .tokens
            .decode(token)
            .map_err(|_| AuthError::Unauthorized)?;

        self.fetch_user(claims.id).await
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, AuthError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(AuthError::Repository)?
            .ok_or(AuthError::Unauthorized)
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.tokens
            .encode(Claims::from(user))
            .map_err(AuthError::Token)
    }
}

/// Hash a password using Argon2id.
///
/// Each call salts freshly, so hashing the same plaintext twice yields
/// different strings.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// Fails closed: a malformed stored hash verifies as `false`, never as an
/// ambiguous success.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
