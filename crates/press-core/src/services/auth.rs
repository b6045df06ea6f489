//! Admin sign-in and bearer token resolution.

use std::sync::Arc;

use crate::domain::{ADMIN_ROLE, Actor};
use crate::ports::{AuthError, PasswordService, TokenService};

/// The single configured administrator.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    /// Argon2 PHC string. `None` disables sign-in.
    pub password_hash: Option<String>,
}

/// An issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

pub struct AuthService {
    account: AdminAccount,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        account: AdminAccount,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            account,
            passwords,
            tokens,
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(hash) = self.account.password_hash.as_deref() else {
            tracing::warn!("Admin sign-in attempted but no password hash is configured");
            return Err(AuthError::InvalidCredentials);
        };

        // Verify even on a username mismatch so both failures cost the same.
        let password_ok = self.passwords.verify(password, hash)?;
        if username != self.account.username || !password_ok {
            tracing::warn!(user = %username, "Admin sign-in failed");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .generate_token(username, vec![ADMIN_ROLE.to_string()])?;
        tracing::info!(user = %username, "Admin signed in");

        Ok(IssuedToken {
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    /// Resolve a bearer token to the acting principal.
    pub fn authenticate(&self, token: &str) -> Result<Actor, AuthError> {
        Ok(self.tokens.validate_token(token)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TokenClaims;

    /// Accepts a password when the stored "hash" is `hashed:<password>`.
    struct PlainPasswords;

    impl PasswordService for PlainPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("hashed:{}", password))
        }
    }

    /// Tokens are `username|role,role`.
    struct PlainTokens;

    impl TokenService for PlainTokens {
        fn generate_token(&self, username: &str, roles: Vec<String>) -> Result<String, AuthError> {
            Ok(format!("{}|{}", username, roles.join(",")))
        }

        fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
            let (username, roles) = token
                .split_once('|')
                .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
            Ok(TokenClaims {
                username: username.to_string(),
                roles: roles.split(',').map(String::from).collect(),
                exp: 0,
            })
        }

        fn expiration_seconds(&self) -> i64 {
            60
        }
    }

    fn service(password_hash: Option<&str>) -> AuthService {
        AuthService::new(
            AdminAccount {
                username: "admin".to_string(),
                password_hash: password_hash.map(String::from),
            },
            Arc::new(PlainPasswords),
            Arc::new(PlainTokens),
        )
    }

    #[test]
    fn test_login_issues_admin_token() {
        let issued = service(Some("hashed:secret")).login("admin", "secret").unwrap();
        assert_eq!(issued.token, "admin|admin");
        assert_eq!(issued.expires_in, 60);
    }

    #[test]
    fn test_login_rejects_wrong_password_or_user() {
        let service = service(Some("hashed:secret"));
        assert!(matches!(
            service.login("admin", "guess"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("root", "secret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_disabled_without_hash() {
        assert!(matches!(
            service(None).login("admin", "secret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_yields_actor() {
        let actor = service(None).authenticate("editor|admin").unwrap();
        assert_eq!(actor.username, "editor");
        assert!(actor.is_admin());
    }
}
