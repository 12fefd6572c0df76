//! HS256 JSON Web Token implementation of the [`TokenIssuer`] port.
//!
//! Expiry is checked against the injected clock rather than the library's
//! wall-clock check, with no leeway: a token is rejected once `exp <= now`.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, TokenClaims, TokenSubject, token_ttl};

/// Signs and verifies tokens with a shared HMAC secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Build an issuer from the raw secret bytes.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

impl std::fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &TokenSubject) -> Result<AccessToken, TokenError> {
        let issued_at = self.clock.utc();
        let claims = TokenClaims {
            id: subject.id.clone(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + token_ttl()).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &AccessToken) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token.as_str(), &self.decoding, &self.validation)
            .map_err(|_| TokenError::invalid())?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        Ok(data.claims)
    }
}
