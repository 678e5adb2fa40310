use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Token claims issued by the identity service. Issuance itself lives
/// outside this backend; we only verify.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub exp: usize,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(sub: i32, secret: &str, exp: usize) -> String {
        encode(
            &Header::default(),
            &Claims { sub, exp },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode token")
    }

    #[test]
    fn valid_token_round_trips() {
        let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
        let token = issue(42, "secret", exp);
        let claims = verify_token(&token, "secret").expect("verify");
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
        let token = issue(42, "secret", exp);
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = (chrono::Utc::now().timestamp() - 3600) as usize;
        let token = issue(42, "secret", exp);
        assert!(verify_token(&token, "secret").is_err());
    }
}
