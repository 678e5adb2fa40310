#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub dev_bypass_token: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET must be set");
        let dev_bypass_token = std::env::var("DEV_BYPASS_TOKEN").ok();
        Self {
            jwt_secret,
            dev_bypass_token,
        }
    }
}
