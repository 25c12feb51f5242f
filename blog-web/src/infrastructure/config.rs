/// Minimum key length accepted by the cookie crate for signing + encryption.
const SESSION_KEY_MIN_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server against the in-memory store.
    pub database_url: Option<String>,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let session_key = std::env::var("SESSION_KEY")
            .ok()
            .filter(|s| !s.is_empty());
        if let Some(key) = &session_key {
            if key.len() < SESSION_KEY_MIN_LEN {
                anyhow::bail!("SESSION_KEY must be at least {SESSION_KEY_MIN_LEN} bytes");
            }
        }
        let cookie_secure = match std::env::var("COOKIE_SECURE") {
            Ok(value) => parse_bool(&value)
                .ok_or_else(|| anyhow::anyhow!("invalid COOKIE_SECURE: {}", value))?,
            Err(_) => false,
        };
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            session_key,
            cookie_secure,
            cors_origins,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;
    use rstest::rstest;

    #[rstest]
    #[case("true", Some(true))]
    #[case(" ON ", Some(true))]
    #[case("1", Some(true))]
    #[case("false", Some(false))]
    #[case("0", Some(false))]
    #[case("maybe", None)]
    fn parses_boolean_flags(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
