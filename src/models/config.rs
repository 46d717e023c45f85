use serde::Deserialize;

fn default_nearby_radius_km() -> f64 {
    5.0
}

fn default_session_ttl_secs() -> i64 {
    60 * 60 * 24 * 7
}

/// Configuration options for the directory service.
///
/// Loaded from `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
/// and `APP_`-prefixed environment variables, in that order.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Key material for signing session and identity cookies (at least 64 bytes).
    pub secret: String,
    /// Directory where uploaded images are written.
    pub upload_dir: String,
    /// Absolute URL prefix under which `upload_dir` is served.
    pub public_upload_url: String,
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
    /// Validity window of an authenticated session.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
    /// Send session and identity cookies over HTTPS only.
    #[serde(default)]
    pub cookie_secure: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "address": "127.0.0.1",
            "port": 8080,
            "database_url": "app.db",
            "secret": "s",
            "upload_dir": "./uploads",
            "public_upload_url": "http://127.0.0.1:8080/uploads",
        })
    }

    #[test]
    fn optional_fields_take_defaults() {
        let config: ServerConfig = serde_json::from_value(minimal()).unwrap();
        assert_eq!(config.nearby_radius_km, 5.0);
        assert_eq!(config.session_ttl_secs, 604_800);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn secure_cookies_can_be_enabled() {
        let mut raw = minimal();
        raw["cookie_secure"] = serde_json::Value::Bool(true);
        let config: ServerConfig = serde_json::from_value(raw).unwrap();
        assert!(config.cookie_secure);
    }
}
