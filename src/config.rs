use anyhow::Context;

/// Which document store backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    InMemory { preload_demo_data: bool },
    Mongo { url: String, database: String },
}

/// The configuration parameters for the application.
///
/// Values are pulled from environment variables, optionally seeded from a
/// `.env` file in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host to bind the HTTP listener to.
    pub host: String,
    /// The port to listen for HTTP requests on.
    pub port: u16,
    pub database: DatabaseConfig,
    /// Origins allowed by CORS; `*` allows any.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?,
            None => 8000,
        };

        let use_in_memory = lookup("USE_IN_MEMORY_DB")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        let mongo_url = lookup("MONGO_URL").filter(|url| !url.is_empty());

        let database = match mongo_url {
            Some(url) if !use_in_memory => DatabaseConfig::Mongo {
                url,
                database: lookup("DB_NAME").unwrap_or_else(|| "homzy".to_string()),
            },
            _ => DatabaseConfig::InMemory {
                preload_demo_data: lookup("PRELOAD_DEMO_DATA")
                    .map(|v| v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host,
            port,
            database,
            cors_origins,
        })
    }

    /// Address to bind; the host may be a name, an IPv4 or an IPv6 literal.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory_store() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(
            config.database,
            DatabaseConfig::InMemory {
                preload_demo_data: false
            }
        );
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn mongo_requires_url_and_opt_out_of_memory() {
        let config = load(&[
            ("MONGO_URL", "mongodb://localhost:27017"),
            ("USE_IN_MEMORY_DB", "FALSE"),
        ])
        .unwrap();
        assert_eq!(
            config.database,
            DatabaseConfig::Mongo {
                url: "mongodb://localhost:27017".to_string(),
                database: "homzy".to_string(),
            }
        );

        let config = load(&[("MONGO_URL", "mongodb://localhost:27017")]).unwrap();
        assert!(matches!(config.database, DatabaseConfig::InMemory { .. }));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, http://127.0.0.1:3000,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn ipv6_host_is_kept_verbatim() {
        let config = load(&[("HOST", "::"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.listen_addr(), ("::", 9000));
    }

    #[tokio::test]
    async fn listen_addr_binds_host_names() {
        let config = load(&[("HOST", "localhost"), ("PORT", "0")]).unwrap();
        let listener = tokio::net::TcpListener::bind(config.listen_addr())
            .await
            .unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(load(&[("PORT", "eighty")]).is_err());
    }
}
