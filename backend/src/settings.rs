//! Server settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Listener and storage settings for the HTTP server.
///
/// Leaving `database_url` unset runs the server on the in-memory store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MAGAZINE")]
pub struct ServerSettings {
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to ten connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("magazine")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("MAGAZINE_HOST", None::<String>),
            ("MAGAZINE_PORT", None::<String>),
            ("MAGAZINE_DATABASE_URL", None::<String>),
            ("MAGAZINE_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MAGAZINE_HOST", Some("127.0.0.1".to_owned())),
            ("MAGAZINE_PORT", Some("9090".to_owned())),
            (
                "MAGAZINE_DATABASE_URL",
                Some("postgres://localhost/magazine".to_owned()),
            ),
            ("MAGAZINE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9090)));
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/magazine")
        );
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    #[case(Some("   ".to_owned()), None)]
    #[case(Some(" postgres://db ".to_owned()), Some("postgres://db"))]
    #[case(None, None)]
    fn blank_database_urls_are_ignored(
        #[case] raw: Option<String>,
        #[case] expected: Option<&str>,
    ) {
        let settings = ServerSettings {
            host: None,
            port: None,
            database_url: raw,
            db_max_connections: Some(0),
        };

        assert_eq!(settings.database_url(), expected);
        assert_eq!(settings.db_max_connections(), 10);
    }
}
