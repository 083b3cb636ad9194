//! Application settings loaded via OrthoConfig.
//!
//! Values come from `COURSES_*` environment variables, CLI flags and config
//! files. Unset optional values fall back to the defaults below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSES")]
pub struct AppSettings {
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`. Defaults to on.
    pub cookie_secure: Option<bool>,
}

impl AppSettings {
    /// Socket address to listen on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to ten connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Path of the session key file.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries the `Secure` attribute.
    ///
    /// Only an explicit `false` turns it off.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether a missing key file may be replaced by a random key.
    ///
    /// Debug builds always allow it.
    pub fn allows_ephemeral_session_key(&self) -> bool {
        cfg!(debug_assertions) || self.session_allow_ephemeral
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "COURSES_HOST",
        "COURSES_PORT",
        "COURSES_DATABASE_URL",
        "COURSES_DB_MAX_CONNECTIONS",
        "COURSES_SESSION_KEY_FILE",
        "COURSES_SESSION_ALLOW_EPHEMERAL",
        "COURSES_COOKIE_SECURE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("courses-api")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|var| (var, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:5000".parse().expect("addr"));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from("/var/run/secrets/session_key")
        );
        assert!(!settings.session_allow_ephemeral);
        assert_eq!(settings.cookie_secure, None);
        assert!(settings.cookie_secure());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COURSES_HOST", Some("127.0.0.1".to_owned())),
            ("COURSES_PORT", Some("8081".to_owned())),
            (
                "COURSES_DATABASE_URL",
                Some("postgres://localhost/courses".to_owned()),
            ),
            ("COURSES_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("COURSES_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("COURSES_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("COURSES_COOKIE_SECURE", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:8081".parse().expect("addr"));
        assert_eq!(settings.database_url(), Some("postgres://localhost/courses"));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(settings.allows_ephemeral_session_key());
        assert!(!settings.cookie_secure());
    }

    #[rstest]
    fn blank_database_url_means_memory_store() {
        let _guard = lock_env(VARS.map(|var| {
            let value = (var == "COURSES_DATABASE_URL").then(|| "   ".to_owned());
            (var, value)
        }));

        assert_eq!(load_from_empty_args().database_url(), None);
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    #[case(None, true)]
    fn cookie_secure_is_on_unless_disabled(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env(VARS.map(|var| {
            let value = (var == "COURSES_COOKIE_SECURE")
                .then_some(value)
                .flatten()
                .map(str::to_owned);
            (var, value)
        }));

        assert_eq!(load_from_empty_args().cookie_secure(), expected);
    }
}
