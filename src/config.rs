use anyhow::{Context, Result, anyhow};
use std::time::Duration;

/// Where the record table lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// A full connection URL, `mysql://...` or `sqlite:...`.
    Url(String),
    /// Discrete MySQL settings, assembled into connect options at startup.
    MySql(MySqlSettings),
}

#[derive(Clone, PartialEq, Eq)]
pub struct MySqlSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub charset: String,
}

// keep the password out of logs and panics
impl std::fmt::Debug for MySqlSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("charset", &self.charset)
            .finish_non_exhaustive()
    }
}

impl DatabaseTarget {
    /// A loggable description of the target without credentials.
    pub fn describe(&self) -> String {
        match self {
            DatabaseTarget::Url(url) => {
                let scheme = url.split(':').next().unwrap_or_default();
                match url.rsplit_once('@') {
                    Some((_, location)) => format!("{}://{}", scheme, location),
                    None => url.clone(),
                }
            }
            DatabaseTarget::MySql(settings) => format!(
                "mysql://{}:{}/{}",
                settings.host, settings.port, settings.database
            ),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseTarget,
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    pub query_timeout: Duration,
    pub bind_addr: String,
    pub site_name: String,
    pub site_email: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => DatabaseTarget::Url(url),
            None => {
                let database = lookup("MYSQL_DB").ok_or_else(|| {
                    anyhow!("Neither DATABASE_URL nor MYSQL_DB is set in the environment")
                })?;

                let port = match lookup("MYSQL_PORT") {
                    Some(val) => val
                        .parse::<u16>()
                        .with_context(|| format!("MYSQL_PORT is not a valid port: {}", val))?,
                    None => 3306,
                };

                DatabaseTarget::MySql(MySqlSettings {
                    host: lookup("MYSQL_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                    port,
                    database,
                    username: lookup("MYSQL_USER").unwrap_or_else(|| "root".to_string()),
                    password: lookup("MYSQL_PASSWORD").unwrap_or_default(),
                    charset: lookup("MYSQL_CHARSET").unwrap_or_else(|| "utf8".to_string()),
                })
            }
        };

        let max_connections = match lookup("MAX_CONNECTIONS") {
            Some(val) => val
                .parse::<u32>()
                .with_context(|| format!("MAX_CONNECTIONS is not a number: {}", val))?,
            None => 1,
        };
        if max_connections == 0 {
            return Err(anyhow!("MAX_CONNECTIONS must be at least 1"));
        }

        let min_connections = match lookup("MIN_CONNECTIONS") {
            Some(val) => val
                .parse::<u32>()
                .with_context(|| format!("MIN_CONNECTIONS is not a number: {}", val))?,
            None => 0,
        };
        if min_connections > max_connections {
            return Err(anyhow!(
                "MIN_CONNECTIONS ({}) exceeds MAX_CONNECTIONS ({})",
                min_connections,
                max_connections
            ));
        }

        let query_timeout = match lookup("QUERY_TIMEOUT_MS") {
            Some(val) => Duration::from_millis(
                val.parse::<u64>()
                    .with_context(|| format!("QUERY_TIMEOUT_MS is not a number: {}", val))?,
            ),
            None => Duration::from_millis(5000),
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let site_name = lookup("SITE_NAME").unwrap_or_else(|| "localhost".to_string());
        let site_email = lookup("SITE_EMAIL").unwrap_or_else(|| "admin@localhost".to_string());

        Ok(Self {
            database,
            max_connections,
            min_connections,
            query_timeout,
            bind_addr,
            site_name,
            site_email,
        })
    }
}
