//! Server configuration read from the command line and the environment.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

/// The REST API server for recording transactions.
///
/// Every option can also be set with the environment variable shown in its help text.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "TALLY_DATABASE_PATH")]
    pub db_path: PathBuf,

    /// The address to serve the API from.
    #[arg(long, env = "TALLY_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "TALLY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// File path for the debug log.
    #[arg(long, env = "TALLY_LOG_PATH", default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl Config {
    /// The socket address the server should bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        net::{IpAddr, Ipv4Addr, SocketAddr},
        path::PathBuf,
    };

    use clap::{Parser, error::ErrorKind};

    use super::Config;

    #[test]
    fn parses_all_options() {
        let config = Config::try_parse_from([
            "server",
            "--db-path",
            "tally.db",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-path",
            "/tmp/tally.log",
        ])
        .expect("Could not parse config");

        assert_eq!(
            config,
            Config {
                db_path: PathBuf::from("tally.db"),
                host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                port: 8080,
                log_path: PathBuf::from("/tmp/tally.log"),
            }
        );
        assert_eq!(
            config.socket_addr(),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
    }

    #[test]
    fn missing_db_path_is_rejected() {
        let result = Config::try_parse_from(["server", "--port", "8080"]);

        assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ErrorKind::MissingRequiredArgument)
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = Config::try_parse_from(["server", "--db-path", "tally.db", "--port", "huge"]);

        assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ErrorKind::ValueValidation)
        );
    }

    #[test]
    fn invalid_host_is_rejected() {
        let result =
            Config::try_parse_from(["server", "--db-path", "tally.db", "--host", "not an ip"]);

        assert!(result.is_err());
    }
}
