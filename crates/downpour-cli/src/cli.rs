use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use downpour_client::ClientConfig;

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Connection options. Unset options are read from the environment.
    #[command(flatten)]
    pub(crate) connection: CliConnectionOptions,

    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Operations exposed on the command line.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub(crate) enum Command {
    /// Add a torrent from a magnet link.
    AddMagnet {
        /// The magnet link.
        magnet_link: String,
    },

    /// List all torrents.
    List,

    /// Show daemon statistics and the number of torrents.
    Status,

    /// Stop seeding a torrent once it reaches the given share ratio.
    SetRatio {
        /// Hash of the torrent.
        torrent_hash: String,
        /// Share ratio at which to stop seeding.
        max_ratio: f64,
    },

    /// Remove a torrent.
    Remove {
        /// Hash of the torrent.
        torrent_hash: String,
        /// Keep the downloaded data on disk.
        #[arg(long, default_value_t = false)]
        keep_data: bool,
    },
}

/// CLI representation of the connection settings.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct CliConnectionOptions {
    /// URL of the Deluge Web UI JSON endpoint (DELUGE_WEB_URL).
    #[arg(short, long)]
    pub(crate) url: Option<String>,

    /// Web UI password (DELUGE_WEB_PASSWORD).
    #[arg(short, long)]
    pub(crate) password: Option<String>,

    /// Request timeout in seconds (DELUGE_WEB_TIMEOUT_SECS).
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
}

impl CliConnectionOptions {
    /// Applies the options given on the command line on top of `config`.
    pub(crate) fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = self.url {
            config.endpoint = url;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_ratio() {
        let cli = Cli::try_parse_from(["downpour", "set-ratio", "abc123", "1.5"]).unwrap();

        assert_eq!(
            cli.command,
            Command::SetRatio {
                torrent_hash: "abc123".to_string(),
                max_ratio: 1.5,
            }
        );
    }

    #[test]
    fn parses_remove_with_keep_data() {
        let cli =
            Cli::try_parse_from(["downpour", "remove", "abc123", "--keep-data"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Remove {
                torrent_hash: "abc123".to_string(),
                keep_data: true,
            }
        );
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from([
            "downpour",
            "--url",
            "http://seedbox:8112/json",
            "--timeout-secs",
            "5",
            "list",
        ])
        .unwrap();
        let env = ClientConfig {
            password: "from-env".to_string(),
            ..Default::default()
        };

        let config = cli.connection.apply(env);

        assert_eq!(config.endpoint, "http://seedbox:8112/json");
        assert_eq!(config.password, "from-env");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn requires_a_command() {
        assert!(Cli::try_parse_from(["downpour"]).is_err());
    }
}
