//! Command-line interface definition.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// framelink - point-to-point framed messaging over TCP
#[derive(Debug, Parser)]
#[command(name = "framelink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FRAMELINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Output the exchange result as JSON
    #[arg(long)]
    pub json: bool,

    // --- Connection flags ---
    /// Responder host to connect to
    #[arg(long, env = "FRAMELINK_HOST")]
    pub host: Option<String>,

    /// Responder port to connect to
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Connection timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    // --- Message flags ---
    /// Source port field of the header
    #[arg(long, default_value = "8000")]
    pub source_port: u16,

    /// Destination port field of the header
    #[arg(long, default_value = "8080")]
    pub dest_port: u16,

    /// Sequence number of the message
    #[arg(long, default_value = "1")]
    pub seq: u32,

    /// Set the ACK flag
    #[arg(long)]
    pub ack: bool,

    /// Set the SYN flag
    #[arg(long)]
    pub syn: bool,

    /// Set the FIN flag
    #[arg(long)]
    pub fin: bool,

    /// Payload text (prompted for interactively when omitted)
    #[arg(long, short)]
    pub message: Option<String>,

    /// Prompt for every header field instead of taking them from flags
    #[arg(long, short)]
    pub interactive: bool,

    // --- TLS flags ---
    /// Connect over TLS
    #[cfg(feature = "tls")]
    #[arg(long)]
    pub tls: bool,

    /// Extra CA certificate bundle (PEM) for TLS verification
    #[cfg(feature = "tls")]
    #[arg(long)]
    pub tls_ca: Option<PathBuf>,

    /// Server name to verify the TLS certificate against (defaults to host)
    #[cfg(feature = "tls")]
    #[arg(long)]
    pub tls_domain: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the responder in the foreground
    Serve(ServeArgs),
}

/// Flags for the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Event log file
    #[arg(long, default_value = "server.log")]
    pub log_file: PathBuf,

    /// PEM certificate chain enabling TLS
    #[cfg(feature = "tls")]
    #[arg(long, requires = "tls_key")]
    pub tls_cert: Option<PathBuf>,

    /// PEM private key for the certificate
    #[cfg(feature = "tls")]
    #[arg(long, requires = "tls_cert")]
    pub tls_key: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_flags() {
        let cli = Cli::parse_from([
            "framelink",
            "--syn",
            "--seq",
            "7",
            "--message",
            "hello",
        ]);
        assert!(cli.syn);
        assert!(!cli.ack);
        assert!(!cli.fin);
        assert_eq!(cli.seq, 7);
        assert_eq!(cli.message.as_deref(), Some("hello"));
        assert_eq!(cli.source_port, 8000);
        assert_eq!(cli.dest_port, 8080);
    }

    #[test]
    fn parses_serve_subcommand() {
        let cli = Cli::parse_from(["framelink", "serve", "--bind", "0.0.0.0:9000"]);
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.bind, "0.0.0.0:9000".parse().unwrap());
                assert_eq!(args.log_file, PathBuf::from("server.log"));
            }
            _ => panic!("expected serve subcommand"),
        }
    }

    #[cfg(feature = "tls")]
    #[test]
    fn serve_tls_flags_require_each_other() {
        let result = Cli::try_parse_from(["framelink", "serve", "--tls-cert", "c.pem"]);
        assert!(result.is_err());
    }
}
