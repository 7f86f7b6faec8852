//! Send command — one framed exchange with the responder.

use std::time::Duration;

use framelink_protocol::{Message, MessageHeader};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::prompt;
use crate::socket::MessageClient;

/// Builds one message from flags or prompts and performs the exchange.
pub async fn run(cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    let host = cli
        .host
        .clone()
        .or_else(|| config.host.clone())
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = cli.port.or(config.port).unwrap_or(8080);
    let timeout = Duration::from_secs(cli.timeout.or(config.timeout).unwrap_or(5));

    let header = if cli.interactive {
        let fields = prompt::read_header_fields()?;
        MessageHeader {
            source_port: fields.source_port,
            dest_port: fields.dest_port,
            sequence: fields.sequence,
            ack: fields.ack,
            syn: fields.syn,
            fin: fields.fin,
            payload_len: 0,
        }
    } else {
        MessageHeader {
            source_port: cli.source_port,
            dest_port: cli.dest_port,
            sequence: cli.seq,
            ack: cli.ack as u8,
            syn: cli.syn as u8,
            fin: cli.fin as u8,
            payload_len: 0,
        }
    };

    let payload = match cli.message {
        Some(ref text) => text.clone(),
        None => prompt::read_message()?,
    };
    if payload.len() > u16::MAX as usize {
        return Err(ClientError::Input(format!(
            "message too long: {} bytes (max {})",
            payload.len(),
            u16::MAX
        )));
    }

    let message = Message::with_payload(header, payload.into_bytes());
    let client = MessageClient::new(host, port, timeout);

    let response = dispatch(cli, config, &client, &message).await?;

    if cli.json {
        let out = serde_json::json!({
            "source_port": message.header.source_port,
            "dest_port": message.header.dest_port,
            "sequence": message.header.sequence,
            "response": response,
        });
        println!("{out}");
    } else {
        println!("Server response: {response}");
    }
    Ok(())
}

#[cfg(feature = "tls")]
async fn dispatch(
    cli: &Cli,
    config: &ClientConfig,
    client: &MessageClient,
    message: &Message,
) -> ClientResult<String> {
    if cli.tls || config.tls.enabled {
        let options = crate::tls::TlsOptions {
            ca_file: cli.tls_ca.clone().or_else(|| config.tls.ca_file.clone()),
            domain: cli.tls_domain.clone().or_else(|| config.tls.domain.clone()),
        };
        client.send_tls(message, &options).await
    } else {
        client.send(message).await
    }
}

#[cfg(not(feature = "tls"))]
async fn dispatch(
    _cli: &Cli,
    _config: &ClientConfig,
    client: &MessageClient,
    message: &Message,
) -> ClientResult<String> {
    client.send(message).await
}
