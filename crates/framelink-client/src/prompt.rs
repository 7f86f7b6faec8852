//! Interactive prompting and input validation.
//!
//! Flag values are restricted to {0,1} here, at the sender's edge. The
//! wire decoder deliberately does not re-check them.

use std::io::{self, BufRead, Write};

use crate::error::{ClientError, ClientResult};

/// Header fields collected interactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInput {
    pub source_port: u16,
    pub dest_port: u16,
    pub sequence: u32,
    pub ack: u8,
    pub syn: u8,
    pub fin: u8,
}

/// Prompts for the payload text and reads one line from stdin.
pub fn read_message() -> ClientResult<String> {
    prompt_line("Enter message: ")
}

/// Prompts for every header field in turn.
pub fn read_header_fields() -> ClientResult<HeaderInput> {
    Ok(HeaderInput {
        source_port: parse_port(&prompt_line("Source port: ")?)?,
        dest_port: parse_port(&prompt_line("Destination port: ")?)?,
        sequence: parse_sequence(&prompt_line("Sequence number: ")?)?,
        ack: parse_flag(&prompt_line("ACK flag (0/1): ")?)?,
        syn: parse_flag(&prompt_line("SYN flag (0/1): ")?)?,
        fin: parse_flag(&prompt_line("FIN flag (0/1): ")?)?,
    })
}

/// Parses a flag value, accepting only 0 or 1.
pub fn parse_flag(input: &str) -> ClientResult<u8> {
    match input.trim() {
        "0" => Ok(0),
        "1" => Ok(1),
        other => Err(ClientError::Input(format!(
            "flag must be 0 or 1, got {other:?}"
        ))),
    }
}

/// Parses a 16-bit port value.
pub fn parse_port(input: &str) -> ClientResult<u16> {
    input
        .trim()
        .parse()
        .map_err(|_| ClientError::Input(format!("invalid port: {input:?}")))
}

/// Parses a 32-bit sequence number.
pub fn parse_sequence(input: &str) -> ClientResult<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| ClientError::Input(format!("invalid sequence number: {input:?}")))
}

fn prompt_line(label: &str) -> ClientResult<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(ClientError::Input(
            "stdin closed before input was entered".into(),
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_zero_and_one() {
        assert_eq!(parse_flag("0").unwrap(), 0);
        assert_eq!(parse_flag("1").unwrap(), 1);
        assert_eq!(parse_flag(" 1 ").unwrap(), 1);
    }

    #[test]
    fn parse_flag_rejects_everything_else() {
        assert!(parse_flag("2").is_err());
        assert!(parse_flag("yes").is_err());
        assert!(parse_flag("").is_err());
        assert!(parse_flag("-1").is_err());
    }

    #[test]
    fn parse_port_bounds() {
        assert_eq!(parse_port("0").unwrap(), 0);
        assert_eq!(parse_port("65535").unwrap(), 65535);
        assert!(parse_port("65536").is_err());
        assert!(parse_port("port").is_err());
    }

    #[test]
    fn parse_sequence_bounds() {
        assert_eq!(parse_sequence("4294967295").unwrap(), u32::MAX);
        assert!(parse_sequence("4294967296").is_err());
    }
}
