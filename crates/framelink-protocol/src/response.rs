//! Response selection driven by the header's control flags.

use crate::header::MessageHeader;

/// Maps a decoded header to the responder's canned reply.
///
/// Several flags may be set at once; precedence is SYN, then ACK, then
/// FIN, then plain data. Pure and deterministic.
pub fn select_response(header: &MessageHeader) -> String {
    if header.is_syn() {
        "SYN received - connection was initiated".to_string()
    } else if header.is_ack() {
        "ACK received - message was acknowledged".to_string()
    } else if header.is_fin() {
        "FIN received - connection is closing".to_string()
    } else {
        format!("Data received - payload length: {}", header.payload_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(ack: u8, syn: u8, fin: u8) -> MessageHeader {
        MessageHeader {
            ack,
            syn,
            fin,
            ..Default::default()
        }
    }

    #[test]
    fn syn_wins_over_everything() {
        assert_eq!(
            select_response(&header(1, 1, 1)),
            "SYN received - connection was initiated"
        );
    }

    #[test]
    fn ack_wins_over_fin() {
        assert_eq!(
            select_response(&header(1, 0, 1)),
            "ACK received - message was acknowledged"
        );
    }

    #[test]
    fn fin_alone() {
        assert_eq!(
            select_response(&header(0, 0, 1)),
            "FIN received - connection is closing"
        );
    }

    #[test]
    fn plain_data_reports_payload_length() {
        let mut h = header(0, 0, 0);
        h.payload_len = 512;
        assert_eq!(select_response(&h), "Data received - payload length: 512");
    }

    #[test]
    fn nonzero_flag_bytes_count_as_set() {
        assert_eq!(
            select_response(&header(0, 0xFF, 0)),
            "SYN received - connection was initiated"
        );
    }
}
