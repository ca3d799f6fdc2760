// RLINK serial framing for AK60 motors
//
// Frame format: [0xAA, 0xAF, 0x0F, 0xA1, Payload(8)..., Address, Mode, Checksum]
// The checksum is the low byte of the sum of every preceding byte.

/// Prefix of every command frame
pub const RLINK_PREFIX: [u8; 4] = [0xAA, 0xAF, 0x0F, 0xA1];

/// Mode byte for data frames
pub const MODE_DATA: u8 = 0x01;

/// Handshake sent once after the port is opened
pub const STARTUP_MESSAGE: [u8; 7] = [0xAA, 0xAF, 0x07, 0xA2, 0xA1, 0x01, 0xA4];
pub const STARTUP_REPLY_LEN: usize = 7;

/// CAN data carried inside one frame
pub const PAYLOAD_LEN: usize = 8;

/// Wire length of a command frame: prefix + payload + address + mode + checksum
pub const FRAME_LEN: usize = RLINK_PREFIX.len() + PAYLOAD_LEN + 3;

/// Fixed length of the reply to any command frame
pub const REPLY_LEN: usize = 11;

/// 8-byte CAN data field of a command frame
pub type CanPayload = [u8; PAYLOAD_LEN];

/// Special payloads understood by the motor firmware
pub const PAYLOAD_START: CanPayload = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC];
pub const PAYLOAD_STOP: CanPayload = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFD];
pub const PAYLOAD_RESET: CanPayload = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE];

/// Error types for RLINK communication
#[derive(Debug, thiserror::Error)]
pub enum RlinkError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout waiting for reply from motor {address}")]
    Timeout { address: u8 },

    #[error("Field widths add up to {total_bits} bits, not a whole number of bytes")]
    FieldWidth { total_bits: u32 },

    #[error("Value {value} does not fit in a {bits}-bit field")]
    FieldOverflow { value: u32, bits: u32 },
}

pub type Result<T> = std::result::Result<T, RlinkError>;

/// Low byte of the sum of all bytes
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Build a complete frame: prefix, payload, address and mode, then checksum
pub fn build_frame(prefix: &[u8], payload: &[u8], address: u8, mode: u8) -> Vec<u8> {
    let mut frame = Vec::with_capacity(prefix.len() + payload.len() + 3);

    frame.extend_from_slice(prefix);
    frame.extend_from_slice(payload);
    frame.push(address);
    frame.push(mode);
    frame.push(checksum(&frame));

    frame
}

/// Build a data frame for one motor
pub fn command_frame(payload: &CanPayload, address: u8) -> Vec<u8> {
    build_frame(&RLINK_PREFIX, payload, address, MODE_DATA)
}

/// Format bytes as contiguous uppercase hex for logging
pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x01, 0x02, 0x03]), 6);
        // 0xAA + 0xAF + 0x0F + 0xA1 + 1 + 1 = 0x20B
        assert_eq!(checksum(&[0xAA, 0xAF, 0x0F, 0xA1, 0x01, 0x01]), 0x0B);
    }

    #[test]
    fn test_startup_message_checksum() {
        // The handshake carries its own trailing checksum
        let (body, sum) = STARTUP_MESSAGE.split_at(STARTUP_MESSAGE.len() - 1);
        assert_eq!(checksum(body), sum[0]);
    }

    #[test]
    fn test_build_frame_zero_payload() {
        let frame = build_frame(&RLINK_PREFIX, &[0u8; 8], 1, MODE_DATA);
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(hex(&frame), "AAAF0FA1000000000000000001010B");
    }

    #[test]
    fn test_build_frame_layout() {
        let payload = [1, 2, 3, 4, 5, 6, 7, 8];
        let frame = build_frame(&RLINK_PREFIX, &payload, 0x05, 0x01);
        assert_eq!(&frame[..4], &RLINK_PREFIX);
        assert_eq!(&frame[4..12], &payload);
        assert_eq!(frame[12], 0x05); // address
        assert_eq!(frame[13], 0x01); // mode
        assert_eq!(frame[14], checksum(&frame[..14]));
    }

    #[test]
    fn test_build_frame_arbitrary_prefix() {
        let frame = build_frame(&[0x10], &[0x20], 0x30, 0x40);
        assert_eq!(frame, vec![0x10, 0x20, 0x30, 0x40, 0xA0]);
    }

    #[test]
    fn test_sentinel_frames() {
        assert_eq!(
            hex(&command_frame(&PAYLOAD_START, 1)),
            "AAAF0FA1FFFFFFFFFFFFFFFC010100"
        );
        assert_eq!(
            hex(&command_frame(&PAYLOAD_STOP, 1)),
            "AAAF0FA1FFFFFFFFFFFFFFFD010101"
        );
        assert_eq!(
            hex(&command_frame(&PAYLOAD_RESET, 1)),
            "AAAF0FA1FFFFFFFFFFFFFFFE010102"
        );
        assert_eq!(
            hex(&command_frame(&PAYLOAD_START, 2)),
            "AAAF0FA1FFFFFFFFFFFFFFFC020101"
        );
    }
}
