#![doc = r#"
Variable-length quantities

MIDI files store delta-times and payload lengths as big-endian groups of 7 bits.
Every byte but the last has its leading bit set.

```text
value        bytes
0x00000000   00
0x0000007F   7F
0x00000080   81 00
0x00003FFF   FF 7F
0x000F4240   BD 84 40
0x0FFFFFFF   FF FF FF 7F
```
"#]

use alloc::vec::Vec;

use crate::{ParseError, writer::WriteError};

/// The largest value a variable-length quantity may carry.
pub const MAX_VLQ: u32 = 0x0FFF_FFFF;

/// The most bytes [`decode_vlq`] will examine before failing.
///
/// Four are enough for [`MAX_VLQ`]; one more tolerates a zero-padded leading group.
pub const MAX_VLQ_BYTES: usize = 5;

/// Decode a variable-length quantity from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied.
///
/// # Errors
/// [`ParseError::MalformedVlq`] if no terminating byte is found within
/// [`MAX_VLQ_BYTES`] bytes or the buffer, or if the value exceeds [`MAX_VLQ`].
pub fn decode_vlq(bytes: &[u8]) -> Result<(u32, usize), ParseError> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().take(MAX_VLQ_BYTES).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u64;
        if byte & 0x80 == 0 {
            if value > MAX_VLQ as u64 {
                return Err(ParseError::MalformedVlq { read: i + 1 });
            }
            return Ok((value as u32, i + 1));
        }
    }
    Err(ParseError::MalformedVlq {
        read: bytes.len().min(MAX_VLQ_BYTES),
    })
}

/// Append the minimal encoding of `value` to `out`.
///
/// # Errors
/// [`WriteError::VlqOutOfRange`] if `value` exceeds [`MAX_VLQ`]. Nothing is written.
pub fn write_vlq(value: u32, out: &mut Vec<u8>) -> Result<(), WriteError> {
    if value > MAX_VLQ {
        return Err(WriteError::VlqOutOfRange(value));
    }
    let mut groups = [0u8; 4];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
    Ok(())
}

/// Encode `value` into a fresh buffer. See [`write_vlq`].
pub fn encode_vlq(value: u32) -> Result<Vec<u8>, WriteError> {
    let mut out = Vec::with_capacity(4);
    write_vlq(value, &mut out)?;
    Ok(out)
}

/// Splits a VLQ length prefix and the payload it announces off the front of `data`.
///
/// Returns the payload and the total number of bytes used, prefix included.
/// `truncated` builds the error for a payload that runs past the end of `data`.
pub(crate) fn read_length_prefixed(
    data: &[u8],
    truncated: impl FnOnce(usize, usize) -> ParseError,
) -> Result<(&[u8], usize), ParseError> {
    let (declared, prefix) = decode_vlq(data)?;
    let declared = declared as usize;
    let rest = &data[prefix..];
    let Some(payload) = rest.get(..declared) else {
        return Err(truncated(declared, rest.len()));
    };
    Ok((payload, prefix + declared))
}

/// Appends the VLQ length of `payload`, then `payload`.
pub(crate) fn write_length_prefixed(payload: &[u8], out: &mut Vec<u8>) -> Result<(), WriteError> {
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= MAX_VLQ)
        .ok_or(WriteError::PayloadTooLong(payload.len()))?;
    out.reserve(vlq_len(len) + payload.len());
    write_vlq(len, out)?;
    out.extend_from_slice(payload);
    Ok(())
}

/// Number of bytes the minimal encoding of `value` occupies.
pub(crate) const fn vlq_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        _ => 4,
    }
}

#[test]
fn decode_known_vectors() {
    use pretty_assertions::assert_eq;
    assert_eq!(decode_vlq(&[0xFF, 0x7F]), Ok((16383, 2)));
    assert_eq!(decode_vlq(&[0x87, 0x68]), Ok((1000, 2)));
    assert_eq!(decode_vlq(&[0xBD, 0x84, 0x40]), Ok((1_000_000, 3)));
    assert_eq!(decode_vlq(&[0x00, 0xFF]), Ok((0, 1)));
    assert_eq!(decode_vlq(&[0xFF, 0xFF, 0xFF, 0x7F]), Ok((MAX_VLQ, 4)));
}

#[test]
fn decode_never_terminating() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        decode_vlq(&[0xFF, 0xFF]),
        Err(ParseError::MalformedVlq { read: 2 })
    );
    assert_eq!(decode_vlq(&[]), Err(ParseError::MalformedVlq { read: 0 }));
    assert_eq!(
        decode_vlq(&[0x80; 16]),
        Err(ParseError::MalformedVlq { read: MAX_VLQ_BYTES })
    );
}

#[test]
fn decode_padded_and_oversized() {
    use pretty_assertions::assert_eq;
    // zero-padded leading group
    assert_eq!(decode_vlq(&[0x80, 0xFF, 0xFF, 0xFF, 0x7F]), Ok((MAX_VLQ, 5)));
    assert_eq!(
        decode_vlq(&[0x81, 0x80, 0x80, 0x80, 0x00]),
        Err(ParseError::MalformedVlq { read: 5 })
    );
}

#[test]
fn encode_known_vectors() {
    use pretty_assertions::assert_eq;
    assert_eq!(encode_vlq(0).unwrap(), [0x00]);
    assert_eq!(encode_vlq(127).unwrap(), [0x7F]);
    assert_eq!(encode_vlq(128).unwrap(), [0x81, 0x00]);
    assert_eq!(encode_vlq(16383).unwrap(), [0xFF, 0x7F]);
    assert_eq!(encode_vlq(1000).unwrap(), [0x87, 0x68]);
    assert_eq!(encode_vlq(1_000_000).unwrap(), [0xBD, 0x84, 0x40]);
    assert_eq!(encode_vlq(MAX_VLQ + 1), Err(WriteError::VlqOutOfRange(MAX_VLQ + 1)));
}

#[test]
fn encoding_decodes_to_itself() {
    use pretty_assertions::assert_eq;
    for value in [0, 1, 127, 128, 1152, 16383, 16384, 1_000_000, 0x1F_FFFF, 0x20_0000, MAX_VLQ] {
        let bytes = encode_vlq(value).unwrap();
        assert_eq!(bytes.len(), vlq_len(value));
        assert_eq!(decode_vlq(&bytes), Ok((value, bytes.len())));
    }
}
