//! Wire payload codec
//!
//! Layout: `[VarInt body length][UTF-8 JSON body]`. The body is a JSON
//! object mapping `namespace:path` keys to resolved attributes, with keys in
//! sorted order so identical registries encode to identical bytes.

use crate::attributes::WeaponAttributes;
use crate::types::WeaponId;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::BTreeMap;
use thiserror::Error;

/// Longest VarInt accepted for a `u32` length
const MAX_VARINT_LEN: usize = 5;

/// Payload encode/decode error
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("payload is empty or truncated inside the length prefix")]
    TruncatedLength,
    #[error("length prefix is longer than {} bytes", MAX_VARINT_LEN)]
    LengthTooLong,
    #[error("payload body of {len} bytes exceeds the limit of {max} bytes")]
    TooLarge { len: usize, max: usize },
    #[error("payload declares {declared} body bytes but {available} are available")]
    TruncatedBody { declared: usize, available: usize },
    #[error("{field} of '{id}' is not a finite number")]
    NonFinite { id: WeaponId, field: String },
    #[error("{0} unexpected bytes after payload body")]
    TrailingBytes(usize),
    #[error("payload body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("payload body does not match the registry schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a resolved registry into a payload
pub fn encode_payload(
    entries: &BTreeMap<WeaponId, WeaponAttributes>,
    max_len: usize,
) -> Result<Bytes, PayloadError> {
    // JSON has no encoding for inf or NaN
    for (id, attributes) in entries {
        check_finite(id, attributes)?;
    }

    let body = serde_json::to_string(entries)?;
    if body.len() > max_len {
        return Err(PayloadError::TooLarge {
            len: body.len(),
            max: max_len,
        });
    }
    let len = frame_len(body.len())?;

    let mut buf = BytesMut::with_capacity(body.len() + MAX_VARINT_LEN);
    put_varint(&mut buf, len);
    buf.put_slice(body.as_bytes());
    Ok(buf.freeze())
}

/// Decode a payload produced by [`encode_payload`]
pub fn decode_payload(
    mut payload: &[u8],
    max_len: usize,
) -> Result<BTreeMap<WeaponId, WeaponAttributes>, PayloadError> {
    let len = get_varint(&mut payload)? as usize;
    if len > max_len {
        return Err(PayloadError::TooLarge { len, max: max_len });
    }
    if payload.remaining() < len {
        return Err(PayloadError::TruncatedBody {
            declared: len,
            available: payload.remaining(),
        });
    }
    if payload.remaining() > len {
        return Err(PayloadError::TrailingBytes(payload.remaining() - len));
    }

    let body = std::str::from_utf8(payload)?;
    Ok(serde_json::from_str(body)?)
}

/// Read the JSON body of a payload without decoding it
pub fn payload_body(mut payload: &[u8]) -> Result<&str, PayloadError> {
    let len = get_varint(&mut payload)? as usize;
    let body = payload.get(..len).ok_or(PayloadError::TruncatedBody {
        declared: len,
        available: payload.len(),
    })?;
    Ok(std::str::from_utf8(body)?)
}

/// Body length as written in the VarInt prefix
fn frame_len(len: usize) -> Result<u32, PayloadError> {
    u32::try_from(len).map_err(|_| PayloadError::TooLarge {
        len,
        max: u32::MAX as usize,
    })
}

fn check_finite(id: &WeaponId, attributes: &WeaponAttributes) -> Result<(), PayloadError> {
    let non_finite = |field: String| PayloadError::NonFinite {
        id: id.clone(),
        field,
    };

    if attributes.attack_range.is_some_and(|v| !v.is_finite()) {
        return Err(non_finite("attackRange".to_string()));
    }
    for (i, attack) in attributes.attacks.iter().enumerate() {
        let numbers = [
            ("damageMultiplier", attack.damage_multiplier),
            ("angle", attack.angle),
            ("upswing", attack.upswing),
        ];
        if let Some((name, _)) = numbers
            .iter()
            .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        {
            return Err(non_finite(format!("attacks[{}].{}", i, name)));
        }
    }
    Ok(())
}

fn put_varint(buf: &mut BytesMut, mut value: u32) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn get_varint(buf: &mut &[u8]) -> Result<u32, PayloadError> {
    let mut value: u32 = 0;
    for i in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(PayloadError::TruncatedLength);
        }
        let byte = buf.get_u8();
        value |= u32::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(PayloadError::LengthTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attack;

    const LIMIT: usize = 1024 * 1024;

    fn id(s: &str) -> WeaponId {
        WeaponId::parse(s).unwrap()
    }

    fn sample() -> BTreeMap<WeaponId, WeaponAttributes> {
        let mut entries = BTreeMap::new();
        entries.insert(
            id("w:sword"),
            WeaponAttributes::empty()
                .with_attack_range(2.5)
                .with_attack(Attack::empty().with_angle(90.0)),
        );
        entries.insert(id("w:axe"), WeaponAttributes::empty().two_handed(true));
        entries
    }

    #[test]
    fn test_varint_lengths() {
        for (value, len) in [(0u32, 1usize), (127, 1), (128, 2), (16_383, 2), (16_384, 3), (u32::MAX, 5)] {
            let mut buf = BytesMut::new();
            put_varint(&mut buf, value);
            assert_eq!(buf.len(), len, "length of {}", value);
            let mut slice: &[u8] = &buf;
            assert_eq!(get_varint(&mut slice).unwrap(), value);
        }
    }

    #[test]
    fn test_body_is_sorted_json() {
        let payload = encode_payload(&sample(), LIMIT).unwrap();
        let body = payload_body(&payload).unwrap();
        assert_eq!(
            body,
            r#"{"w:axe":{"isTwoHanded":true},"w:sword":{"attackRange":2.5,"isTwoHanded":false,"attacks":[{"angle":90.0}]}}"#
        );
        assert_eq!(payload[0] as usize, body.len());
    }

    #[test]
    fn test_decode_matches_input() {
        let entries = sample();
        let payload = encode_payload(&entries, LIMIT).unwrap();
        assert_eq!(decode_payload(&payload, LIMIT).unwrap(), entries);
    }

    #[test]
    fn test_empty_registry() {
        let payload = encode_payload(&BTreeMap::new(), LIMIT).unwrap();
        assert_eq!(&payload[..], b"\x02{}");
        assert!(decode_payload(&payload, LIMIT).unwrap().is_empty());
    }

    #[test]
    fn test_framing_errors() {
        assert!(matches!(
            decode_payload(&[], LIMIT),
            Err(PayloadError::TruncatedLength)
        ));
        assert!(matches!(
            decode_payload(&[0x80, 0x80], LIMIT),
            Err(PayloadError::TruncatedLength)
        ));
        assert!(matches!(
            decode_payload(&[0xff; 6], LIMIT),
            Err(PayloadError::LengthTooLong)
        ));
        assert!(matches!(
            decode_payload(b"\x05{}", LIMIT),
            Err(PayloadError::TruncatedBody { declared: 5, available: 2 })
        ));
        assert!(matches!(
            decode_payload(b"\x02{}xx", LIMIT),
            Err(PayloadError::TrailingBytes(2))
        ));
        assert!(matches!(
            decode_payload(b"\x02\xff\xfe", LIMIT),
            Err(PayloadError::Utf8(_))
        ));
    }

    #[test]
    fn test_schema_mismatch() {
        let body = br#"{"w:sword":{"attackRange":"far"}}"#;
        let mut payload = BytesMut::new();
        put_varint(&mut payload, body.len() as u32);
        payload.put_slice(body);
        assert!(matches!(
            decode_payload(&payload, LIMIT),
            Err(PayloadError::Json(_))
        ));
    }

    #[test]
    fn test_frame_len_fits_u32() {
        assert_eq!(frame_len(0).unwrap(), 0);
        assert_eq!(frame_len(u32::MAX as usize).unwrap(), u32::MAX);
        if let Some(over) = (u32::MAX as usize).checked_add(1) {
            assert!(matches!(
                frame_len(over),
                Err(PayloadError::TooLarge { max, .. }) if max == u32::MAX as usize
            ));
        }
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let mut entries = sample();
        entries.insert(id("w:spear"), WeaponAttributes::empty().with_attack_range(f64::INFINITY));
        match encode_payload(&entries, LIMIT) {
            Err(PayloadError::NonFinite { id: bad, field }) => {
                assert_eq!(bad, id("w:spear"));
                assert_eq!(field, "attackRange");
            }
            other => panic!("expected non-finite error, got {:?}", other),
        }

        let mut entries = sample();
        entries.insert(
            id("w:spear"),
            WeaponAttributes::empty()
                .with_attack(Attack::empty().with_angle(90.0))
                .with_attack(Attack::empty().with_upswing(f64::NAN)),
        );
        match encode_payload(&entries, LIMIT) {
            Err(PayloadError::NonFinite { field, .. }) => {
                assert_eq!(field, "attacks[1].upswing");
            }
            other => panic!("expected non-finite error, got {:?}", other),
        }

        let mut entries = sample();
        entries.insert(
            id("w:spear"),
            WeaponAttributes::empty()
                .with_attack(Attack::empty().with_damage_multiplier(f64::NEG_INFINITY)),
        );
        assert!(matches!(
            encode_payload(&entries, LIMIT),
            Err(PayloadError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_size_limit() {
        let entries = sample();
        assert!(matches!(
            encode_payload(&entries, 10),
            Err(PayloadError::TooLarge { max: 10, .. })
        ));

        let payload = encode_payload(&entries, LIMIT).unwrap();
        assert!(matches!(
            decode_payload(&payload, 10),
            Err(PayloadError::TooLarge { max: 10, .. })
        ));
    }
}
