//! Register decoding: raw Modbus words to typed field values.
//!
//! Decoding is total. Whatever the device puts on the wire, [`decode`]
//! returns a value: missing words read as zero, non-finite floats collapse
//! to 0.0, non-ASCII bytes are dropped from strings. A single odd register
//! must never cost a whole telemetry cycle.

use sunsight_common::FieldValue;

use crate::registry::{DType, FieldDef};

/// Decode one field from the words of its block.
///
/// `words` is the field's slice of the block, high word first as read off
/// the bus. `swap_threshold` drives the 32-bit word-order heuristic: a
/// combined high-first value above the threshold is reinterpreted
/// low-word-first, compensating for firmware revisions that ship the
/// words reversed.
pub fn decode(words: &[u16], field: &FieldDef, swap_threshold: u64) -> FieldValue {
    match field.dtype {
        DType::U16 => scaled(field, word(words, 0) as i64),
        DType::I16 => scaled(field, word(words, 0) as i16 as i64),
        DType::U32 => scaled(field, combine_u32(words, swap_threshold) as i64),
        DType::I32 => scaled(field, combine_u32(words, swap_threshold) as i32 as i64),
        DType::F32 => FieldValue::Float(scale_float(field, decode_f32(words))),
        DType::Ascii => FieldValue::Text(decode_ascii(words)),
    }
}

fn word(words: &[u16], index: usize) -> u16 {
    words.get(index).copied().unwrap_or(0)
}

/// Integers with scale 1 stay integers; anything else becomes the scaled
/// float so downstream consumers see engineering units.
fn scaled(field: &FieldDef, raw: i64) -> FieldValue {
    if field.scale == 1.0 {
        FieldValue::Int(raw)
    } else {
        FieldValue::Float(raw as f64 / field.scale)
    }
}

fn scale_float(field: &FieldDef, value: f64) -> f64 {
    if field.scale == 1.0 {
        value
    } else {
        value / field.scale
    }
}

fn combine_u32(words: &[u16], swap_threshold: u64) -> u32 {
    let hi = word(words, 0) as u32;
    let lo = word(words, 1) as u32;
    let canonical = (hi << 16) | lo;
    if canonical as u64 > swap_threshold {
        (lo << 16) | hi
    } else {
        canonical
    }
}

/// IEEE-754 single, packed big-endian across two registers. Meters report
/// NaN on unconnected phases; those collapse to 0.0. Rounded to four
/// decimals to strip single-precision noise from the published JSON.
fn decode_f32(words: &[u16]) -> f64 {
    let [b0, b1] = word(words, 0).to_be_bytes();
    let [b2, b3] = word(words, 1).to_be_bytes();
    let value = f32::from_be_bytes([b0, b1, b2, b3]);
    if value.is_finite() {
        (value as f64 * 10_000.0).round() / 10_000.0
    } else {
        0.0
    }
}

/// Two ASCII bytes per register, high byte first. Non-ASCII bytes are
/// dropped, then NULs and surrounding whitespace trimmed: serial-number
/// registers on older firmware pad with either.
fn decode_ascii(words: &[u16]) -> String {
    let mut text = String::with_capacity(words.len() * 2);
    for w in words {
        for b in w.to_be_bytes() {
            if b.is_ascii() {
                text.push(b as char);
            }
        }
    }
    text.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::field;

    const THRESHOLD: u64 = 100_000_000;

    #[test]
    fn test_u16_unscaled_stays_integer() {
        let f = field("InverterStatus", 0, 1, 1.0, DType::U16);
        assert_eq!(decode(&[3], &f, THRESHOLD), FieldValue::Int(3));
    }

    #[test]
    fn test_u16_divisor_scaling() {
        let f = field("Vpv1", 3, 1, 10.0, DType::U16);
        assert_eq!(decode(&[1500], &f, THRESHOLD), FieldValue::Float(150.0));
    }

    #[test]
    fn test_i16_negative() {
        let f = field("Ibat", 3, 1, 10.0, DType::I16);
        // -25 as u16 two's complement
        assert_eq!(decode(&[0xFFE7], &f, THRESHOLD), FieldValue::Float(-2.5));
    }

    #[test]
    fn test_u32_canonical_word_order() {
        let f = field("Pac", 23, 2, 10.0, DType::U32);
        // 0x0001_86A0 = 100_000, well below threshold: no swap
        assert_eq!(
            decode(&[0x0001, 0x86A0], &f, THRESHOLD),
            FieldValue::Float(10_000.0)
        );
    }

    #[test]
    fn test_u32_swapped_word_order() {
        let f = field("Pac", 23, 2, 10.0, DType::U32);
        // high-first reads 0x86A0_0001 = 2.2 billion, implausible for
        // power; the swapped reading 0x0001_86A0 = 100_000 wins
        assert_eq!(
            decode(&[0x86A0, 0x0001], &f, THRESHOLD),
            FieldValue::Float(10_000.0)
        );
    }

    #[test]
    fn test_u32_accumulator_threshold() {
        let f = field("Eac_Total", 55, 2, 10.0, DType::U32);
        // 2_000_000 raw: plausible under the general threshold, swapped
        // under the 1M accumulator threshold
        let words = [0x001E, 0x8480];
        assert_eq!(
            decode(&words, &f, THRESHOLD),
            FieldValue::Float(200_000.0)
        );
        let swapped = combine_u32(&words, 1_000_000);
        assert_eq!(swapped, 0x8480_001E);
    }

    #[test]
    fn test_i32_negative() {
        let f = field("Qac", 21, 2, 10.0, DType::I32);
        // 0xFFFF_EC78 = -5000; the swap heuristic is disabled so the
        // two's-complement reinterpretation is what's under test
        let words = [0xFFFF, 0xEC78];
        let combined = combine_u32(&words, u64::MAX);
        assert_eq!(combined as i32, -5000);
        assert_eq!(
            decode(&words, &f, u64::MAX),
            FieldValue::Float(-500.0)
        );
    }

    #[test]
    fn test_f32_round_trip_with_rounding() {
        let f = field("Voltage_L1", 0, 2, 1.0, DType::F32);
        let bits = 123.456_f32.to_bits();
        let words = [(bits >> 16) as u16, bits as u16];
        assert_eq!(decode(&words, &f, THRESHOLD), FieldValue::Float(123.456));
    }

    #[test]
    fn test_f32_nan_collapses_to_zero() {
        let f = field("Power_L2", 14, 2, 1.0, DType::F32);
        let bits = f32::NAN.to_bits();
        let words = [(bits >> 16) as u16, bits as u16];
        assert_eq!(decode(&words, &f, THRESHOLD), FieldValue::Float(0.0));
    }

    #[test]
    fn test_ascii_serial_number() {
        let f = field("SerialNumber", 1, 5, 1.0, DType::Ascii);
        // "ABC1234567" packed two chars per word
        let words = [0x4142, 0x4331, 0x3233, 0x3435, 0x3637];
        assert_eq!(
            decode(&words, &f, THRESHOLD),
            FieldValue::Text("ABC1234567".to_string())
        );
    }

    #[test]
    fn test_ascii_strips_nul_padding_and_invalid_bytes() {
        let f = field("FirmwareVersion", 21, 4, 1.0, DType::Ascii);
        // "TL3.0" NUL-padded with a stray 0xFF byte
        let words = [0x544C, 0x332E, 0x30FF, 0x0000];
        assert_eq!(
            decode(&words, &f, THRESHOLD),
            FieldValue::Text("TL3.0".to_string())
        );
    }

    #[test]
    fn test_short_input_reads_missing_words_as_zero() {
        let f = field("Pac", 23, 2, 10.0, DType::U32);
        assert_eq!(decode(&[], &f, THRESHOLD), FieldValue::Float(0.0));
        assert_eq!(decode(&[7], &f, THRESHOLD), FieldValue::Float(45_875.2));
    }
}
