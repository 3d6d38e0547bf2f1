use crate::error::{ProcessingError, Result};

/// Decode a fixed-point temperature field: optional leading `-`, integer
/// digits, a `.`, and exactly one fractional digit.
///
/// The restricted format lets us accumulate digits manually instead of
/// going through a general float parser, which dominates the per-line cost
/// at this scale. Anything that does not match the format is rejected with
/// `InvalidFormat`; callers skip the line.
pub fn decode_temperature(bytes: &[u8]) -> Result<f32> {
    if bytes.len() < 3 {
        return Err(invalid(bytes));
    }

    let mut i = 0;
    let negative = bytes[0] == b'-';
    if negative {
        i = 1;
    }

    let mut int_part: i32 = 0;
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i] != b'.' {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return Err(invalid(bytes));
        }
        // Checked accumulation: a digit run long enough to overflow is
        // rejected as malformed rather than aborting the worker.
        int_part = int_part
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i32))
            .ok_or_else(|| invalid(bytes))?;
        saw_digit = true;
        i += 1;
    }

    // The dot must exist, follow at least one digit, and not be the last byte.
    if !saw_digit || i + 1 >= bytes.len() || bytes[i] != b'.' {
        return Err(invalid(bytes));
    }
    let frac = bytes[i + 1];
    if !frac.is_ascii_digit() {
        return Err(invalid(bytes));
    }

    let mut temp = int_part as f32 + (frac - b'0') as f32 / 10.0;
    if negative {
        temp = -temp;
    }
    Ok(temp)
}

fn invalid(bytes: &[u8]) -> ProcessingError {
    ProcessingError::InvalidFormat(format!(
        "invalid temperature field: {:?}",
        String::from_utf8_lossy(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_well_formed_values() {
        let cases: &[(&[u8], f32)] = &[
            (b"23.4", 23.4),
            (b"-12.7", -12.7),
            (b"0.0", 0.0),
            (b"99.9", 99.9),
            (b"-0.1", -0.1),
            (b"100.0", 100.0),
        ];
        for (input, expected) in cases {
            let got = decode_temperature(input).unwrap();
            assert_eq!(got, *expected, "decoding {:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_temperature(b"bad").is_err());
        assert!(decode_temperature(b"12x.3").is_err());
    }

    #[test]
    fn test_decode_rejects_short_input() {
        assert!(decode_temperature(b"").is_err());
        assert!(decode_temperature(b"1").is_err());
        assert!(decode_temperature(b"1.").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_dot() {
        assert!(decode_temperature(b"123").is_err());
        assert!(decode_temperature(b"-42").is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_dot() {
        assert!(decode_temperature(b"12.").is_err());
    }

    #[test]
    fn test_decode_rejects_overflowing_digit_run() {
        // Grammar-valid but too many integer digits for the accumulator;
        // must come back as a recoverable format error, never a panic.
        assert!(decode_temperature(b"99999999999.9").is_err());
        assert!(decode_temperature(b"-99999999999.9").is_err());
        assert!(decode_temperature(b"2147483647123.0").is_err());
    }

    #[test]
    fn test_decode_accepts_large_in_range_values() {
        let got = decode_temperature(b"2147483.5").unwrap();
        assert_eq!(got, 2147483.5);
    }
}
