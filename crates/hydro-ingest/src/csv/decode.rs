//! Byte decoding with a single-byte fallback.

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use hydro_model::{DecodeError, DecodeFailure};
use tracing::{debug, info, warn};

use super::parse::{ParseError, parse_records};
use crate::record::RawRecordSet;

/// Encoding tried first.
pub const PRIMARY_ENCODING: &str = "UTF-8";

/// Single-byte Latin encoding tried when the primary attempt fails.
///
/// This is the WHATWG `windows-1252` encoding, which is what the
/// `latin-1`/`ISO-8859-1` labels resolve to.
pub const FALLBACK_ENCODING: &str = "windows-1252";

/// Decodes raw export bytes into a record set.
///
/// The bytes are first decoded as strict UTF-8 and parsed. If either step
/// fails, they are decoded again as windows-1252 and parsed. A leading UTF-8
/// BOM is ignored; a UTF-16 BOM is rejected.
pub fn decode_csv(bytes: &[u8]) -> Result<RawRecordSet, DecodeError> {
    let body = strip_bom(bytes)?;
    let mut attempted = Vec::with_capacity(2);

    attempted.push(PRIMARY_ENCODING);
    let primary_detail = match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => match parse_as(&text, PRIMARY_ENCODING) {
            Ok(records) => return Ok(records),
            Err(ParseError::Empty) => {
                return Err(DecodeError::new(DecodeFailure::Empty, attempted));
            }
            Err(error) => error.to_string(),
        },
        None => "invalid UTF-8 byte sequence".to_string(),
    };
    info!(
        encoding = PRIMARY_ENCODING,
        reason = %primary_detail,
        fallback = FALLBACK_ENCODING,
        "primary decode failed, retrying"
    );

    attempted.push(FALLBACK_ENCODING);
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
    match parse_as(&text, FALLBACK_ENCODING) {
        Ok(records) => Ok(records),
        Err(ParseError::Empty) => Err(DecodeError::new(DecodeFailure::Empty, attempted)),
        Err(error) => {
            warn!(encoding = FALLBACK_ENCODING, %error, "fallback decode failed");
            Err(DecodeError::new(DecodeFailure::Unparseable, attempted)
                .with_detail(error.to_string()))
        }
    }
}

fn parse_as(text: &str, encoding: &'static str) -> Result<RawRecordSet, ParseError> {
    let parsed = parse_records(text)?;
    debug!(
        encoding,
        columns = parsed.headers.len(),
        rows = parsed.rows.len(),
        "decoded export"
    );
    Ok(RawRecordSet {
        headers: parsed.headers,
        rows: parsed.rows,
        encoding,
    })
}

/// Skips a UTF-8 BOM and rejects UTF-16 input.
fn strip_bom(bytes: &[u8]) -> Result<&[u8], DecodeError> {
    match Encoding::for_bom(bytes) {
        Some((encoding, len)) if encoding == UTF_8 => Ok(&bytes[len..]),
        Some((encoding, _)) if encoding == UTF_16LE || encoding == UTF_16BE => Err(
            DecodeError::new(DecodeFailure::UnsupportedEncoding(encoding.name()), Vec::new()),
        ),
        _ => Ok(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8() {
        let records = decode_csv("time,temperature\n2025-01-01,21.5\n".as_bytes()).unwrap();
        assert_eq!(records.encoding, PRIMARY_ENCODING);
        assert_eq!(records.headers, vec!["time", "temperature"]);
    }

    #[test]
    fn strips_utf8_bom() {
        let records = decode_csv(b"\xEF\xBB\xBFtime,humidity\n2025-01-01,50\n").unwrap();
        assert_eq!(records.headers[0], "time");
        assert_eq!(records.encoding, PRIMARY_ENCODING);
    }

    #[test]
    fn falls_back_to_latin() {
        // 0xF1 is a lone latin-1 n-tilde, invalid as UTF-8.
        let bytes = b"time,humedad,ubicacion\n2025-01-01,61.0,ba\xF1o\n";
        let records = decode_csv(bytes).unwrap();
        assert_eq!(records.encoding, FALLBACK_ENCODING);
        assert_eq!(records.rows[0][2], "ba\u{f1}o");
    }

    #[test]
    fn rejects_utf16() {
        let err = decode_csv(b"\xFF\xFEt\x00i\x00").unwrap_err();
        assert_eq!(err.reason, DecodeFailure::UnsupportedEncoding("UTF-16LE"));
        assert_eq!(
            err.to_string(),
            "could not decode CSV input (unsupported encoding UTF-16LE)"
        );
    }

    #[test]
    fn empty_input_is_reported() {
        let err = decode_csv(b"").unwrap_err();
        assert_eq!(err.reason, DecodeFailure::Empty);
        assert_eq!(err.attempted, vec![PRIMARY_ENCODING]);
    }

    #[test]
    fn unparseable_after_both_attempts() {
        let err = decode_csv(b"a,b\n1,2,3\n").unwrap_err();
        assert_eq!(err.reason, DecodeFailure::Unparseable);
        assert_eq!(err.attempted, vec![PRIMARY_ENCODING, FALLBACK_ENCODING]);
        assert!(err.detail.is_some());
    }
}
