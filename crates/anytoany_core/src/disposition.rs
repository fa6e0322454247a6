//! `Content-Disposition` filename extraction.
//!
//! Handles the shapes conversion servers actually send:
//!
//! * `attachment; filename="photo.png"` (quoted, `\"` escapes allowed)
//! * `attachment; filename=photo.png` (bare token, ends at `;`)
//! * `attachment; filename*=UTF-8''na%C3%AFve.png` (RFC 5987, preferred when it decodes)
//!
//! Anything else yields `None`: no filename parameter, an empty value, an
//! unterminated quote, or an extended value in an unknown charset.

/// Extracts the download filename from a `Content-Disposition` header value.
pub fn parse_content_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_params(header) {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.eq_ignore_ascii_case("filename") {
            if plain.is_none() {
                plain = parse_value(value);
            }
        } else if name.eq_ignore_ascii_case("filename*") && extended.is_none() {
            extended = parse_value(value).and_then(|raw| decode_extended(&raw));
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}

/// Splits on `;` outside double quotes.
fn split_params(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, ch) in header.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&header[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    params.push(&header[start..]);
    params
}

fn parse_value(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let Some(quoted) = raw.strip_prefix('"') else {
        return (!raw.is_empty()).then(|| raw.to_string());
    };

    let mut value = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => value.push(chars.next()?),
            '"' => return (!value.is_empty()).then_some(value),
            other => value.push(other),
        }
    }
    // Unterminated quote.
    None
}

/// Decodes `charset'language'percent-encoded`.
fn decode_extended(raw: &str) -> Option<String> {
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?.trim();
    let _language = parts.next()?;
    let encoded = parts.next()?;
    let bytes = urlencoding::decode_binary(encoded.as_bytes());

    if charset.eq_ignore_ascii_case("utf-8") {
        String::from_utf8(bytes.into_owned()).ok()
    } else if charset.eq_ignore_ascii_case("iso-8859-1") {
        Some(bytes.iter().map(|&b| char::from(b)).collect())
    } else {
        None
    }
}
