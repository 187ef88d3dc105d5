//! Shared utilities for talking to vimgolf.com.

/// User-Agent string for HTTP requests.
pub const USER_AGENT: &str = concat!("vimgolf/", env!("CARGO_PKG_VERSION"));

/// Create a configured reqwest client with standard headers.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
}

/// Percent-encode bytes for an `application/x-www-form-urlencoded` body.
///
/// Unreserved characters pass through and space becomes `+`.
pub fn form_encode(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'~' => {
                result.push(b as char)
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{:02X}", b)),
        }
    }
    result
}

/// Encode `key=value` pairs joined by `&`.
pub fn form_body(pairs: &[(&str, &[u8])]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key.as_bytes()), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode the HTML character references vimgolf.com pages use.
///
/// Unknown references are left as they are.
pub fn decode_entities(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

/// Collapse a multi-line text block into one line, trimming each line.
pub fn join_lines(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encode() {
        assert_eq!(form_encode(b"dd:wq\r"), "dd%3Awq%0D");
        assert_eq!(form_encode(b"a b"), "a+b");
        assert_eq!(form_encode(b"\x80kb"), "%80kb");
        assert_eq!(form_encode(b"x-y_z.~"), "x-y_z.~");
    }

    #[test]
    fn test_form_body() {
        let body = form_body(&[("challenge_id", &b"abc"[..]), ("entry", &b"ZZ\x1b"[..])]);
        assert_eq!(body, "challenge_id=abc&entry=ZZ%1B");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;Esc&gt;"), "<Esc>");
        assert_eq!(decode_entities("it&#39;s &#x41;"), "it's A");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines("  Reverse\n   the lines \n\n"), "Reverse the lines");
        assert_eq!(join_lines(""), "");
    }
}
