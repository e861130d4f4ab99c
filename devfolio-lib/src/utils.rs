/// Percent-encode a storage object name for use in a URL path or query
pub(crate) fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_are_percent_encoded() {
        assert_eq!(percent_encode("images/1_a.png"), "images%2F1_a.png");
        assert_eq!(percent_encode("a b"), "a%20b");
    }

    #[test]
    fn url_delimiters_do_not_survive_encoding() {
        let encoded = percent_encode("1_photo #2?final.png");
        assert!(!encoded.contains('#'));
        assert!(!encoded.contains('?'));
        assert_eq!(encoded, "1_photo%20%232%3Ffinal.png");
    }
}
