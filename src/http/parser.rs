use crate::http::request::{Header, Request, Verb};
use crate::strutil;

/// Number of trailing characters of the version token kept as the version.
const VERSION_LEN: usize = 3;

/// Parses the text of one request.
///
/// Parsing never fails. A request line without exactly three space-separated
/// tokens gets the URI `/`, and header lines without a colon are skipped. The
/// body, if any, is ignored.
pub fn parse_http_request(text: &str) -> Request {
    let lines = strutil::split(text, '\n');
    let request_line = lines.first().copied().unwrap_or("");
    let tokens = strutil::split(request_line, ' ');

    let uri = match tokens.as_slice() {
        [_, uri, _] if !uri.is_empty() => uri.to_string(),
        _ => "/".to_string(),
    };

    let verb = Verb::from_token(tokens.first().copied().unwrap_or(""));
    let version = tokens
        .get(2)
        .map(|token| clean_http_version(token))
        .unwrap_or_default();

    let headers = lines
        .iter()
        .skip(1)
        .filter_map(|line| parse_header(line))
        .collect();

    Request {
        verb,
        version,
        uri,
        headers,
    }
}

/// Keeps the last three characters of the trimmed version token, so
/// `"HTTP/1.1"` becomes `"1.1"`. Tokens that are already short come back whole.
pub fn clean_http_version(token: &str) -> String {
    strutil::tail_chars(strutil::trim(token), VERSION_LEN).to_string()
}

fn parse_header(line: &str) -> Option<Header> {
    let (key, value) = strutil::split_first(strutil::trim(line), ':')?;
    Some(Header::new(strutil::trim(key), strutil::trim(value)))
}
