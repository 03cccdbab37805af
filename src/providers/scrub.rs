use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers whose following token is a credential.
///
/// `sk-` covers both OpenAI (`sk-`, `sk-proj-`) and Anthropic (`sk-ant-`) keys;
/// Cohere keys have no prefix and only leak through the header/field markers.
const SECRET_MARKERS: [&str; 11] = [
    "sk-",
    "Authorization: Bearer ",
    "authorization: bearer ",
    "\"authorization\":\"Bearer ",
    "x-api-key: ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"apiKey\":\"",
    "\"access_token\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|(_, c)| !is_secret_char(*c))
        .map_or(input.len(), |(offset, _)| from + offset)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

/// Word-like markers (`sk-`, `api_key=`) only count at the start of a word.
fn starts_word(input: &str, start: usize, marker: &str) -> bool {
    if !marker.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return true;
    }
    input[..start].chars().next_back().is_none_or(|c| !is_word_char(c))
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        if !starts_word(scrubbed, start, marker) {
            search_from = value_start;
            continue;
        }
        let end = token_end(scrubbed, value_start);

        // Bare marker with nothing after it.
        if end == value_start {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(start..end, REDACTED);
        search_from = start + REDACTED.len();
    }
}

/// Redact API keys and bearer tokens from provider error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|marker| input.contains(marker)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and truncate to a loggable length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let end = scrubbed
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map_or(scrubbed.len(), |(idx, _)| idx);
    format!("{}...", &scrubbed[..end])
}
