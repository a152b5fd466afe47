//! POSIX shell quoting

use std::borrow::Cow;

fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_./:=,@%+-".contains(c)
}

/// Single-quote `token`, escaping embedded single quotes.
pub fn quote(token: &str) -> String {
    format!("'{}'", token.replace('\'', r"'\''"))
}

/// Quote `token` only if the shell would otherwise split or expand it.
pub fn quote_if_needed(token: &str) -> Cow<'_, str> {
    if !token.is_empty() && token.chars().all(is_plain) {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(quote(token))
    }
}
