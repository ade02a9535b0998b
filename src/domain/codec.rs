//! Percent-encoding for handler URLs.
//!
//! Two sets are in play. Path segments use the `encodeURIComponent` set, so an
//! identifier containing `/` stays a single segment. Query values use the web
//! client's parameter codec, which is the same set with `@ : $ , ; = ? /` left
//! literal. That is why `[1,2,3]` goes over the wire as `%5B1,2,3%5D`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const QUERY_VALUE: &AsciiSet = &COMPONENT
    .remove(b'@')
    .remove(b':')
    .remove(b'$')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b'?')
    .remove(b'/');

pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
