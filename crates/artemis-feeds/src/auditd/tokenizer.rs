//! `key=value` tokenizer for audit record bodies.
//!
//! A single forward scan looks for `key=` boundaries, where a key is a run of
//! ASCII word characters, then branches on the first value byte:
//!
//! * `"`: a double-quoted string; the quotes are stripped.
//! * `'`: the userspace message envelope (`msg='op=... res=success'`); its
//!   contents are tokenized in place and the envelope key is dropped.
//! * anything else: a bare token running to the next whitespace.
//!
//! An unterminated quote falls back to bare-token handling.

/// One extracted pair. Both sides borrow from the tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    pub key: &'a str,
    pub value: &'a str,
    /// Whether the value was written as a double-quoted string.
    pub quoted: bool,
}

/// Extract every `key=value` pair from `text`, in order of appearance.
pub fn tokenize(text: &str) -> Vec<Pair<'_>> {
    let mut pairs = Vec::new();
    scan(text, &mut pairs);
    pairs
}

fn scan<'a>(text: &'a str, pairs: &mut Vec<Pair<'a>>) {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        if !is_word(bytes[i]) {
            i += 1;
            continue;
        }
        let key_start = i;
        while i < len && is_word(bytes[i]) {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            continue;
        }
        let key = &text[key_start..i];
        i += 1;

        if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let quote = bytes[i] as char;
            if let Some(close) = text[i + 1..].find(quote) {
                let inner = &text[i + 1..i + 1 + close];
                i += close + 2;
                if quote == '"' {
                    pairs.push(Pair {
                        key,
                        value: inner,
                        quoted: true,
                    });
                } else {
                    scan(inner, pairs);
                }
                continue;
            }
        }

        let value_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i > value_start {
            pairs.push(Pair {
                key,
                value: &text[value_start..i],
                quoted: false,
            });
        }
    }
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
