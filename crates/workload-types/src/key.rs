//! Key-space policies and transformed keys.

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Rule governing how generator keys become dataset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum KeySpace {
    /// Keep the generator's integer key.
    #[value(name = "randint")]
    RandInt,
    /// Reassign keys 0, 1, 2, ... in insert order.
    #[value(name = "monoint")]
    MonoInt,
    /// Replace keys with host-reversed addresses sampled from a corpus.
    #[value(name = "email")]
    Email,
}

impl KeySpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySpace::RandInt => "randint",
            KeySpace::MonoInt => "monoint",
            KeySpace::Email => "email",
        }
    }

    /// Whether this policy samples the corpus source.
    pub fn needs_corpus(&self) -> bool {
        matches!(self, KeySpace::Email)
    }
}

impl fmt::Display for KeySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for key-space names outside `randint`, `monoint`, `email`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Keytype '{0}' is unknown. Only randint, monoint or email are supported")]
pub struct KeySpaceParseError(pub String);

impl FromStr for KeySpace {
    type Err = KeySpaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "randint" => Ok(KeySpace::RandInt),
            "monoint" => Ok(KeySpace::MonoInt),
            "email" => Ok(KeySpace::Email),
            other => Err(KeySpaceParseError(other.to_string())),
        }
    }
}

/// A key after the workload's policy was applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransformedKey {
    Int(u64),
    Text(String),
}

impl fmt::Display for TransformedKey {
    /// Integers are written bare, text keys as ASCII-only JSON string literals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformedKey::Int(value) => write!(f, "{value}"),
            TransformedKey::Text(value) => f.write_str(&quote_ascii(value)?),
        }
    }
}

/// JSON-quote `value`, escaping everything outside printable ASCII as `\uXXXX`
/// (UTF-16 units, lowercase hex).
fn quote_ascii(value: &str) -> Result<String, fmt::Error> {
    let quoted = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    if quoted.bytes().all(|b| (b' '..=b'~').contains(&b)) {
        return Ok(quoted);
    }
    let mut escaped = String::with_capacity(quoted.len() + 16);
    let mut units = [0u16; 2];
    for ch in quoted.chars() {
        if (' '..='~').contains(&ch) {
            escaped.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    Ok(escaped)
}
