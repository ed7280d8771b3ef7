use std::fmt;

/// Destination chat for notifications.
///
/// Telegram accepts either a numeric chat id or a public `@channel` username.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(id) => ChatTarget::Id(id),
            Err(_) => ChatTarget::Username(raw.to_string()),
        }
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{id}"),
            ChatTarget::Username(name) => f.write_str(name),
        }
    }
}

/// Unix timestamp (seconds) used as the lower bound of the next query window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(pub i64);

impl Cursor {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_username_targets() {
        assert_eq!(ChatTarget::parse("123456"), ChatTarget::Id(123456));
        assert_eq!(ChatTarget::parse(" -100200 "), ChatTarget::Id(-100200));
        assert_eq!(
            ChatTarget::parse("@reviews"),
            ChatTarget::Username("@reviews".to_string())
        );
    }
}
