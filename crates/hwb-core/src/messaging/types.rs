/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

impl Default for MessagingCapabilities {
    fn default() -> Self {
        // Telegram Bot API limits.
        Self {
            max_message_len: 4096,
        }
    }
}

/// Truncate `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_multibyte_text_on_char_boundary() {
        assert_eq!(truncate_chars("Сбой", 2), "Сб");
        assert_eq!(truncate_chars("ok", 10), "ok");
        assert_eq!(truncate_chars("", 0), "");
    }
}
