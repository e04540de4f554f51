//! Reply composition
//!
//! Discord rejects messages longer than 2000 characters, so the AI part of a
//! reply is capped before it is sent.

use std::borrow::Cow;

/// Hard cap on the AI reply segment
pub const MAX_REPLY_CHARS: usize = 2000;

/// Characters kept from an over-long reply
pub const TRUNCATED_CHARS: usize = MAX_REPLY_CHARS - ELLIPSIS.len();

/// Marker appended to a truncated reply
pub const ELLIPSIS: &str = "...";

/// Shown to the caller when no AI gateway could be initialized
pub const SERVICE_UNAVAILABLE: &str =
    "❌ Error: the AI service is currently unavailable. Please check the API key.";

/// Shown to the caller when the AI call fails for any reason
pub const GENERIC_FAILURE: &str = "Sorry, something went wrong while getting a reply from the AI.";

/// An outbound message for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Only visible to the caller (ephemeral)
    pub private: bool,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            private: false,
        }
    }

    pub fn private(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            private: true,
        }
    }
}

/// Cap `text` at [`MAX_REPLY_CHARS`] characters
///
/// Length is counted in `char`s, so a multi-byte character is never split.
pub fn truncate_reply(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_REPLY_CHARS) {
        None => Cow::Borrowed(text),
        Some(_) => {
            let cut = text
                .char_indices()
                .nth(TRUNCATED_CHARS)
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS))
        }
    }
}

/// Compose the public reply for a successful invocation
///
/// The prompt is echoed verbatim; only the AI response is truncated.
pub fn format_reply(display_name: &str, prompt: &str, response: &str) -> String {
    format!(
        "👤 {} asked: {}\n---\n🤖 AI reply:\n{}",
        display_name,
        prompt,
        truncate_reply(response)
    )
}
