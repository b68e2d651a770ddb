use crate::words::{validate_words, SupplierError};

/// Route that returns the word sample as a JSON array of strings.
pub const WORDS_PATH: &str = "/get-words";

/// Test lengths offered to the player, in seconds.
pub const DURATIONS: [u32; 4] = [15, 30, 60, 120];

pub const DEFAULT_DURATION: u32 = 30;

/// Body of a successful `GET /get-words`.
pub type WordsResponse = Vec<String>;

/// Decode a `/get-words` body. An empty list or a word outside the vocabulary
/// alphabet counts as a failed fetch.
pub fn decode_words(body: &str) -> Result<WordsResponse, SupplierError> {
    let words: WordsResponse =
        serde_json::from_str(body).map_err(|e| SupplierError::Unavailable(e.to_string()))?;
    validate_words(words)
}
