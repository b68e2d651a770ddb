use thiserror::Error;

/// Built-in vocabulary the word sample is drawn from.
pub const VOCABULARY: &[&str] = &[
    "future", "logic", "focus", "pixel", "syntax", "carbon", "rapid", "shift",
    "binary", "gamma", "vector", "matrix", "input", "output", "proxy", "stream",
    "active", "prompt", "stable", "system", "module", "update", "render", "depth",
    "interface", "variable", "function", "array", "object", "string", "boolean",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplierError {
    #[error("word supplier unavailable: {0}")]
    Unavailable(String),

    #[error("word supplier returned no words")]
    Empty,
}

/// Source of the words for a new session.
pub trait WordSupplier {
    fn fetch_words(&mut self) -> Result<Vec<String>, SupplierError>;
}

/// A usable word is non-empty lowercase ASCII letters.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase())
}

/// Check a fetched word list against the supplier contract.
pub fn validate_words(words: Vec<String>) -> Result<Vec<String>, SupplierError> {
    if words.is_empty() {
        return Err(SupplierError::Empty);
    }
    if let Some(bad) = words.iter().find(|w| !is_valid_word(w)) {
        return Err(SupplierError::Unavailable(format!("invalid word {bad:?}")));
    }
    Ok(words)
}
