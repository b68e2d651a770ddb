use anyhow::{ensure, Context};
use rand::{seq::SliceRandom, Rng};
use shared::words::{is_valid_word, SupplierError, WordSupplier};
use std::{fs, path::Path};
use tracing::{info, warn};

/// Draws words without replacement from `copies` repetitions of the vocabulary,
/// so a word shows up at most `copies` times in one response.
pub struct VocabularySupplier<R> {
    vocabulary: Vec<String>,
    words_per_request: usize,
    copies: usize,
    rng: R,
}

impl<R: Rng> VocabularySupplier<R> {
    pub fn new(
        vocabulary: Vec<String>,
        words_per_request: usize,
        copies: usize,
        rng: R,
    ) -> anyhow::Result<Self> {
        ensure!(!vocabulary.is_empty(), "vocabulary is empty");
        ensure!(
            words_per_request <= vocabulary.len() * copies,
            "cannot draw {words_per_request} words from {} x {copies} vocabulary entries",
            vocabulary.len()
        );
        Ok(Self {
            vocabulary,
            words_per_request,
            copies,
            rng,
        })
    }
}

impl<R: Rng> WordSupplier for VocabularySupplier<R> {
    fn fetch_words(&mut self) -> Result<Vec<String>, SupplierError> {
        let mut pool: Vec<&String> = std::iter::repeat(&self.vocabulary)
            .take(self.copies)
            .flatten()
            .collect();
        let (picked, _) = pool.partial_shuffle(&mut self.rng, self.words_per_request);
        let words: Vec<String> = picked.iter().map(|w| w.to_string()).collect();
        if words.is_empty() {
            return Err(SupplierError::Empty);
        }
        Ok(words)
    }
}

/// Read a newline-separated word list. Blank lines and `#` comments are skipped.
pub fn load_word_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading word file {}", path.display()))?;

    let mut words = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let mut line = line.trim();
        if let Some((head, _)) = line.split_once('#') {
            line = head.trim();
        }
        if line.is_empty() {
            continue;
        }
        let word = line.to_lowercase();
        if !is_valid_word(&word) {
            warn!("Skipping invalid word {:?} on line {}", line, number + 1);
            continue;
        }
        words.push(word);
    }

    ensure!(!words.is_empty(), "word file {} has no usable words", path.display());
    info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
