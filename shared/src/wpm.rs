/// Keystrokes that make up one "word".
pub const CHARS_PER_WORD: f64 = 5.0;

/// Gross words per minute (no error penalty)
pub fn gross_wpm(chars: usize, seconds: f64) -> f64 {
    if seconds <= 0.0 {
        return 0.0;
    }
    (chars as f64 / CHARS_PER_WORD) / (seconds / 60.0)
}

/// Share of keystrokes that were correct, as a percentage. Zero when nothing was typed.
pub fn accuracy(correct_chars: usize, total_chars: usize) -> f64 {
    if total_chars == 0 {
        return 0.0;
    }
    (correct_chars as f64 / total_chars as f64) * 100.0
}

/// Final score of a session, rounded for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub wpm: u32,
    pub accuracy: u32,
}

impl Outcome {
    /// Scores against the configured duration, not the time actually spent typing.
    pub fn compute(total_typed: usize, errors: usize, duration_secs: u32) -> Self {
        let correct = total_typed.saturating_sub(errors);
        Self {
            wpm: gross_wpm(total_typed, duration_secs as f64).round() as u32,
            accuracy: accuracy(correct, total_typed).round() as u32,
        }
    }
}
