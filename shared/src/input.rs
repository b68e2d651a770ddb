/// A keyboard event as the session engine understands it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Escape,
    Ignored,
}

impl KeyInput {
    /// Classify a DOM `KeyboardEvent.key` value.
    ///
    /// Named keys ("Shift", "ArrowLeft", "Enter"...) are longer than one code
    /// point and fall through to `Ignored`.
    pub fn from_key(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => KeyInput::Char(c),
            _ => match key {
                "Backspace" => KeyInput::Backspace,
                "Escape" => KeyInput::Escape,
                _ => KeyInput::Ignored,
            },
        }
    }
}
