/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Fixed-vocabulary values that can be listed and parsed from user text.
pub trait Enumerated: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn key(&self) -> &'static str;

    /// Case-insensitive lookup of a key among [`Enumerated::ALL`].
    fn from_key(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|item| item.key() == needle)
    }

    fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|item| item.key()).collect()
    }
}
