use folio_schema::Language;

/// Process-wide display-language selection. Toggled by user action, read by
/// every rendered view, and deliberately irrelevant to routing and loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageState {
    current: Language,
}

impl LanguageState {
    pub fn new(initial: Language) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn toggle(&mut self) -> Language {
        self.current = self.current.toggled();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates_between_languages() {
        let mut lang = LanguageState::default();
        assert_eq!(lang.current(), Language::En);
        assert_eq!(lang.toggle(), Language::Fr);
        assert_eq!(lang.toggle(), Language::En);
    }
}
