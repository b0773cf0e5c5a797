//! Output locale for synthesized placeholder content.

use serde::{Deserialize, Serialize};

/// Language used for weekday labels and templated fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// Brazilian Portuguese.
    #[default]
    PtBr,
    /// English.
    En,
}

impl Locale {
    /// Weekday labels, Monday first.
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        match self {
            Locale::PtBr => [
                "Segunda-feira",
                "Terça-feira",
                "Quarta-feira",
                "Quinta-feira",
                "Sexta-feira",
                "Sábado",
                "Domingo",
            ],
            Locale::En => [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ],
        }
    }

    /// Language name embedded in prompts.
    pub fn language_name(&self) -> &'static str {
        match self {
            Locale::PtBr => "Brazilian Portuguese",
            Locale::En => "English",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_is_portuguese() {
        assert_eq!(Locale::default(), Locale::PtBr);
        assert_eq!(Locale::default().weekday_labels()[0], "Segunda-feira");
    }

    #[test]
    fn english_week_ends_on_sunday() {
        assert_eq!(Locale::En.weekday_labels()[6], "Sunday");
    }

    #[test]
    fn locale_deserializes_kebab_case() {
        let locale: Locale = serde_json::from_str("\"pt-br\"").unwrap();
        assert_eq!(locale, Locale::PtBr);
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::En);
    }
}
