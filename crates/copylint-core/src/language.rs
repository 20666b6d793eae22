use std::fmt;

use serde::{Deserialize, Serialize};

/// The two site languages. German is the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    German,
    English,
}

impl Language {
    /// Both languages in pipeline order.
    pub const ALL: [Language; 2] = [Language::German, Language::English];

    /// ISO 639-1 code used for content file names and config term lists.
    pub fn code(self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
        }
    }

    /// Display name used in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            Language::German => "German",
            Language::English => "English",
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::German => Language::English,
            Language::English => Language::German,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
