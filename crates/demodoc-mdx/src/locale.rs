//! The two documentation locales.

use std::fmt;

use serde::Serialize;

/// A documentation locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Locale {
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Every locale, in generation order.
    pub const ALL: [Locale; 2] = [Locale::ZhCn, Locale::EnUs];

    /// Full tag, as used in headings and index file names (`zh-CN`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// Short tag, as used in generated file names and identifiers (`zh`).
    pub fn short(self) -> &'static str {
        match self {
            Self::ZhCn => "zh",
            Self::EnUs => "en",
        }
    }

    /// Section heading introducing this locale's prose in a demo document.
    pub fn heading(self) -> &'static str {
        match self {
            Self::ZhCn => "## zh-CN",
            Self::EnUs => "## en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A value held once per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Localized<T> {
    pub zh: T,
    pub en: T,
}

impl<T> Localized<T> {
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::ZhCn => &self.zh,
            Locale::EnUs => &self.en,
        }
    }
}
