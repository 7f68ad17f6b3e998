//! Groups discovered files by language and associates translations with base files.

use std::collections::HashMap;

use tracing::debug;

use crate::{matcher, LanguageFile};

/// Files in the base language with their translations in every other language.
///
/// Built once per audit and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    base_lang: String,
    langs: Vec<String>,
    files_by_lang: HashMap<String, Vec<LanguageFile>>,
    translations: HashMap<String, HashMap<String, LanguageFile>>,
}

impl Bundle {
    /// Index `files` against `base_lang`.
    ///
    /// Every base file is probed against every file of every other language;
    /// the first match in discovery order wins.
    pub fn new(base_lang: impl Into<String>, files: impl IntoIterator<Item = LanguageFile>) -> Self {
        let base_lang = base_lang.into();
        let mut langs: Vec<String> = Vec::new();
        let mut files_by_lang: HashMap<String, Vec<LanguageFile>> = HashMap::new();

        for file in files {
            if !files_by_lang.contains_key(&file.lang) {
                langs.push(file.lang.clone());
            }
            let group = files_by_lang.entry(file.lang.clone()).or_default();
            if !group.contains(&file) {
                group.push(file);
            }
        }

        let base_files = files_by_lang.get(&base_lang).map_or(&[][..], Vec::as_slice);
        let mut translations = HashMap::with_capacity(base_files.len());

        for base in base_files {
            let mut section = HashMap::new();
            for lang in langs.iter().filter(|lang| **lang != base_lang) {
                let candidate = files_by_lang[lang]
                    .iter()
                    .find(|file| matcher::matches(&base.path, &file.path, &file.lang));
                if let Some(file) = candidate {
                    section.insert(lang.clone(), file.clone());
                }
            }
            translations.insert(base.path.clone(), section);
        }

        debug!(
            base_lang = %base_lang,
            languages = langs.len(),
            base_files = translations.len(),
            "bundle built"
        );

        Self {
            base_lang,
            langs,
            files_by_lang,
            translations,
        }
    }

    /// Base language of the bundle.
    #[must_use]
    pub fn base_lang(&self) -> &str {
        &self.base_lang
    }

    /// All languages with at least one file, in first-seen order.
    #[must_use]
    pub fn langs(&self) -> &[String] {
        &self.langs
    }

    /// Files in the base language, in discovery order.
    #[must_use]
    pub fn base_files(&self) -> &[LanguageFile] {
        self.files_in_lang(&self.base_lang)
    }

    /// Files in the given language, in discovery order.
    #[must_use]
    pub fn files_in_lang(&self, lang: &str) -> &[LanguageFile] {
        self.files_by_lang.get(lang).map_or(&[][..], Vec::as_slice)
    }

    /// Returns `true` when `path` is a file in the base language.
    #[must_use]
    pub fn is_base_path(&self, path: &str) -> bool {
        self.translations.contains_key(path)
    }

    /// Translation of the base file at `base_path` into `lang`, if any.
    #[must_use]
    pub fn translation(&self, base_path: &str, lang: &str) -> Option<&LanguageFile> {
        self.translations.get(base_path)?.get(lang)
    }

    /// All translations of the base file at `base_path`, ordered by language.
    #[must_use]
    pub fn translations_of(&self, base_path: &str) -> Vec<&LanguageFile> {
        let Some(section) = self.translations.get(base_path) else {
            return Vec::new();
        };
        self.langs
            .iter()
            .filter_map(|lang| section.get(lang))
            .collect()
    }
}
