use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::StopWordsError;

pub const DEFAULT_LANGUAGES: [&str; 3] = ["english", "french", "spanish"];

/// Read-only union of per-language stopword lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageLoad {
    Loaded { language: String, words: usize },
    Missing { language: String },
}

#[derive(Debug)]
pub struct StopWordsLoad {
    pub stop_words: StopWords,
    pub languages: Vec<LanguageLoad>,
}

impl StopWords {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Loads `<dir>/<language>.json` for every language, each a JSON array of
    /// strings. Missing files are skipped; an empty union is an error.
    pub fn load_dir(dir: &Path, languages: &[&str]) -> Result<StopWordsLoad, StopWordsError> {
        let mut stop_words = Self::default();
        let mut outcomes = Vec::with_capacity(languages.len());

        for language in languages {
            let path = dir.join(format!("{language}.json"));
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    outcomes.push(LanguageLoad::Missing {
                        language: (*language).to_string(),
                    });
                    continue;
                }
                Err(source) => return Err(StopWordsError::Read { path, source }),
            };

            let words: Vec<String> = serde_json::from_str(&text)
                .map_err(|source| StopWordsError::Malformed { path, source })?;
            outcomes.push(LanguageLoad::Loaded {
                language: (*language).to_string(),
                words: words.len(),
            });
            stop_words
                .words
                .extend(words.into_iter().map(|word| word.to_lowercase()));
        }

        if stop_words.is_empty() {
            return Err(StopWordsError::Empty {
                dir: dir.to_path_buf(),
            });
        }

        Ok(StopWordsLoad {
            stop_words,
            languages: outcomes,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
