use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{LocaleError, Result};
use crate::locale::Locale;

const EMBEDDED: [(&str, &str); 6] = [
    ("en.yaml", include_str!("../resources/en.yaml")),
    ("hi.yaml", include_str!("../resources/hi.yaml")),
    ("ta.yaml", include_str!("../resources/ta.yaml")),
    ("te.yaml", include_str!("../resources/te.yaml")),
    ("bn.yaml", include_str!("../resources/bn.yaml")),
    ("kn.yaml", include_str!("../resources/kn.yaml")),
];

/// Everything the assistant can say or match in one language
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleResources {
    pub locale: Locale,
    #[serde(default)]
    pub strings: HashMap<String, String>,
    /// Command name to the phrase the user should say
    #[serde(default)]
    pub voice_commands: HashMap<String, String>,
    /// Intent name to the phrases that trigger it
    #[serde(default)]
    pub intents: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub emergency_terms: Vec<String>,
}

impl LocaleResources {
    fn merge(&mut self, other: LocaleResources) {
        self.strings.extend(other.strings);
        self.voice_commands.extend(other.voice_commands);
        self.intents.extend(other.intents);
        for term in other.emergency_terms {
            if !self.emergency_terms.contains(&term) {
                self.emergency_terms.push(term);
            }
        }
    }
}

/// Immutable set of per-locale tables, loaded once at startup
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    tables: HashMap<Locale, LocaleResources>,
}

impl ResourceBundle {
    /// Tables compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_documents(EMBEDDED)
    }

    /// Builds a bundle from `(name, yaml)` documents. Documents for the same
    /// locale are merged, later ones win on key conflicts.
    pub fn from_documents<'a, I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tables: HashMap<Locale, LocaleResources> = HashMap::new();
        for (name, source) in documents {
            let resources: LocaleResources =
                serde_yaml::from_str(source).map_err(|source| LocaleError::Parse {
                    name: name.to_string(),
                    source,
                })?;
            debug!(
                document = name,
                locale = %resources.locale,
                strings = resources.strings.len(),
                "Loaded locale resources"
            );
            match tables.get_mut(&resources.locale) {
                Some(existing) => existing.merge(resources),
                None => {
                    tables.insert(resources.locale, resources);
                }
            }
        }

        if !tables.contains_key(&Locale::DEFAULT) {
            return Err(LocaleError::MissingDefault(Locale::DEFAULT));
        }
        Ok(Self { tables })
    }

    /// Embedded tables extended with every `*.yaml` file in `dir`
    pub fn with_overrides(dir: impl AsRef<Path>) -> Result<Self> {
        let mut sources: Vec<(String, String)> = EMBEDDED
            .iter()
            .map(|(name, body)| (name.to_string(), body.to_string()))
            .collect();

        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml"))
            .collect();
        entries.sort();

        for path in entries {
            let body = std::fs::read_to_string(&path)?;
            sources.push((path.display().to_string(), body));
        }

        Self::from_documents(sources.iter().map(|(n, b)| (n.as_str(), b.as_str())))
    }

    pub fn table(&self, locale: Locale) -> Option<&LocaleResources> {
        self.tables.get(&locale)
    }

    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.tables.keys().copied().collect();
        locales.sort();
        locales
    }

    /// Two-level lookup: `locale`, then the default locale
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.lookup_in(locale, |table| table.strings.get(key))
    }

    pub fn lookup_command(&self, locale: Locale, command: &str) -> Option<&str> {
        self.lookup_in(locale, |table| table.voice_commands.get(command))
    }

    fn lookup_in<'a, F>(&'a self, locale: Locale, get: F) -> Option<&'a str>
    where
        F: Fn(&'a LocaleResources) -> Option<&'a String>,
    {
        self.table(locale)
            .and_then(&get)
            .or_else(|| self.table(Locale::DEFAULT).and_then(&get))
            .map(String::as_str)
    }
}
