//! Language registry loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use themelion_model::Language;
use tracing::debug;

use crate::discovery::list_files_with_extension;
use crate::error::{ContentError, Result};

/// On-disk language descriptor.
///
/// Descriptors may also carry a `runner` reference for the server-side code
/// runner; like any other unknown key it is dropped here and never reaches
/// the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageDescriptor {
    id: String,
    name: String,
    ext: String,
    #[serde(alias = "editorSyntaxId")]
    monaco_language: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    icon: String,
}

impl LanguageDescriptor {
    fn into_language(self) -> Language {
        Language {
            id: self.id,
            name: self.name,
            file_extension: self.ext,
            editor_syntax_id: self.monaco_language,
            label: self.label,
            icon: self.icon,
        }
    }
}

/// Languages keyed by id, kept in load order.
///
/// Re-inserting an id replaces the record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    by_id: BTreeMap<String, usize>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: Language) {
        match self.by_id.get(&language.id) {
            Some(&index) => self.languages[index] = language,
            None => {
                self.by_id.insert(language.id.clone(), self.languages.len());
                self.languages.push(language);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Language> {
        self.by_id.get(id).map(|&index| &self.languages[index])
    }

    /// Finds the language whose `ext` is exactly `.` + `extension`.
    pub fn resolve_extension(&self, extension: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|language| language.matches_extension(extension))
    }

    /// Language id for an example file extension.
    ///
    /// Unknown extensions fall back to the raw extension itself.
    pub fn language_id_for(&self, extension: &str) -> String {
        self.resolve_extension(extension)
            .map(|language| language.id.clone())
            .unwrap_or_else(|| extension.to_string())
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn into_vec(self) -> Vec<Language> {
        self.languages
    }
}

impl FromIterator<Language> for LanguageRegistry {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        let mut registry = Self::new();
        for language in iter {
            registry.insert(language);
        }
        registry
    }
}

/// Loads every `*.json` descriptor directly inside `dir`.
///
/// A malformed descriptor fails the whole load.
pub fn load_languages(dir: &Path) -> Result<LanguageRegistry> {
    let mut registry = LanguageRegistry::new();
    for path in list_files_with_extension(dir, "json")? {
        let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        let descriptor: LanguageDescriptor =
            serde_json::from_str(&raw).map_err(|source| ContentError::Json {
                path: path.clone(),
                source,
            })?;
        debug!(
            language_id = %descriptor.id,
            ext = %descriptor.ext,
            source_filename = %path.display(),
            "loaded language"
        );
        registry.insert(descriptor.into_language());
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(id: &str, ext: &str) -> Language {
        Language {
            id: id.to_string(),
            name: id.to_string(),
            file_extension: ext.to_string(),
            editor_syntax_id: id.to_string(),
            label: id.to_string(),
            icon: id.to_string(),
        }
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut registry: LanguageRegistry =
            [language("python", ".py"), language("go", ".go")].into_iter().collect();
        registry.insert(language("python", ".pyw"));
        let ids: Vec<&str> = registry.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["python", "go"]);
        assert_eq!(registry.get("python").unwrap().file_extension, ".pyw");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_extension_falls_back_to_itself() {
        let registry: LanguageRegistry = [language("rust", ".rs")].into_iter().collect();
        assert_eq!(registry.language_id_for("rs"), "rust");
        assert_eq!(registry.language_id_for("xyz"), "xyz");
        assert_eq!(registry.language_id_for(""), "");
    }

    #[test]
    fn runner_field_is_dropped() {
        let descriptor: LanguageDescriptor = serde_json::from_str(
            r#"{"id":"go","name":"Go","ext":".go","monacoLanguage":"go","label":"Go","icon":"go","runner":{"image":"golang:1.22"}}"#,
        )
        .unwrap();
        let json = serde_json::to_value(descriptor.into_language()).unwrap();
        assert!(json.get("runner").is_none());
        assert_eq!(json["monacoLanguage"], "go");
    }

    #[test]
    fn editor_syntax_alias_is_accepted() {
        let descriptor: LanguageDescriptor = serde_json::from_str(
            r#"{"id":"csharp","name":"C#","ext":".cs","editorSyntaxId":"csharp"}"#,
        )
        .unwrap();
        assert_eq!(descriptor.into_language().editor_syntax_id, "csharp");
    }
}
