use serde::{Deserialize, Serialize};

/// A programming language used by topic examples.
///
/// The server-side `runner` reference found in descriptor files is not part
/// of this record; loaders drop it before the language reaches the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    /// File extension including the leading dot (e.g. `.py`).
    #[serde(rename = "ext")]
    pub file_extension: String,
    /// Editor syntax identifier used by the code viewer.
    #[serde(rename = "monacoLanguage")]
    pub editor_syntax_id: String,
    pub label: String,
    pub icon: String,
}

impl Language {
    /// Returns true if `extension` (without the leading dot) belongs to this language.
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.file_extension
            .strip_prefix('.')
            .is_some_and(|ext| ext == extension)
    }
}
