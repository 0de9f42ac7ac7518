use serde_json::Value;

const SNIPPET_SEPARATOR: &str = "\n\n";

/// Context snippets that survived filtering, in caller order.
///
/// Each snippet is trimmed; snippets that are empty after trimming are
/// dropped. [`ContextBlock::render`] joins the survivors with a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBlock {
    snippets: Vec<String>,
}

impl ContextBlock {
    pub fn from_snippets<S: AsRef<str>>(snippets: &[S]) -> Self {
        let snippets = snippets
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { snippets }
    }

    /// Build from untyped values (e.g. a JSON array read from disk).
    /// Non-string entries are discarded along with blank ones.
    pub fn from_json_values(values: &[Value]) -> Self {
        let strings: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
        Self::from_snippets(&strings)
    }

    pub fn has_context(&self) -> bool {
        !self.snippets.is_empty()
    }

    pub fn snippets(&self) -> &[String] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// The joined block; empty when no snippet survived.
    pub fn render(&self) -> String {
        self.snippets.join(SNIPPET_SEPARATOR)
    }
}
