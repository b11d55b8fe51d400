//! Static reference knowledge, grouped into topics with trigger keywords.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// The sentence used as context when no topic matches.
pub const DEFAULT_FALLBACK: &str =
    "General knowledge and information on various topics.";

/// A named unit of reference text with the keywords that trigger it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    id: String,
    text: String,
    keywords: Vec<String>,
}

impl Topic {
    /// Returns the topic identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the reference text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the lower-cased trigger keywords.
    #[inline]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns `true` if any keyword occurs in the lower-cased message.
    ///
    /// This is plain substring matching, so `"ai"` also matches `"said"`.
    #[inline]
    pub(crate) fn matches(&self, lowered_message: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_message.contains(keyword.as_str()))
    }
}

/// A fixed set of topics, kept in declaration order.
///
/// Every topic carries both its text and its keyword set, so the two can't
/// drift apart. A topic inserted by [`KnowledgeBase::add_topic`] has no
/// keywords and is never returned by the retriever until it is declared
/// again with keywords through [`KnowledgeBase::with_topic`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    topics: Vec<Topic>,
    fallback: String,
}

impl Default for KnowledgeBase {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    /// Creates an empty knowledge base with the default fallback sentence.
    #[inline]
    pub fn new() -> Self {
        Self {
            topics: vec![],
            fallback: DEFAULT_FALLBACK.to_owned(),
        }
    }

    /// Declares a topic with its reference text and trigger keywords.
    ///
    /// Keywords are lower-cased here. Declaring an existing id replaces
    /// both text and keywords in place. An empty keyword matches every
    /// message.
    pub fn with_topic<I, S>(
        mut self,
        id: impl Into<String>,
        text: impl Into<String>,
        keywords: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let topic = Topic {
            id: id.into(),
            text: text.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        };
        match self.topics.iter_mut().find(|t| t.id == topic.id) {
            Some(existing) => *existing = topic,
            None => self.topics.push(topic),
        }
        self
    }

    /// Sets the sentence returned when no topic matches.
    #[inline]
    pub fn with_fallback<S: Into<String>>(mut self, fallback: S) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Inserts or replaces the reference text of a topic.
    ///
    /// Keywords are left untouched: a new topic gets none, so the
    /// retriever will not find it.
    pub fn add_topic(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();
        match self.topics.iter_mut().find(|t| t.id == id) {
            Some(existing) => existing.text = text,
            None => self.topics.push(Topic {
                id: id.clone(),
                text,
                keywords: vec![],
            }),
        }
        info!("added knowledge about: {id}");
    }

    /// Returns the reference text of a topic.
    #[inline]
    pub fn reference_text(&self, id: &str) -> Option<&str> {
        self.topics
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.text.as_str())
    }

    /// Returns the topic ids in declaration order.
    #[inline]
    pub fn known_topics(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.id.as_str())
    }

    /// Returns the topics in declaration order.
    #[inline]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Returns the fallback sentence.
    #[inline]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Parses a knowledge file.
    ///
    /// ```json
    /// {
    ///   "fallback": "General knowledge.",
    ///   "topics": [
    ///     { "id": "health", "text": "...", "keywords": ["health", "diet"] }
    ///   ]
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let file: KnowledgeFile = serde_json::from_str(json)
            .map_err(|err| Error::knowledge().with_reason(err.to_string()))?;

        let mut knowledge = Self::new();
        if let Some(fallback) = file.fallback {
            knowledge = knowledge.with_fallback(fallback);
        }
        for entry in file.topics {
            if knowledge.reference_text(&entry.id).is_some() {
                return Err(Error::knowledge()
                    .with_reason(format!("duplicate topic `{}`", entry.id)));
            }
            knowledge =
                knowledge.with_topic(entry.id, entry.text, entry.keywords);
        }
        Ok(knowledge)
    }

    /// Reads a knowledge file from disk. See [`KnowledgeBase::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| {
            Error::knowledge().with_reason(format!("{}: {err}", path.display()))
        })?;
        let knowledge = Self::from_json(&json)?;
        debug!(
            "loaded {} topics from {}",
            knowledge.topics.len(),
            path.display()
        );
        Ok(knowledge)
    }
}

#[derive(Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    fallback: Option<String>,
    topics: Vec<TopicEntry>,
}

#[derive(Deserialize)]
struct TopicEntry {
    id: String,
    text: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::ErrorKind;

    fn sample() -> KnowledgeBase {
        KnowledgeBase::new()
            .with_topic("health", "Sleep well.", ["Health", "SLEEP"])
            .with_topic("climate", "Recycle.", ["climate", "green"])
    }

    #[test]
    fn test_lookup() {
        let knowledge = sample();
        assert_eq!(knowledge.reference_text("health"), Some("Sleep well."));
        assert_eq!(knowledge.reference_text("unknown"), None);
        assert_eq!(
            knowledge.known_topics().collect::<Vec<_>>(),
            ["health", "climate"]
        );
        assert_eq!(knowledge.topics()[0].keywords(), ["health", "sleep"]);
        assert_eq!(knowledge.fallback(), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_add_topic_replaces_text_only() {
        let mut knowledge = sample();
        knowledge.add_topic("health", "Drink water.");
        assert_eq!(knowledge.reference_text("health"), Some("Drink water."));
        assert_eq!(knowledge.topics()[0].keywords(), ["health", "sleep"]);
        assert_eq!(knowledge.known_topics().next(), Some("health"));
    }

    #[test]
    fn test_add_topic_has_no_keywords() {
        let mut knowledge = sample();
        knowledge.add_topic("astronomy", "Stars are far away.");
        assert_eq!(
            knowledge.reference_text("astronomy"),
            Some("Stars are far away.")
        );
        let topic = knowledge.topics().last().unwrap();
        assert_eq!(topic.id(), "astronomy");
        assert!(topic.keywords().is_empty());
        assert!(!topic.matches("tell me about astronomy"));
    }

    #[test]
    fn test_from_json() {
        let knowledge = KnowledgeBase::from_json(
            r#"{
                "fallback": "Nothing specific.",
                "topics": [
                    { "id": "tea", "text": "Steep for 3 minutes.", "keywords": ["Tea"] },
                    { "id": "notes", "text": "Unreachable." }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(knowledge.fallback(), "Nothing specific.");
        assert_eq!(knowledge.topics()[0].keywords(), ["tea"]);
        assert!(knowledge.topics()[1].keywords().is_empty());
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let err = KnowledgeBase::from_json(
            r#"{ "topics": [
                { "id": "tea", "text": "a", "keywords": ["tea"] },
                { "id": "tea", "text": "b", "keywords": ["tea"] }
            ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Knowledge);
        assert!(err.reason().contains("duplicate topic `tea`"));

        let err = KnowledgeBase::from_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Knowledge);
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "topics": [{{ "id": "tea", "text": "Hot.", "keywords": ["tea"] }}] }}"#
        )
        .unwrap();
        let knowledge = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(knowledge.reference_text("tea"), Some("Hot."));

        let err = KnowledgeBase::load("/nonexistent/knowledge.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Knowledge);
    }
}
