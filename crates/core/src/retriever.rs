use std::sync::Arc;

use crate::KnowledgeBase;

const SEPARATOR: &str = "\n\n";

/// Picks the reference text relevant to a user message.
///
/// A topic is relevant when any of its keywords occurs anywhere in the
/// lower-cased message. There is no ranking; matched topics come back in
/// declaration order.
#[derive(Clone, Debug)]
pub struct ContextRetriever {
    knowledge: Arc<KnowledgeBase>,
}

impl ContextRetriever {
    /// Creates a retriever over the given knowledge base.
    #[inline]
    pub fn new(knowledge: impl Into<Arc<KnowledgeBase>>) -> Self {
        Self {
            knowledge: knowledge.into(),
        }
    }

    /// Returns the knowledge base this retriever reads from.
    #[inline]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Builds the context bundle for one message.
    pub fn retrieve(&self, user_message: &str) -> String {
        let lowered = user_message.to_lowercase();
        let matched: Vec<&str> = self
            .knowledge
            .topics()
            .iter()
            .filter(|topic| topic.matches(&lowered))
            .map(|topic| topic.text())
            .collect();
        trace!("{} topics matched", matched.len());

        if matched.is_empty() {
            return self.knowledge.fallback().to_owned();
        }
        matched.join(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::DEFAULT_FALLBACK;

    fn retriever() -> ContextRetriever {
        ContextRetriever::new(
            KnowledgeBase::new()
                .with_topic("programming", "PROGRAMMING", ["code", "python"])
                .with_topic("ai_ml", "AI", ["ai", "machine learning"])
                .with_topic("health", "HEALTH", ["health", "sleep"]),
        )
    }

    #[test]
    fn test_single_match_is_case_insensitive() {
        assert_eq!(retriever().retrieve("How much SLEEP do I need?"), "HEALTH");
    }

    #[test]
    fn test_no_match_returns_fallback() {
        assert_eq!(retriever().retrieve("tell me a joke"), DEFAULT_FALLBACK);
        assert_eq!(retriever().retrieve(""), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_multiple_matches_keep_declaration_order() {
        let context =
            retriever().retrieve("Sleep tips for python code and machine learning");
        assert_eq!(context, "PROGRAMMING\n\nAI\n\nHEALTH");
    }

    #[test]
    fn test_topic_included_once() {
        // Both "code" and "python" match, the text still appears once.
        assert_eq!(retriever().retrieve("python code"), "PROGRAMMING");
    }

    #[test]
    fn test_substring_false_positive() {
        // Known imprecision: "ai" matches inside "said".
        assert_eq!(retriever().retrieve("She said hello"), "AI");
    }

    #[test]
    fn test_empty_keyword_matches_everything() {
        let retriever = ContextRetriever::new(
            KnowledgeBase::new()
                .with_topic("health", "HEALTH", ["sleep"])
                .with_topic("always", "ALWAYS", [""]),
        );
        assert_eq!(retriever.retrieve("tell me a joke"), "ALWAYS");
        assert_eq!(retriever.retrieve(""), "ALWAYS");
        assert_eq!(retriever.retrieve("sleep"), "HEALTH\n\nALWAYS");
    }

    #[test]
    fn test_custom_fallback() {
        let retriever = ContextRetriever::new(
            KnowledgeBase::new().with_fallback("Nothing to add."),
        );
        assert_eq!(retriever.retrieve("anything"), "Nothing to add.");
        assert!(retriever.knowledge().topics().is_empty());
    }

    #[test]
    fn test_added_topic_is_unreachable() {
        let mut knowledge = KnowledgeBase::new();
        knowledge.add_topic("astronomy", "STARS");
        let retriever = ContextRetriever::new(knowledge);
        assert_eq!(retriever.retrieve("astronomy"), DEFAULT_FALLBACK);
    }
}
