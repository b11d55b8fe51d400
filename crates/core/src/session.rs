use std::path::PathBuf;
use std::sync::Arc;

use ai_chatbot_model::{ModelOptions, ModelProvider};

use crate::{
    CompletionError, ContextRetriever, Error, KnowledgeBase, Message,
    ModelClient, Role, Transcript, TranscriptStore,
};

/// Prefix of the reply [`Session::respond`] gives when the model fails.
pub const ERROR_REPLY_PREFIX: &str = "Sorry, I encountered an error: ";

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// [`Session`] builder.
pub struct SessionBuilder {
    model_client: ModelClient,
    system_prompt: Option<String>,
    knowledge: Option<Arc<KnowledgeBase>>,
    options: ModelOptions,
    store: Option<TranscriptStore>,
}

impl SessionBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(provider: P) -> Self {
        Self::with_model_client(ModelClient::new(provider))
    }

    /// Creates a new builder that shares an existing client.
    #[inline]
    pub fn with_model_client(model_client: ModelClient) -> Self {
        Self {
            model_client,
            system_prompt: None,
            knowledge: None,
            options: ModelOptions::default(),
            store: None,
        }
    }

    /// Sets the system prompt sent ahead of every turn.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the knowledge used to build context. Without one, every turn
    /// gets the default fallback sentence as context.
    #[inline]
    pub fn with_knowledge(
        mut self,
        knowledge: impl Into<Arc<KnowledgeBase>>,
    ) -> Self {
        self.knowledge = Some(knowledge.into());
        self
    }

    /// Sets the model, temperature and token limit.
    #[inline]
    pub fn with_model_options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets where [`Session::persist`] writes transcripts.
    #[inline]
    pub fn with_store(mut self, store: TranscriptStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the session.
    pub fn build(self) -> Session {
        let knowledge = self.knowledge.unwrap_or_default();
        Session {
            model_client: self.model_client,
            retriever: ContextRetriever::new(knowledge),
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_owned()),
            options: self.options,
            transcript: Transcript::default(),
            store: self.store.unwrap_or_default(),
        }
    }
}

/// One conversation with the model.
///
/// The session owns its transcript. Turns are taken one at a time, each
/// user message gets fresh context from the knowledge base.
pub struct Session {
    model_client: ModelClient,
    retriever: ContextRetriever,
    system_prompt: String,
    options: ModelOptions,
    transcript: Transcript,
    store: TranscriptStore,
}

impl Session {
    /// Appends a message to the transcript. Content is not validated.
    #[inline]
    pub fn append_message<S: Into<String>>(&mut self, role: Role, content: S) {
        self.transcript.push(Message::new(role, content));
    }

    /// Returns the transcript so far.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the options sent with every request.
    #[inline]
    pub fn model_options(&self) -> &ModelOptions {
        &self.options
    }

    /// Takes one turn and returns the failure as a value.
    ///
    /// The user message is always recorded. The assistant reply is recorded
    /// only when the model succeeds, so a failed turn leaves the transcript
    /// one message longer than before.
    pub async fn try_respond(
        &mut self,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        self.append_message(Role::User, user_message);
        let context = self.retriever.retrieve(user_message);

        let reply = self
            .model_client
            .complete(
                &self.system_prompt,
                &context,
                self.transcript.messages(),
                &self.options,
            )
            .await?;

        self.append_message(Role::Assistant, reply.clone());
        Ok(reply)
    }

    /// Takes one turn and always returns something to show the user.
    ///
    /// On failure the reply is [`ERROR_REPLY_PREFIX`] followed by the
    /// provider's message, and nothing is added for the assistant.
    pub async fn respond(&mut self, user_message: &str) -> String {
        match self.try_respond(user_message).await {
            Ok(reply) => reply,
            Err(err) => format!("{ERROR_REPLY_PREFIX}{err}"),
        }
    }

    /// Writes the whole transcript to a new file and returns its path.
    ///
    /// The transcript is kept, so later turns and saves include it again.
    #[inline]
    pub fn persist(&self) -> Result<PathBuf, Error> {
        self.store.save(self.transcript.messages())
    }
}
