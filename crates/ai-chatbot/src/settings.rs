//! Process configuration read from environment variables.

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};
use std::path::PathBuf;
use std::str::FromStr;

use ai_chatbot_core::{
    DEFAULT_CONVERSATIONS_DIR, KnowledgeBase, ModelOptions, TranscriptStore,
};
use ai_chatbot_openai_model::{OpenAIConfigBuilder, OpenAIProvider};

use crate::Preset;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// The kind of a settings error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `OPENAI_API_KEY` is not set.
    MissingCredential,
    /// A variable is set to something that cannot be parsed.
    InvalidValue,
    /// The configured knowledge file cannot be loaded.
    Knowledge,
}

/// Error type for [`Settings`].
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    #[inline]
    fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

/// Everything the binaries need to start, read from the environment.
///
/// | Variable | Meaning |
/// | --- | --- |
/// | `OPENAI_API_KEY` | provider credential, required to chat |
/// | `OPENAI_BASE_URL` | OpenAI-compatible endpoint |
/// | `OPENAI_MODEL` | model identifier |
/// | `CHATBOT_TEMPERATURE` | sampling temperature |
/// | `CHATBOT_MAX_TOKENS` | reply token limit |
/// | `CHATBOT_KNOWLEDGE` | built-in preset, `general` or `islamic` |
/// | `CHATBOT_KNOWLEDGE_FILE` | JSON knowledge file, overrides the preset topics |
/// | `CHATBOT_CONVERSATIONS_DIR` | where transcripts are saved |
/// | `CHATBOT_ADDR` | server listen address |
///
/// Empty values are treated as unset.
#[derive(Clone, PartialEq)]
pub struct Settings {
    api_key: Option<String>,
    base_url: Option<String>,
    model_options: ModelOptions,
    preset: Preset,
    knowledge_file: Option<PathBuf>,
    conversations_dir: PathBuf,
    addr: String,
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` from
    /// the working directory first if there is one.
    pub fn from_env() -> Result<Self, Error> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!("failed to load .env: {err}");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut model_options = ModelOptions::default();
        if let Some(model) = get("OPENAI_MODEL") {
            model_options.model = model;
        }
        if let Some(temperature) = parse(&get, "CHATBOT_TEMPERATURE")? {
            model_options.temperature = temperature;
        }
        if let Some(max_tokens) = parse(&get, "CHATBOT_MAX_TOKENS")? {
            model_options.max_tokens = max_tokens;
        }

        let preset = match get("CHATBOT_KNOWLEDGE") {
            Some(value) => value.parse::<Preset>().map_err(|err: String| {
                Error::new(ErrorKind::InvalidValue, format!("CHATBOT_KNOWLEDGE: {err}"))
            })?,
            None => Preset::default(),
        };

        Ok(Self {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL"),
            model_options,
            preset,
            knowledge_file: get("CHATBOT_KNOWLEDGE_FILE").map(PathBuf::from),
            conversations_dir: get("CHATBOT_CONVERSATIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONVERSATIONS_DIR)),
            addr: get("CHATBOT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned()),
        })
    }

    /// Returns the API key, or an error if it is not configured.
    #[inline]
    pub fn api_key(&self) -> Result<&str, Error> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::new(
                ErrorKind::MissingCredential,
                "OPENAI_API_KEY environment variable is not set",
            )
        })
    }

    /// Builds the OpenAI provider from these settings.
    pub fn openai_provider(&self) -> Result<OpenAIProvider, Error> {
        let mut builder = OpenAIConfigBuilder::with_api_key(self.api_key()?);
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url.as_str());
        }
        Ok(OpenAIProvider::new(builder.build()))
    }

    /// Returns the model, temperature and token limit.
    #[inline]
    pub fn model_options(&self) -> &ModelOptions {
        &self.model_options
    }

    /// Returns the selected preset.
    #[inline]
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Builds the knowledge base: the knowledge file when configured,
    /// the preset's otherwise.
    pub fn knowledge(&self) -> Result<KnowledgeBase, Error> {
        let Some(path) = &self.knowledge_file else {
            return Ok(self.preset.knowledge());
        };
        KnowledgeBase::load(path)
            .map_err(|err| Error::new(ErrorKind::Knowledge, err.to_string()))
    }

    /// Returns the preset's system prompt.
    #[inline]
    pub fn system_prompt(&self) -> &'static str {
        self.preset.system_prompt()
    }

    /// Returns the store transcripts are saved to.
    #[inline]
    pub fn store(&self) -> TranscriptStore {
        TranscriptStore::new(self.conversations_dir.clone())
    }

    /// Returns the address the server listens on.
    #[inline]
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<deducted>"))
            .field("base_url", &self.base_url)
            .field("model_options", &self.model_options)
            .field("preset", &self.preset)
            .field("knowledge_file", &self.knowledge_file)
            .field("conversations_dir", &self.conversations_dir)
            .field("addr", &self.addr)
            .finish()
    }
}

fn parse<T, F>(get: &F, name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|value| {
            value.trim().parse().map_err(|err| {
                Error::new(
                    ErrorKind::InvalidValue,
                    format!("{name}: invalid value `{value}`: {err}"),
                )
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.model_options(), &ModelOptions::default());
        assert_eq!(settings.preset(), Preset::General);
        assert_eq!(settings.addr(), "0.0.0.0:8080");
        assert_eq!(settings.store().dir(), Path::new("conversations"));
        assert!(settings.knowledge().unwrap().reference_text("health").is_some());
    }

    #[test]
    fn test_missing_credential() {
        let settings = settings(&[("OPENAI_API_KEY", "")]).unwrap();
        let err = settings.api_key().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert_eq!(
            settings.openai_provider().unwrap_err().kind(),
            ErrorKind::MissingCredential
        );
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("CHATBOT_TEMPERATURE", "0.2"),
            ("CHATBOT_MAX_TOKENS", " 64 "),
            ("CHATBOT_KNOWLEDGE", "islamic"),
            ("CHATBOT_CONVERSATIONS_DIR", "/tmp/chats"),
            ("CHATBOT_ADDR", "127.0.0.1:3000"),
        ])
        .unwrap();
        assert_eq!(settings.api_key().unwrap(), "sk-test");
        assert_eq!(
            settings.model_options(),
            &ModelOptions {
                model: "gpt-4o-mini".to_owned(),
                temperature: 0.2,
                max_tokens: 64,
            }
        );
        assert_eq!(settings.preset(), Preset::Islamic);
        assert!(settings.system_prompt().contains("Islam"));
        assert_eq!(settings.store().dir(), Path::new("/tmp/chats"));
        assert_eq!(settings.addr(), "127.0.0.1:3000");
        assert!(settings.openai_provider().is_ok());
        assert!(!format!("{settings:?}").contains("sk-test"));
    }

    #[test]
    fn test_invalid_numbers_name_the_variable() {
        let err = settings(&[("CHATBOT_TEMPERATURE", "warm")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().starts_with("CHATBOT_TEMPERATURE:"));

        let err = settings(&[("CHATBOT_MAX_TOKENS", "-1")]).unwrap_err();
        assert!(err.to_string().starts_with("CHATBOT_MAX_TOKENS:"));

        let err = settings(&[("CHATBOT_KNOWLEDGE", "pirate")]).unwrap_err();
        assert!(err.to_string().starts_with("CHATBOT_KNOWLEDGE:"));
    }

    #[test]
    fn test_knowledge_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("knowledge.json");
        std::fs::write(
            &path,
            r#"{"topics": [{"id": "tea", "text": "Tea is brewed.", "keywords": ["tea"]}]}"#,
        )
        .unwrap();

        let settings = settings(&[(
            "CHATBOT_KNOWLEDGE_FILE",
            path.to_str().unwrap(),
        )])
        .unwrap();
        let knowledge = settings.knowledge().unwrap();
        assert_eq!(knowledge.reference_text("tea"), Some("Tea is brewed."));

        let settings = settings_missing_file(tmp.path());
        assert_eq!(settings.knowledge().unwrap_err().kind(), ErrorKind::Knowledge);
    }

    fn settings_missing_file(dir: &Path) -> Settings {
        let path = dir.join("missing.json");
        settings(&[("CHATBOT_KNOWLEDGE_FILE", path.to_str().unwrap())]).unwrap()
    }
}
