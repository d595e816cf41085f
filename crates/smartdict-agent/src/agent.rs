use std::sync::Arc;

use serde_json::Value;
use url::Url;

use smartdict_types::{DictionaryEntry, AGENT_NAME};

use crate::fetch::{DictionaryFetch, FetchError, HttpFetcher};

pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Command prefixes stripped before word extraction, checked in order.
const WORD_PREFIXES: [&str; 8] = [
    "define ",
    "meaning ",
    "what is ",
    "whats ",
    "definition of ",
    "meaning of ",
    "define: ",
    "meaning: ",
];

const HELP_MESSAGE: &str = "📖 **SmartDict Bot - How to Use**

I can help you look up word definitions! Here's how:

- `define [word]` - Get full definition
- `meaning [word]` - Get meaning
- `[word]` - Just type any word
- `help` - Show this message

Examples:
- define ephemeral
- meaning serendipity
- eloquent
";

/// Stateless dictionary lookup service.
///
/// Constructed once at startup and shared by handle; holds nothing but the
/// agent name, the lookup base URL, and a reusable fetcher.
pub struct DictionaryAgent {
    name: String,
    api_base: String,
    fetcher: Arc<dyn DictionaryFetch>,
}

impl DictionaryAgent {
    pub fn new() -> Self {
        Self::with_fetcher(DEFAULT_API_BASE, Arc::new(HttpFetcher::new()))
    }

    pub fn with_fetcher(api_base: impl Into<String>, fetcher: Arc<dyn DictionaryFetch>) -> Self {
        Self {
            name: AGENT_NAME.to_string(),
            api_base: api_base.into(),
            fetcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turn one inbound chat message into one reply.
    ///
    /// Never fails: every lookup problem comes back as readable text, not an
    /// error. Lookup failure is a conversational outcome here.
    pub async fn process_message(&self, message: &str) -> String {
        let message = message.trim();
        let lower = message.to_lowercase();

        if matches!(lower.as_str(), "help" | "/help" | "how to use") {
            return HELP_MESSAGE.to_string();
        }

        if matches!(lower.as_str(), "hello" | "hi" | "hey" | "greetings") {
            return format!(
                "👋 Hello! I'm {}. Send me any word or type 'help' to learn how to use me!",
                self.name
            );
        }

        match extract_word(message) {
            Some(word) => self.lookup_word(&word).await,
            None => {
                "❓ Please provide a word to look up. Type 'help' for usage instructions."
                    .to_string()
            }
        }
    }

    /// Query the dictionary API and render the outcome as display text.
    pub async fn lookup_word(&self, word: &str) -> String {
        let url = match self.lookup_url(word) {
            Some(url) => url,
            None => {
                tracing::error!(api_base = %self.api_base, "lookup base URL is not usable");
                return "❌ An unexpected error occurred. Please try again.".to_string();
            }
        };

        tracing::info!(word, "looking up");

        let response = match self.fetcher.fetch(url.as_str()).await {
            Ok(response) => response,
            Err(FetchError::Timeout) => {
                return format!(
                    "⏱️ Request timed out while looking up '{}'. Please try again.",
                    word
                );
            }
            Err(FetchError::Transport(error)) => {
                tracing::error!(%error, word, "dictionary lookup failed");
                return "❌ An unexpected error occurred. Please try again.".to_string();
            }
        };

        if response.status == 404 {
            return format!(
                "❌ Sorry, I couldn't find '{}' in my dictionary. Please check the spelling.",
                word
            );
        }

        if response.status != 200 {
            return format!("⚠️ I had trouble looking up '{}'. Please try again later.", word);
        }

        let data: Value = match serde_json::from_str(&response.body) {
            Ok(data) => data,
            Err(error) => {
                tracing::error!(%error, word, "dictionary response was not JSON");
                return "❌ An unexpected error occurred. Please try again.".to_string();
            }
        };

        self.format_definition(word, data)
    }

    fn lookup_url(&self, word: &str) -> Option<Url> {
        let mut url = Url::parse(&self.api_base).ok()?;
        url.path_segments_mut()
            .ok()?
            .push(&word.to_lowercase());
        Some(url)
    }

    /// Render the upstream entries. The first 3 meanings are selected
    /// positionally BEFORE meanings without definitions are skipped, so an
    /// empty meaning inside the window costs a slot but not a number.
    fn format_definition(&self, word: &str, data: Value) -> String {
        let entries: Vec<DictionaryEntry> = match serde_json::from_value(data) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::error!(%error, word, "failed to decode dictionary entries");
                return format!("❌ Error formatting the definition for '{}'.", word);
            }
        };

        let Some(entry) = entries.first() else {
            return format!("❌ No definition found for '{}'.", word);
        };

        if entry.meanings.is_empty() {
            return format!("❌ No meanings found for '{}'.", word);
        }

        let mut response = format!("📖 **{}**", word.to_uppercase());

        if let Some(phonetic) = entry.phonetic.as_deref().filter(|p| !p.is_empty()) {
            response.push_str(&format!(" _{}_", phonetic));
        }

        response.push_str("\n\n");

        let mut count = 0;
        for meaning in entry.meanings.iter().take(3) {
            let Some(definition) = meaning.definitions.first() else {
                continue;
            };

            count += 1;
            let part_of_speech = if meaning.part_of_speech.is_empty() {
                "unknown"
            } else {
                meaning.part_of_speech.as_str()
            };

            response.push_str(&format!("**{}. ({})**\n", count, part_of_speech));
            response.push_str(&format!("   {}\n", definition.definition));

            if let Some(example) = definition.example.as_deref().filter(|e| !e.is_empty()) {
                response.push_str(&format!("   💡 Example: _{}_\n", example));
            }

            response.push('\n');
        }

        if let Some(first) = entry.meanings.first() {
            if !first.synonyms.is_empty() {
                let synonyms: Vec<&str> =
                    first.synonyms.iter().take(5).map(String::as_str).collect();
                response.push_str(&format!("🔄 Similar words: {}\n", synonyms.join(", ")));
            }
        }

        response.trim().to_string()
    }
}

impl Default for DictionaryAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the word to look up out of free-form text.
///
/// A bare command word ("define", "meaning of", ...) means the user gave a
/// prefix with nothing after it; that yields no word rather than a lookup
/// of the command itself.
fn extract_word(message: &str) -> Option<String> {
    let trimmed = message.trim();

    for prefix in WORD_PREFIXES {
        if trimmed.eq_ignore_ascii_case(prefix.trim_end()) {
            return None;
        }

        if let Some(head) = trimmed.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return trimmed[prefix.len()..]
                    .split_whitespace()
                    .next()
                    .map(str::to_string);
            }
        }
    }

    trimmed.split_whitespace().next().map(str::to_string)
}
