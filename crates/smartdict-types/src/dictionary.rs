use serde::{Deserialize, Serialize};

/// One lexical record from the Free Dictionary API.
///
/// The upstream schema is not under our control, so every field is
/// defaulted: a missing or oddly-shaped field degrades to empty rather
/// than failing the whole entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

/// A part-of-speech-tagged group of definitions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Definition {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tolerates_sparse_upstream_entries() {
        let entries: Vec<DictionaryEntry> = serde_json::from_value(json!([
            {
                "word": "ephemeral",
                "meanings": [
                    {"partOfSpeech": "adjective", "definitions": [{"definition": "lasting a very short time"}]},
                    {"definitions": []}
                ]
            }
        ]))
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].phonetic, None);
        assert_eq!(entries[0].meanings[0].part_of_speech, "adjective");
        assert!(entries[0].meanings[1].part_of_speech.is_empty());
        assert!(entries[0].meanings[1].synonyms.is_empty());
    }
}
