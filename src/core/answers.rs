//! Accumulated quiz answers.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Mapping from question prompt to the text of the chosen option.
///
/// Entries keep the order in which questions were answered. Recording an answer for a
/// prompt that is already present overwrites the earlier answer in place, so keys stay
/// unique and keep their original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    entries: Vec<(String, String)>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer for a prompt
    pub fn record(&mut self, prompt: impl Into<String>, answer: impl Into<String>) {
        let prompt = prompt.into();
        let answer = answer.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prompt) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((prompt, answer)),
        }
    }

    pub fn get(&self, prompt: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prompt)
            .map(|(_, a)| a.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(prompt, answer)` pairs in answer order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    pub fn prompts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }
}

impl<P, A> FromIterator<(P, A)> for AnswerRecord
where
    P: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, A)>>(iter: I) -> Self {
        let mut record = AnswerRecord::new();
        for (prompt, answer) in iter {
            record.record(prompt, answer);
        }
        record
    }
}

/// Serializes as a flat string-to-string object in answer order.
impl Serialize for AnswerRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prompt, answer) in &self.entries {
            map.serialize_entry(prompt, answer)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut record = AnswerRecord::new();
        record.record("second?", "b");
        record.record("first?", "a");

        let prompts: Vec<_> = record.prompts().collect();
        assert_eq!(prompts, vec!["second?", "first?"]);
    }

    #[test]
    fn test_rerecord_overwrites_in_place() {
        let mut record = AnswerRecord::new();
        record.record("q1", "a");
        record.record("q2", "b");
        record.record("q1", "c");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("q1"), Some("c"));
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![("q1", "c"), ("q2", "b")]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let record: AnswerRecord = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn test_empty_record() {
        let record = AnswerRecord::new();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
