use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{HitsujunError, HitsujunResult};

/// Dictionary facts shown next to the stroke animation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KanjiMetadata {
    /// English meanings.
    pub meanings: Vec<String>,
    /// On'yomi readings.
    pub on_readings: Vec<String>,
    /// Kun'yomi readings.
    pub kun_readings: Vec<String>,
    /// Stroke count from the dictionary (independent of the mounted SVG).
    pub strokes: Option<u32>,
    /// Newspaper frequency rank.
    pub frequency: Option<u32>,
    /// JLPT level, e.g. `"N5"`.
    pub jlpt: Option<String>,
    /// School grade.
    pub grade: Option<u32>,
    /// Radical character.
    pub radical: Option<String>,
}

impl KanjiMetadata {
    /// Human-readable detail rows, skipping unknown values.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some(s) = self.strokes {
            rows.push(("Strokes", s.to_string()));
        }
        if let Some(f) = self.frequency {
            rows.push(("Frequency", format!("#{f}")));
        }
        if let Some(j) = &self.jlpt {
            rows.push(("JLPT", j.clone()));
        }
        if let Some(g) = self.grade {
            rows.push(("Grade", format!("{} Grade", ordinal(g))));
        }
        if let Some(r) = &self.radical {
            rows.push(("Radical", r.clone()));
        }
        rows
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Lookup of [`KanjiMetadata`] by character.
pub trait MetadataSource {
    /// Metadata for `character`; unknown characters are [`HitsujunError::NotFound`].
    fn fetch_metadata(&self, character: char) -> HitsujunResult<KanjiMetadata>;
}

/// Metadata held in one JSON object keyed by character.
#[derive(Clone, Debug, Default)]
pub struct JsonMetadataSource {
    entries: BTreeMap<char, KanjiMetadata>,
}

impl JsonMetadataSource {
    /// Parse a JSON document such as `{ "一": { "meanings": ["one"], "strokes": 1 } }`.
    pub fn from_json(json: &str) -> HitsujunResult<Self> {
        let raw: BTreeMap<String, KanjiMetadata> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for (key, meta) in raw {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(HitsujunError::validation(format!(
                    "metadata key '{key}' must be exactly one character"
                )));
            };
            entries.insert(c, meta);
        }
        Ok(Self { entries })
    }

    /// Load from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> HitsujunResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read metadata '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Number of known characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no characters are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for JsonMetadataSource {
    fn fetch_metadata(&self, character: char) -> HitsujunResult<KanjiMetadata> {
        self.entries
            .get(&character)
            .cloned()
            .ok_or_else(|| HitsujunError::not_found(format!("no metadata for '{character}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/metadata.rs"]
mod tests;
