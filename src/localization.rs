/*!
 * Translated caption text resolution.
 *
 * Translations live outside this crate, usually in a database or a JSON file.
 * Callers resolve them into a plain track before rendering, so the
 * renderer only ever sees final text. A segment without a translation
 * keeps its original text.
 */

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::language_utils;
use crate::subtitle_processor::{SubtitleTrack, TimedSegment};

/// Source of translated caption text
pub trait TranslationLookup {
    /// Translated text for a segment, `None` when no translation exists
    fn lookup(&self, sequence: usize, language: &str) -> Option<String>;
}

impl<F> TranslationLookup for F
where
    F: Fn(usize, &str) -> Option<String>,
{
    fn lookup(&self, sequence: usize, language: &str) -> Option<String> {
        self(sequence, language)
    }
}

/// Produce a track whose texts are in `target_language`.
///
/// When the target is the source language the track is returned as is.
pub fn resolve_translations<L: TranslationLookup + ?Sized>(
    track: &SubtitleTrack,
    source_language: &str,
    target_language: &str,
    lookup: &L,
) -> SubtitleTrack {
    if source_language.trim().eq_ignore_ascii_case(target_language.trim())
        || language_utils::language_codes_match(source_language, target_language)
    {
        debug!("Target language {} is the source language, keeping original text", target_language);
        return track.clone();
    }

    let mut fallbacks = 0;
    let segments = track
        .iter()
        .map(|segment| {
            let text = match lookup.lookup(segment.sequence, target_language) {
                Some(translated) if !translated.trim().is_empty() => translated,
                _ => {
                    debug!("No {} translation for segment {}, using original", target_language, segment.sequence);
                    fallbacks += 1;
                    segment.text.clone()
                }
            };
            TimedSegment { text, ..segment.clone() }
        })
        .collect();

    if fallbacks > 0 {
        warn!(
            "{} of {} segments have no {} translation and keep the original text",
            fallbacks,
            track.len(),
            target_language
        );
    }

    SubtitleTrack { segments }
}

/// In-memory translations keyed by language, then segment sequence.
///
/// JSON layout: `{ "fr": { "1": "Bonjour", "2": "..." } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: HashMap<String, HashMap<usize, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, sequence: usize, text: impl Into<String>) {
        self.languages
            .entry(language.trim().to_lowercase())
            .or_default()
            .insert(sequence, text.into());
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)
            .map(Self::normalized)
            .context("Failed to parse translation table JSON")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid translation file: {:?}", path.as_ref()))
    }

    fn normalized(self) -> Self {
        let languages = self
            .languages
            .into_iter()
            .map(|(language, entries)| (language.trim().to_lowercase(), entries))
            .collect();
        Self { languages }
    }

    fn entries_for(&self, language: &str) -> Option<&HashMap<usize, String>> {
        let key = language.trim().to_lowercase();
        self.languages.get(&key).or_else(|| {
            self.languages
                .iter()
                .find(|(candidate, _)| language_utils::language_codes_match(candidate, &key))
                .map(|(_, entries)| entries)
        })
    }
}

impl TranslationLookup for TranslationTable {
    fn lookup(&self, sequence: usize, language: &str) -> Option<String> {
        self.entries_for(language)
            .and_then(|entries| entries.get(&sequence))
            .cloned()
    }
}
