/*!
 * Tests for translation resolution and language codes
 */

use anyhow::Result;
use capsync::language_utils;
use capsync::localization::{resolve_translations, TranslationLookup, TranslationTable};
use capsync::subtitle_processor::SubtitleTrack;
use crate::common;

fn consent_track() -> SubtitleTrack {
    let mut track = SubtitleTrack::new();
    track.push(0.0, 1.53, "Patient will be asleep.");
    track.push(1.53, 3.07, "You will not feel pain.");
    track.push(3.07, 4.57, "Recovery takes time.");
    track
}

/// Test that translations replace text but never timing
#[test]
fn test_resolveTranslations_withFullTable_shouldKeepTiming() {
    let mut table = TranslationTable::new();
    table.insert("fr", 1, "Le patient sera endormi.");
    table.insert("fr", 2, "Vous ne sentirez aucune douleur.");
    table.insert("fr", 3, "La guérison prend du temps.");

    let original = consent_track();
    let resolved = resolve_translations(&original, "en", "fr", &table);

    assert_eq!(resolved.len(), 3);
    for (translated, source) in resolved.iter().zip(original.iter()) {
        assert_eq!(translated.sequence, source.sequence);
        assert_eq!(translated.start_time, source.start_time);
        assert_eq!(translated.end_time, source.end_time);
    }
    assert_eq!(resolved.segments[2].text, "La guérison prend du temps.");
}

/// Test a closure as the lookup source
#[test]
fn test_resolveTranslations_withClosureLookup_shouldUseIt() {
    let lookup = |sequence: usize, language: &str| {
        (language == "de" && sequence == 2).then(|| "Sie werden keine Schmerzen spüren.".to_string())
    };

    let resolved = resolve_translations(&consent_track(), "en", "de", &lookup);

    assert_eq!(resolved.segments[0].text, "Patient will be asleep.");
    assert_eq!(resolved.segments[1].text, "Sie werden keine Schmerzen spüren.");
}

/// Test the lookup trait through a trait object
#[test]
fn test_resolveTranslations_withTraitObject_shouldResolve() {
    let mut table = TranslationTable::new();
    table.insert("zh", 3, "康复需要时间。");
    let lookup: &dyn TranslationLookup = &table;

    let resolved = resolve_translations(&consent_track(), "en", "zh-CN", lookup);

    assert_eq!(resolved.segments[2].text, "康复需要时间。");
}

/// Test loading a translation file from disk
#[test]
fn test_translationTable_fromFile_shouldLoadJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "fr.json", r#"{"fr": {"1": "Bonjour"}}"#)?;

    let table = TranslationTable::from_file(&path)?;

    assert_eq!(table.lookup(1, "fr").as_deref(), Some("Bonjour"));
    Ok(())
}

/// Test that malformed translation JSON is reported
#[test]
fn test_translationTable_fromJson_withInvalidJson_shouldFail() {
    assert!(TranslationTable::from_json("{\"fr\": [1, 2]}").is_err());
}

/// Test language code normalization across ISO variants
#[test]
fn test_languageCodesMatch_withIsoVariants_shouldMatch() {
    assert!(language_utils::language_codes_match("fr", "fra"));
    assert!(language_utils::language_codes_match("fre", "fr-CA"));
    assert!(language_utils::language_codes_match("pt_BR", "por"));
    assert!(!language_utils::language_codes_match("fr", "de"));
    assert!(!language_utils::language_codes_match("xx", "xx"));
}

/// Test language names
#[test]
fn test_getLanguageName_shouldReturnEnglishName() -> Result<()> {
    assert_eq!(language_utils::get_language_name("fr")?, "French");
    assert!(language_utils::get_language_name("").is_err());
    Ok(())
}
