//! Lexicon extension files and injected lexicons

use leadscan_common::ExtractionConfig;
use leadscan_exec::{ExecutiveDiscovery, Lexicon, PageText};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

#[test]
fn test_load_extensions_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"surnames = ["Trevithick"]"#).unwrap();
    writeln!(file, r#"exclusions = ["gas safe"]"#).unwrap();

    let lexicon = Lexicon::load_extensions(file.path()).unwrap();
    assert!(lexicon.is_surname("Trevithick"));
    assert!(lexicon.exclusion_hit("Gas Safe").is_some());
    // Built-in entries survive
    assert!(lexicon.is_first_name("James"));
    assert!(lexicon.surname_count() > Lexicon::empty().surname_count());
    assert_eq!(lexicon.first_name_count(), Lexicon::builtin().first_name_count());
}

#[test]
fn test_missing_extension_file_is_error() {
    let result = Lexicon::load_extensions(std::path::Path::new("/nonexistent/leadscan/lexicon.toml"));
    assert!(result.is_err());
}

#[test]
fn test_injected_lexicon_drives_validation() {
    let text = "Kerensa Trevithick, Owner. kerensa@trevithickroofing.co.uk";
    let pages = [PageText::new("about", text)];

    let builtin = ExecutiveDiscovery::with_builtin_lexicon(ExtractionConfig::default()).unwrap();
    let without = builtin.from_pages("Trevithick Roofing", &pages, Vec::new()).unwrap();
    assert!(without.records.is_empty());

    let lexicon = Lexicon::from_toml_str(
        r#"
        first_names = ["Kerensa"]
        surnames = ["Trevithick"]
        "#,
    )
    .unwrap();
    let custom = ExecutiveDiscovery::new(ExtractionConfig::default(), Arc::new(lexicon)).unwrap();
    let with = custom.from_pages("Trevithick Roofing", &pages, Vec::new()).unwrap();
    assert_eq!(with.records.len(), 1);
    assert_eq!(with.records[0].display_name(), "Kerensa Trevithick");
    assert_eq!(with.records[0].title.as_ref().unwrap().value, "Owner");
}
