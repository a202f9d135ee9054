// Content table invariants. Native-friendly: no wasm/browser APIs touched.

use std::collections::HashSet;

use cosmic_arcade::audio::{NOTES, note_frequency};
use cosmic_arcade::{ANIMALS, SPACE_SYMBOLS};

#[test]
fn animals_are_unique_and_nonempty() {
    let mut seen = HashSet::new();
    for a in ANIMALS {
        assert!(!a.is_empty());
        assert!(seen.insert(*a), "duplicate animal '{}'", a);
    }
    // shatter needs at least two to guarantee a visible change
    assert!(ANIMALS.len() >= 2);
}

#[test]
fn space_symbols_are_unique() {
    let unique: HashSet<&str> = SPACE_SYMBOLS.iter().copied().collect();
    assert_eq!(unique.len(), SPACE_SYMBOLS.len());
    assert_eq!(SPACE_SYMBOLS.len(), 8);
}

#[test]
fn note_table_covers_one_octave() {
    let names: Vec<&str> = NOTES.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"]);
    let c4 = note_frequency("C4").unwrap();
    let c5 = note_frequency("C5").unwrap();
    assert!((c5 / c4 - 2.0).abs() < 0.01, "C5 should be an octave above C4");
}
