use pcitab_emitter::{NameFilter, emit};
use pcitab_ids::Hierarchy;
use proptest::prelude::*;
use std::fmt::Write;

const WORDS: &[&str] = &["GeForce", "Quadro", "Radeon", "UHD", "Iris", "Audio", "Bridge", "GPU"];

fn database() -> impl Strategy<Value = String> {
    proptest::collection::btree_map(
        "[0-9a-f]{4}",
        proptest::collection::vec(proptest::sample::select(WORDS), 1..4),
        0..12,
    )
    .prop_map(|devices| {
        let mut db = String::from("10de  Vendor\n");
        for (id, words) in devices {
            writeln!(db, "\t{id}  {}", words.join(" ")).unwrap();
        }
        db
    })
}

fn filters() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(WORDS, 0..=WORDS.len())
}

proptest! {
    #[test]
    fn widening_filters_never_loses_devices(db in database(), narrow in filters(), extra in filters()) {
        let hierarchy = Hierarchy::parse(&db).unwrap();
        let vendor = hierarchy.vendor("10de").unwrap();

        let mut wide = narrow.clone();
        wide.extend(extra);

        let narrow = emit(vendor, &NameFilter::new(narrow), &mut std::io::sink()).unwrap();
        let wide = emit(vendor, &NameFilter::new(wide), &mut std::io::sink()).unwrap();
        prop_assert!(wide.devices >= narrow.devices);
    }

    #[test]
    fn emitted_count_matches_filter(db in database(), patterns in filters()) {
        let hierarchy = Hierarchy::parse(&db).unwrap();
        let vendor = hierarchy.vendor("10de").unwrap();
        let filter = NameFilter::new(patterns);

        let mut out = Vec::new();
        let summary = emit(vendor, &filter, &mut out).unwrap();
        let expected = vendor.devices().iter().filter(|d| filter.matches(d.name())).count();

        prop_assert_eq!(summary.devices, expected);
        prop_assert_eq!(String::from_utf8(out).unwrap().matches("}}},").count(), expected);
    }
}
