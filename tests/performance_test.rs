//! Performance tests for attack-search
//!
//! The full enterprise bundle holds roughly 20k objects. A search over a
//! synthetic bundle of that size has to stay interactive.

use attack::{search, AttackObject, ExternalReference};
use std::time::Instant;

fn synthetic_objects(count: usize) -> Vec<AttackObject> {
    (0..count)
        .map(|i| AttackObject {
            id: format!("attack-pattern--{:08}", i),
            kind: if i % 3 == 0 { "relationship" } else { "attack-pattern" }.to_string(),
            name: (i % 3 != 0).then(|| format!("Technique {} Variant {}", i, i % 17)),
            external_references: vec![
                ExternalReference {
                    source_name: "mitre-attack".to_string(),
                    url: Some(format!("https://attack.mitre.org/techniques/T{}", i)),
                    external_id: Some(format!("T{}", i)),
                    ..Default::default()
                },
                ExternalReference {
                    source_name: "capec".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        })
        .collect()
}

#[test]
fn test_search_large_bundle_performance() {
    let objects = synthetic_objects(25_000);

    let start = Instant::now();
    let results = search("variant 1[0-6]$", &objects).unwrap();
    let elapsed = start.elapsed();

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.url.starts_with("https://attack.mitre.org/techniques/T")));
    assert!(
        elapsed.as_secs() < 2,
        "Search over 25k objects took {:?}, expected < 2s",
        elapsed
    );
}

#[test]
fn test_broad_search_large_bundle_performance() {
    let objects = synthetic_objects(25_000);

    let start = Instant::now();
    let results = search("technique", &objects).unwrap();
    let elapsed = start.elapsed();

    // Two thirds of the objects are named, one canonical reference each
    assert_eq!(results.len(), objects.iter().filter(|o| o.name.is_some()).count());
    assert!(
        elapsed.as_secs() < 3,
        "Broad search over 25k objects took {:?}, expected < 3s",
        elapsed
    );
}
