//! Reproducibility contract for the daily challenge: same date, same pool,
//! byte-identical pairs, wherever and whenever it is computed.

use tagdle::daily::{self, FileChallengeStore, PairingConfig, generate_pairs};
use tagdle::domain::{Category, Dataset, RankedTag, TagRecord};

fn pool(counts: &[u64]) -> Vec<RankedTag> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            RankedTag::from(TagRecord::new(format!("tag_{i}"), Category::General, count))
        })
        .collect()
}

fn dataset(counts: &[u64]) -> Dataset {
    Dataset {
        generation_date: "2024-05-31".to_string(),
        tags: pool(counts),
    }
}

#[test]
fn documented_scenario_matches_reference_run() {
    // Only {100, 150, 95} are mutually within the bound, so the pool admits a
    // single pair; the reference run of the pinned sampler picks (tag_1,
    // tag_0) for this seed and forfeits the rest.
    let pool = pool(&[100, 150, 90_000, 95, 200_000]);
    let config = PairingConfig {
        max_rounds: 2,
        max_count_difference: 40_000,
    };

    let pairs = generate_pairs(&pool, "2024-01-01", &config);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.name, "tag_1");
    assert_eq!(pairs[0].1.name, "tag_0");

    let distinct: std::collections::HashSet<_> = pairs
        .iter()
        .flat_map(|(a, b)| [a.name.as_str(), b.name.as_str()])
        .collect();
    assert!(distinct.len() <= 4);
    for (a, b) in &pairs {
        assert!(a.count.abs_diff(b.count) < config.max_count_difference);
    }
}

#[tokio::test]
async fn independent_stores_produce_byte_identical_challenges() {
    // Two stores simulate two deployments answering the same date.
    let counts: Vec<u64> = (0..60).map(|i| 5_000 + i * 250).collect();
    let data = dataset(&counts);
    let config = PairingConfig::default();

    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let store_a = FileChallengeStore::new(dir_a.path());
    let store_b = FileChallengeStore::new(dir_b.path());

    let challenge_a = daily::fetch_or_generate(&store_a, &data, "2024-06-01", &config)
        .await
        .unwrap();
    let challenge_b = daily::fetch_or_generate(&store_b, &data, "2024-06-01", &config)
        .await
        .unwrap();

    let bytes_a = serde_json::to_vec(&challenge_a).unwrap();
    let bytes_b = serde_json::to_vec(&challenge_b).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[tokio::test]
async fn challenge_invariants_hold_over_a_full_board() {
    let counts: Vec<u64> = (0..120).map(|i| (i * 997) % 80_000).collect();
    let data = dataset(&counts);
    let config = PairingConfig::default();

    let dir = tempfile::tempdir().unwrap();
    let store = FileChallengeStore::new(dir.path());
    let challenge = daily::fetch_or_generate(&store, &data, "2024-07-14", &config)
        .await
        .unwrap();

    assert_eq!(challenge.data_date, "2024-05-31");
    assert!(challenge.pairs.len() <= config.max_rounds);

    let mut used = std::collections::HashSet::new();
    for (a, b) in &challenge.pairs {
        assert_ne!(a.name, b.name);
        assert!(a.count.abs_diff(b.count) < config.max_count_difference);
        assert!(used.insert(a.name.clone()), "tag {} reused", a.name);
        assert!(used.insert(b.name.clone()), "tag {} reused", b.name);
    }
}

#[test]
fn tiny_pools_degrade_gracefully() {
    let config = PairingConfig::default();

    // Fewer than 2*max_rounds tags: short sequence, no error.
    let pairs = generate_pairs(&pool(&[100, 120, 140]), "2024-06-01", &config);
    assert!(pairs.len() <= 1);

    assert!(generate_pairs(&pool(&[]), "2024-06-01", &config).is_empty());
    assert!(generate_pairs(&pool(&[42]), "2024-06-01", &config).is_empty());
}
