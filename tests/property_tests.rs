use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tempfile::TempDir;

use dupescan::duplicates::{group_by_size, DuplicateFinder, FinderConfig};
use dupescan::scanner::{FileEntry, Hasher, WalkerConfig};

proptest! {
    #[test]
    fn test_hash_determinism(content in "\\PC*") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.bin");
        fs::write(&path, content.as_bytes()).unwrap();

        let hasher = Hasher::new();
        let hash1 = hasher.hash_file(&path).unwrap();
        let hash2 = hasher.hash_file(&path).unwrap();

        prop_assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_is_pure_function_of_content(content in "\\PC*") {
        let dir = TempDir::new().unwrap();
        let path1 = dir.path().join("name-one.aaa");
        let path2 = dir.path().join("completely-different-name.zzz");
        fs::write(&path1, content.as_bytes()).unwrap();
        fs::write(&path2, content.as_bytes()).unwrap();

        let hasher = Hasher::new();
        prop_assert_eq!(
            hasher.hash_file(&path1).unwrap(),
            hasher.hash_file(&path2).unwrap()
        );
    }

    #[test]
    fn test_group_by_size_invariants(sizes in prop::collection::vec(0u64..1000, 0..50)) {
        let entries: Vec<FileEntry> = sizes.iter().enumerate().map(|(i, &size)| {
            FileEntry::new(
                PathBuf::from(format!("/fake/path/{}", i)),
                size,
                SystemTime::now()
            )
        }).collect();

        let (groups, stats) = group_by_size(entries.clone());

        // Invariant: All files in a group must have the same size
        for (size, files) in &groups {
            for file in files {
                prop_assert_eq!(file.size, *size);
            }
            // Invariant: Each group must have at least 2 files
            prop_assert!(files.len() >= 2);
        }

        // Invariant: total_files = input size
        prop_assert_eq!(stats.total_files, entries.len());

        // Invariant: potential_duplicates = sum of files in all groups
        let sum_files: usize = groups.values().map(|v| v.len()).sum();
        prop_assert_eq!(stats.potential_duplicates, sum_files);
    }

    #[test]
    fn test_identical_content_always_ends_up_in_one_set(
        content in prop::collection::vec(any::<u8>(), 1..512),
        copies in 2usize..5,
    ) {
        let dir = TempDir::new().unwrap();
        for i in 0..copies {
            fs::write(dir.path().join(format!("copy-{i}.bin")), &content).unwrap();
        }

        let config = FinderConfig::default().with_walker_config(WalkerConfig {
            recursive: true,
            ..Default::default()
        });
        let (groups, summary) = DuplicateFinder::new(config)
            .find_duplicates(dir.path())
            .unwrap();

        prop_assert_eq!(groups.len(), 1);
        prop_assert_eq!(groups[0].len(), copies);
        prop_assert_eq!(summary.wasted_bytes, (copies as u64 - 1) * content.len() as u64);
    }

    #[test]
    fn test_wasted_bytes_formula_holds(sizes in prop::collection::vec(1u64..100, 1..20)) {
        let entries: Vec<FileEntry> = sizes.iter().enumerate().flat_map(|(i, &size)| {
            // Two entries per size guarantee every bucket survives pruning
            vec![
                FileEntry::new(PathBuf::from(format!("/a/{i}")), size, SystemTime::now()),
                FileEntry::new(PathBuf::from(format!("/b/{i}")), size, SystemTime::now()),
            ]
        }).collect();

        let (groups, _) = group_by_size(entries);

        for (size, files) in &groups {
            let expected_waste = size * (files.len() as u64 - 1);
            let group = dupescan::duplicates::DuplicateGroup::new_unverified(*size, files.clone());
            prop_assert_eq!(group.wasted_space(), expected_waste);
        }
    }
}
