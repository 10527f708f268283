use std::fs;
use std::path::Path;
use tempfile::tempdir;

use dupe_report_core::config::StorageConfig;
use dupe_report_core::hasher::hash_data;
use dupe_report_core::storage::FilesystemStorages;
use dupe_report_core::{AnalysisEngine, OutboxNotifier, Recipient, SilentReporter};

/// Layout:
///   root/
///     folder_a/
///       unique_a.txt     ("unique content a")
///       shared.txt       ("shared content xyz")
///     folder_b/
///       unique_b.txt     ("unique content b")
///       shared.txt       ("shared content xyz")  <- duplicate of folder_a/shared.txt
///     folder_c/
///       large_dup_1.bin  (4KB of 0xAA)
///       large_dup_2.bin  (4KB of 0xAA)            <- duplicate within same folder
///     _processed_/
///       thumb.bin        (4KB of 0xAA)            <- ignored
fn create_test_tree(root: &Path) {
    let folder_a = root.join("folder_a");
    let folder_b = root.join("folder_b");
    let folder_c = root.join("folder_c");
    let processed = root.join("_processed_");
    for dir in [&folder_a, &folder_b, &folder_c, &processed] {
        fs::create_dir_all(dir).unwrap();
    }

    fs::write(folder_a.join("unique_a.txt"), "unique content a").unwrap();
    fs::write(folder_b.join("unique_b.txt"), "unique content b").unwrap();

    fs::write(folder_a.join("shared.txt"), "shared content xyz").unwrap();
    fs::write(folder_b.join("shared.txt"), "shared content xyz").unwrap();

    let large_content = vec![0xAAu8; 4096];
    fs::write(folder_c.join("large_dup_1.bin"), &large_content).unwrap();
    fs::write(folder_c.join("large_dup_2.bin"), &large_content).unwrap();
    fs::write(processed.join("thumb.bin"), &large_content).unwrap();
}

fn storage(uid: u32, name: &str, root: &Path) -> StorageConfig {
    StorageConfig {
        uid,
        name: name.to_string(),
        root: root.to_path_buf(),
        online: true,
        ignore_patterns: vec!["**/_processed_".to_string()],
    }
}

#[test]
fn test_full_pipeline_writes_report_to_outbox() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("fileadmin");
    create_test_tree(&root);
    let clean_root = tmp.path().join("uploads");
    fs::create_dir_all(&clean_root).unwrap();
    fs::write(clean_root.join("only.txt"), "only").unwrap();

    let storages = FilesystemStorages::new(vec![
        storage(1, "fileadmin", &root),
        storage(2, "uploads", &clean_root),
        storage(3, "remote", &tmp.path().join("not-mounted")),
    ]);
    let outbox = tmp.path().join("outbox");
    let notifier = OutboxNotifier::new(&outbox)
        .with_sender(Some(Recipient::new("noreply@example.org", "")));
    let mut console = Vec::new();

    let result = AnalysisEngine::new(&storages, &storages, &notifier)
        .with_recipient(Some(Recipient::new("admin@example.org", "Admin")))
        .analyse(&mut console, &SilentReporter)
        .unwrap();

    assert_eq!(result.storages_scanned, 2);
    assert_eq!(result.storages_offline, 1);
    assert_eq!(result.files_scanned, 7);
    assert_eq!(result.duplicate_groups, 2);
    assert_eq!(result.duplicate_files, 4);

    let shared = hash_data(b"shared content xyz");
    let large = hash_data(&[0xAAu8; 4096]);
    assert!(result.report.contains(&format!(
        "* identifiers \"/folder_a/shared.txt,/folder_b/shared.txt\" having same hash {}",
        shared
    )));
    assert!(result.report.contains(&format!(
        "* identifiers \"/folder_c/large_dup_1.bin,/folder_c/large_dup_2.bin\" having same hash {}",
        large
    )));
    assert!(!result.report.contains("_processed_"));
    assert!(result.report.contains("remote (3): storage is offline!"));

    let messages: Vec<_> = fs::read_dir(&outbox).unwrap().collect();
    assert_eq!(messages.len(), 1);
    let message = fs::read_to_string(messages[0].as_ref().unwrap().path()).unwrap();
    assert!(message.contains("To: \"Admin\" <admin@example.org>"));
    assert!(message.contains("folder_a/shared.txt"));

    let output = String::from_utf8(console).unwrap();
    assert!(output.contains("Report was sent to admin@example.org"));
}

#[test]
fn test_clean_tree_sends_nothing() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("clean");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("b.txt"), "b").unwrap();

    let storages = FilesystemStorages::new(vec![storage(1, "clean", &root)]);
    let outbox = tmp.path().join("outbox");
    let notifier = OutboxNotifier::new(&outbox);

    let result = AnalysisEngine::new(&storages, &storages, &notifier)
        .with_recipient(Some(Recipient::new("admin@example.org", "")))
        .analyse(&mut Vec::new(), &SilentReporter)
        .unwrap();

    assert!(!result.has_findings());
    assert!(result.notified.is_none());
    assert!(!outbox.exists());
}

#[test]
fn test_invalid_recipient_fails_after_printing() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("dupes");
    create_test_tree(&root);

    let storages = FilesystemStorages::new(vec![storage(1, "dupes", &root)]);
    let notifier = OutboxNotifier::new(tmp.path().join("outbox"));
    let mut console = Vec::new();

    let err = AnalysisEngine::new(&storages, &storages, &notifier)
        .with_recipient(Some(Recipient::new("not-an-address", "")))
        .analyse(&mut console, &SilentReporter)
        .unwrap_err();

    assert!(matches!(
        err,
        dupe_report_core::Error::NotificationDeliveryFailed {
            source: Some(dupe_report_core::NotifyError::InvalidAddress(_)),
            ..
        }
    ));
    let output = String::from_utf8(console).unwrap();
    assert!(output.contains("Duplicated identifiers detected:"));
}
