/*!
 * Integration tests for saving a tree to disk and loading it back
 */

use std::fs;

use tempfile::tempdir;

use vfsh::{load_tree, Config, Explorer, TreeWriter};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn test_save_then_load_round_trip() {
    let temp_dir = tempdir().unwrap();
    let config = config_in(temp_dir.path());

    let mut explorer = Explorer::new(&config);
    explorer.initialize();
    explorer.navigate("Desktop").unwrap();
    explorer.write_file("name", "edited\n").unwrap();

    let writer = TreeWriter::new(config.clone());
    let lines = explorer
        .save_hierarchy(&mut writer.hierarchy_sink().unwrap())
        .unwrap();
    let report = explorer.save_all_files(&mut writer.content_sink());
    assert!(report.is_complete());
    assert_eq!(report.saved.len(), 4);

    let hierarchy = fs::read_to_string(temp_dir.path().join("hierarchy.txt")).unwrap();
    assert_eq!(hierarchy.lines().count(), lines);
    assert!(hierarchy.starts_with("📁 root\n  📁 Desktop\n    📄 name.txt\n"));

    let on_disk = temp_dir.path().join("root").join("Desktop").join("name.txt");
    assert_eq!(fs::read_to_string(on_disk).unwrap(), "edited\n");

    let loaded = load_tree(&config, &temp_dir.path().join("root")).unwrap();
    let reloaded = Explorer::with_tree(loaded, &config);
    let mut before = Vec::new();
    let mut after = Vec::new();
    explorer.save_hierarchy(&mut before).unwrap();
    reloaded.save_hierarchy(&mut after).unwrap();
    assert_eq!(before, after);

    let cpp = reloaded
        .tree()
        .resolve(&["Documents"])
        .unwrap()
        .find_item("hello.cpp")
        .unwrap();
    assert_eq!(cpp.full_path(), "root\\Documents\\hello");
    assert!(cpp.as_file().unwrap().content.contains("Hello, World!"));
}

#[test]
fn test_hierarchy_file_goes_to_absolute_path() {
    let temp_dir = tempdir().unwrap();
    let listing = temp_dir.path().join("listings").join("tree.txt");
    let config = Config {
        hierarchy_file: listing.clone(),
        ..config_in(&temp_dir.path().join("data"))
    };

    let explorer = Explorer::new(&config);
    let writer = TreeWriter::new(config);
    let lines = explorer
        .save_hierarchy(&mut writer.hierarchy_sink().unwrap())
        .unwrap();

    assert_eq!(lines, 1);
    assert_eq!(fs::read_to_string(listing).unwrap(), "📁 root\n");
}

#[test]
fn test_load_missing_directory() {
    let temp_dir = tempdir().unwrap();
    let err = load_tree(&Config::default(), &temp_dir.path().join("absent")).unwrap_err();
    assert_eq!(err.kind(), vfsh::ErrorKind::NotFound);
}
