use movie_collection::domain::model::{Color, MovieGenre, MpaaRating};
use movie_collection::{
    default_registry, CollectionError, CollectionManager, DumpManager, LocalStorage, Runner,
    RunnerOptions, StandardConsole,
};
use std::io::Cursor;
use tempfile::TempDir;

// Layout of a collection file as written by `save` (pretty JSON, camelCase keys).
const COLLECTION_JSON: &str = r#"
[
  {
    "id": 3,
    "name": "Heat",
    "coordinates": {
      "x": 10,
      "y": 20
    },
    "creationDate": "2024-01-31",
    "oscarsCount": 2,
    "genre": "THRILLER",
    "mpaaRating": "PG_13",
    "screenwriter": {
      "name": "Mann",
      "height": 182.5,
      "eyeColor": "BLUE",
      "location": {
        "x": 1.5,
        "y": 2,
        "z": 3,
        "name": "LA"
      }
    }
  },
  {
    "id": 1,
    "name": "Ran",
    "coordinates": {
      "x": -4,
      "y": 0
    },
    "creationDate": "2023-12-01",
    "oscarsCount": 1,
    "genre": "ACTION",
    "mpaaRating": "R",
    "screenwriter": null
  }
]
"#;

fn manager_for(temp_dir: &TempDir, file_name: &str) -> CollectionManager {
    let path = temp_dir.path().join(file_name);
    CollectionManager::new(DumpManager::new(LocalStorage::new("."), path))
}

#[test]
fn test_load_existing_collection_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("collection.json"), COLLECTION_JSON).unwrap();

    let mut manager = manager_for(&temp_dir, "collection.json");
    assert_eq!(manager.load_collection().unwrap(), 2);

    // sorted by oscars count first
    let first = &manager.movies()[0];
    assert_eq!(first.name, "Ran");
    assert!(first.screenwriter.is_none());
    assert_eq!(first.mpaa_rating, MpaaRating::R);

    let heat = manager.get_by_id(3).unwrap();
    assert_eq!(heat.genre, MovieGenre::Thriller);
    assert_eq!(heat.creation_date.to_string(), "2024-01-31");
    assert_eq!(heat.screenwriter.as_ref().unwrap().eye_color, Color::Blue);

    assert_eq!(manager.free_id(), 4);
}

#[test]
fn test_missing_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = manager_for(&temp_dir, "absent.json");

    let err = manager.load_collection().unwrap_err();
    assert!(matches!(err, CollectionError::FileNotFound { .. }));
    assert!(manager.is_empty());
    assert!(manager.last_init_time().is_some());
}

#[test]
fn test_invalid_json_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("broken.json"), "[{\"id\": 1}]").unwrap();

    let mut manager = manager_for(&temp_dir, "broken.json");
    let err = manager.load_collection().unwrap_err();
    assert!(matches!(err, CollectionError::SerializationError(_)));
    assert!(err.recovery_suggestion().contains("[]"));
}

#[test]
fn test_save_command_writes_file_that_reloads() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("collection.json"), COLLECTION_JSON).unwrap();

    let mut manager = manager_for(&temp_dir, "collection.json");
    manager.load_collection().unwrap();
    let before = manager.movies().to_vec();

    let console = StandardConsole::new(Cursor::new(Vec::new()), Vec::new(), Vec::new());
    let mut runner = Runner::new(console, manager, default_registry(), RunnerOptions::default());

    assert!(runner.run_line("remove_by_id 1").success);
    let response = runner.run_line("save");
    assert!(response.success, "{}", response.message);
    assert!(runner.collection().last_save_time().is_some());

    let written = std::fs::read_to_string(temp_dir.path().join("collection.json")).unwrap();
    assert!(written.contains("\"creationDate\": \"2024-01-31\""));
    assert!(!written.contains("\"Ran\""));

    let mut reloaded = manager_for(&temp_dir, "collection.json");
    assert_eq!(reloaded.load_collection().unwrap(), 1);
    assert_eq!(reloaded.movies()[0], before[1]);
}

#[test]
fn test_info_reports_counts_and_times() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("collection.json"), COLLECTION_JSON).unwrap();

    let mut manager = manager_for(&temp_dir, "collection.json");
    manager.load_collection().unwrap();

    let console = StandardConsole::new(Cursor::new(Vec::new()), Vec::new(), Vec::new());
    let mut runner = Runner::new(console, manager, default_registry(), RunnerOptions::default());

    let info = runner.run_line("info").message;
    assert!(info.contains("Number of elements: 2"));
    assert!(info.contains("Last save time: not saved in this session"));
    assert!(!info.contains("Initialization time: not loaded"));

    assert_eq!(runner.run_line("sum_of_oscar_count").message, "Sum of oscarsCount: 3");

    let descending = runner.run_line("print_descending").message;
    let heat = descending.find("name='Heat'").unwrap();
    let ran = descending.find("name='Ran'").unwrap();
    assert!(heat < ran);
}
