//! Integration test: Learning progress persistence
//!
//! Progress is applied through the reducer, saved as camelCase JSON and
//! read back with bounds re-applied.

use houseedge::progress::{ProgressLevel, ProgressUpdate, UserProgress};
use houseedge::utils::{load_or_default, JsonFileStore, StateStore};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("houseedge-progress-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_progress_survives_save_and_load() {
    let path = temp_path("saved.json");
    let store = JsonFileStore::new(&path);

    let mut progress = UserProgress::default();
    progress.apply(ProgressUpdate::ArticleRead { id: "odds".into() });
    progress.apply(ProgressUpdate::ArticleRead { id: "rtp".into() });
    progress.apply(ProgressUpdate::QuizTaken);
    progress.apply(ProgressUpdate::CalculatorUsed);
    store.save(&progress).unwrap();

    let loaded: UserProgress = load_or_default(&store);
    assert_eq!(loaded, progress);
    assert_eq!(loaded.points(), 55);
    assert_eq!(loaded.level(), ProgressLevel::Intermediate);

    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"articlesRead\": 2"));
    assert!(json.contains("\"calculatorUsed\": true"));

    fs::remove_file(path).ok();
}

#[test]
fn test_hand_edited_save_is_clamped() {
    let path = temp_path("edited.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{ "articlesRead": 5000, "quizzesTaken": 3 }"#).unwrap();

    let store: JsonFileStore<UserProgress> = JsonFileStore::new(&path);
    let progress = load_or_default(&store).normalized();
    assert_eq!(progress.articles_read, 100);
    assert_eq!(progress.quizzes_taken, 3);
    assert!(!progress.simulator_completed);
    assert!(progress.read_articles.is_empty());

    fs::remove_file(path).ok();
}

#[test]
fn test_missing_save_starts_fresh() {
    let store: JsonFileStore<UserProgress> = JsonFileStore::new(temp_path("never-written.json"));
    let progress = load_or_default(&store);
    assert_eq!(progress, UserProgress::default());
    assert_eq!(progress.level(), ProgressLevel::Newbie);
}

#[test]
fn test_reset_clears_saved_progress() {
    let path = temp_path("reset.json");
    let store = JsonFileStore::new(&path);

    let mut progress = UserProgress::default();
    progress.apply(ProgressUpdate::SimulatorCompleted);
    store.save(&progress).unwrap();

    let mut loaded: UserProgress = load_or_default(&store);
    assert!(loaded.apply(ProgressUpdate::Reset));
    store.save(&loaded).unwrap();

    assert_eq!(load_or_default(&store), UserProgress::default());
    fs::remove_file(path).ok();
}
