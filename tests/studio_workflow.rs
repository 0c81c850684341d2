use serde_json::{json, Value};
use std::path::Path;
use webweaver_studio::domain::{ManagedDirectory, SolutionLoadError};
use webweaver_studio::storage::{ensure_directory_structure, load_solution, missing_directories, RecordingStore};
use webweaver_studio::{
    RecentSolutions, RecordingEventType, RecordingSession, RecordingToggle, Solution, Studio,
    StudioError, StudioState,
};

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn demo_solution_records_a_click() {
    let base = tempfile::tempdir().unwrap();
    let solution = Solution::new("Demo", base.path(), true, "https://example.com", "firefox");

    ensure_directory_structure(&solution).unwrap();
    for sub in ["pages", "scripts", "recordings"] {
        assert!(base.path().join("Demo").join(sub).is_dir(), "{sub}");
    }
    ensure_directory_structure(&solution).unwrap();
    assert!(missing_directories(&solution).is_empty());

    let mut session = RecordingSession::new(solution);
    let metadata = session.start("Run1").unwrap();

    assert_eq!(metadata.file_path.parent(), Some(base.path().join("Demo/recordings").as_path()));
    assert!(metadata
        .file_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("Run1_") && n.ends_with(".wwrec")));
    assert_eq!(read_json(&metadata.file_path)["recording"]["events"], json!([]));

    session
        .append_event(RecordingEventType::DomClick, json!({"selector": "#btn"}))
        .unwrap();
    let doc = read_json(&metadata.file_path);
    assert_eq!(doc["recording"]["events"].as_array().unwrap().len(), 1);
    assert_eq!(doc["recording"]["events"][0]["index"], 0);
    assert_eq!(doc["recording"]["events"][0]["payload"]["selector"], "#btn");

    session.stop().unwrap();
    let doc = read_json(&metadata.file_path);
    assert_eq!(doc["recording"]["events"].as_array().unwrap().len(), 1);
}

#[test]
fn n_events_are_persisted_in_order() {
    let base = tempfile::tempdir().unwrap();
    let mut session = RecordingSession::new(Solution::new(
        "Demo",
        base.path(),
        false,
        "https://example.com",
        "chromium",
    ));
    let metadata = session.start("Burst").unwrap();

    let kinds = [
        RecordingEventType::NavGoto,
        RecordingEventType::DomClick,
        RecordingEventType::DomType,
        RecordingEventType::Wait,
    ];
    for i in 0..23 {
        session
            .append_event(kinds[i % kinds.len()], json!({"step": i}))
            .unwrap();
    }
    session.stop().unwrap();

    let doc = read_json(&metadata.file_path);
    let events = doc["recording"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 23);
    let indices: Vec<u64> = events.iter().map(|e| e["index"].as_u64().unwrap()).collect();
    assert_eq!(indices, (0..23).collect::<Vec<u64>>());
    let timestamps: Vec<u64> = events.iter().map(|e| e["timestamp"].as_u64().unwrap()).collect();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn corrupt_recording_is_reported_not_fatal() {
    let base = tempfile::tempdir().unwrap();
    let solution = Solution::new("Demo", base.path(), true, "https://example.com", "firefox");
    let mut session = RecordingSession::new(solution.clone());
    let good = session.start("Good").unwrap();
    session.stop().unwrap();

    let corrupt = solution.recordings_path().join("Broken_20250101T000000Z.wwrec");
    std::fs::write(&corrupt, "{\"version\": 1, \"recording\": {\"id\": \"x\"").unwrap();

    let discovery = RecordingStore::for_solution(&solution).discover().unwrap();

    assert_eq!(discovery.recordings, vec![good]);
    assert_eq!(discovery.failures.len(), 1);
    assert_eq!(discovery.failures[0].path, corrupt);
}

#[test]
fn studio_round_trip_through_recent_solutions() {
    let base = tempfile::tempdir().unwrap();
    let recent_file = base.path().join("config/recent_solutions.json");

    let solution_file = {
        let mut studio = Studio::new(RecentSolutions::load(&recent_file));
        let file = studio
            .create_solution(Solution::new("Demo", base.path(), true, "https://example.com", "edge"))
            .unwrap();

        let RecordingToggle::Started(recording) = studio.toggle_recording().unwrap() else {
            panic!("expected a started recording");
        };
        studio
            .record_event(RecordingEventType::NavGoto, json!({"url": "https://example.com/"}))
            .unwrap();
        studio.close_solution().unwrap();
        assert!(recording.file_path.is_file());
        file
    };

    let mut studio = Studio::new(RecentSolutions::load(&recent_file));
    assert_eq!(studio.recent().entries(), &[solution_file.clone()]);

    let most_recent = studio.recent().entries()[0].clone();
    let reopened = studio.open_solution(&most_recent).unwrap().clone();
    assert_eq!(reopened, load_solution(&solution_file).unwrap());
    assert_eq!(studio.state(), StudioState::SolutionLoaded);

    let discovery = studio.recordings().unwrap();
    assert_eq!(discovery.recordings.len(), 1);
    let renamed = studio
        .rename_recording(&discovery.recordings[0], "Landing page")
        .unwrap();
    assert_eq!(studio.recordings().unwrap().recordings, vec![renamed]);
}

#[test]
fn directory_failure_names_the_directory() {
    let base = tempfile::tempdir().unwrap();
    let solution = Solution::new("Demo", base.path(), true, "https://example.com", "firefox");
    std::fs::create_dir_all(solution.effective_root()).unwrap();
    std::fs::write(solution.pages_path(), "not a directory").unwrap();

    let err = ensure_directory_structure(&solution).unwrap_err();
    assert_eq!(err.directory, ManagedDirectory::Pages);

    let mut studio = Studio::new(RecentSolutions::new(base.path().join("recent.json")));
    assert!(matches!(
        studio.create_solution(solution),
        Err(StudioError::Directory(_))
    ));
    assert_eq!(studio.state(), StudioState::NoSolution);
}

#[test]
fn unsupported_solution_version_is_typed() {
    let base = tempfile::tempdir().unwrap();
    let path = base.path().join("Future.wws");
    std::fs::write(
        &path,
        r#"{"version": 2, "solution": {"solutionName": "Future"}}"#,
    )
    .unwrap();

    let mut studio = Studio::new(RecentSolutions::new(base.path().join("recent.json")));
    assert!(matches!(
        studio.open_solution(&path),
        Err(StudioError::Solution(SolutionLoadError::UnsupportedVersion { found: 2 }))
    ));
    assert!(studio.recent().entries().is_empty());
}
