//! Integration tests for shelter lookup and actions.
//!
//! Run with: `cargo test --test shelter_integration`

use std::io::Write;
use std::sync::Arc;

use shelterwatch::actions::{LaunchError, RecordingLauncher, ShelterActions};
use shelterwatch::geo::{GeoFix, DEFAULT_ORIGIN};
use shelterwatch::location::ScriptedLocationSource;
use shelterwatch::shelter::{
    rank, JsonFileDirectory, NearbyShelters, ShelterDirectory, ShelterKind, StaticDirectory,
    DEFAULT_RANK_LIMIT,
};

#[test]
fn test_gimhae_ranking_from_city_centre() {
    let shelters = StaticDirectory::gimhae().shelters().unwrap();
    let ranked = rank(&DEFAULT_ORIGIN, &shelters, DEFAULT_RANK_LIMIT);

    assert_eq!(ranked.len(), 8);
    assert_eq!(ranked.first().unwrap().shelter.name, "김해시 체육관");
    assert_eq!(ranked.first().unwrap().distance_km, 0.0);
    assert_eq!(ranked.last().unwrap().shelter.name, "진영읍사무소");

    let rows: Vec<(u32, String)> = ranked
        .iter()
        .map(|r| (r.shelter.id, r.formatted_distance()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "0m".to_string()),
            (3, "218m".to_string()),
            (6, "535m".to_string()),
            (8, "562m".to_string()),
            (4, "3.8km".to_string()),
            (7, "4.8km".to_string()),
            (2, "8.9km".to_string()),
            (5, "14.8km".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_nearby_from_json_dataset() {
    let dataset = r#"[
        {"id": 1, "name": "북쪽 대피소", "address": "a", "latitude": 35.30, "longitude": 128.89,
         "capacity": 100, "type": "체육관", "contact": "055-000-0001", "facilities": ["화장실"]},
        {"id": 2, "name": "가까운 대피소", "address": "b", "latitude": 35.234, "longitude": 128.89,
         "capacity": 50, "type": "주민센터", "contact": "055-000-0002"}
    ]"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(dataset.as_bytes()).unwrap();

    let here = GeoFix::new(35.233596, 128.889544).unwrap();
    let source = Arc::new(ScriptedLocationSource::default().with_one_shot(Ok(here)));
    let nearby = NearbyShelters::new(source, JsonFileDirectory::new(file.path()));

    let ranked = nearby.find(None).await.unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].shelter.name, "가까운 대피소");
    assert_eq!(
        ranked[0].shelter.kind,
        ShelterKind::Other("주민센터".to_string())
    );
    assert_eq!(ranked[1].shelter.kind, ShelterKind::Gymnasium);
}

#[test]
fn test_call_and_route_with_fallback() {
    let shelters = StaticDirectory::gimhae().into_shelters();
    let jinyeong = shelters.iter().find(|s| s.id == 5).unwrap();

    let phone_only = RecordingLauncher::new(["tel", "maps"]);
    let actions = ShelterActions::new(phone_only.clone());

    assert_eq!(actions.call(jinyeong).unwrap(), "tel:055-330-4000");
    assert_eq!(
        actions.navigate(Some(&DEFAULT_ORIGIN), jinyeong).unwrap(),
        "maps:35.310245,128.756892"
    );
    assert_eq!(phone_only.opened().len(), 2);

    let nothing = ShelterActions::new(RecordingLauncher::new(Vec::<String>::new()));
    let err = nothing.call(jinyeong).unwrap_err();
    assert!(matches!(err, LaunchError::ExternalLaunchUnsupported { .. }));
    assert_eq!(err.user_notice(), "Phone calls are unavailable.");
}
