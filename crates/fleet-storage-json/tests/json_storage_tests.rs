use std::fs;

use chrono::NaiveDate;
use fleet_core::{
    storage::{
        load_snapshot, save_snapshot, SnapshotStore, CURRENT_MILEAGE_KEY, OIL_RECORDS_KEY,
        RENTAL_RECORDS_KEY,
    },
    CoreError,
};
use fleet_domain::{FinancialRecord, MaintenanceRecord, MileageBook, RecordKind, VehicleId};
use fleet_storage_json::JsonSnapshotStore;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn json_store_round_trips_every_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path().join("data")).expect("create store");

    let rentals = vec![
        FinancialRecord::new(
            1_715_760_000_000,
            VehicleId(1),
            RecordKind::Income,
            150.0,
            "Weekly rental",
            date(2024, 5, 15),
        ),
        FinancialRecord::new(
            1_715_760_000_001,
            VehicleId(3),
            RecordKind::Expense,
            42.5,
            "Car wash",
            date(2024, 5, 2),
        ),
    ];
    let changes = vec![MaintenanceRecord::new(
        7,
        VehicleId(2),
        date(2024, 1, 1),
        30_000,
        "5W-30",
    )
    .with_notes("Castrol")];
    let mut mileage = MileageBook::new();
    mileage.set(VehicleId(2), 39_500);

    save_snapshot(&store, RENTAL_RECORDS_KEY, &rentals).expect("save rentals");
    save_snapshot(&store, OIL_RECORDS_KEY, &changes).expect("save changes");
    save_snapshot(&store, CURRENT_MILEAGE_KEY, &mileage).expect("save mileage");

    let loaded_rentals: Vec<FinancialRecord> =
        load_snapshot(&store, RENTAL_RECORDS_KEY).expect("load rentals");
    let loaded_changes: Vec<MaintenanceRecord> =
        load_snapshot(&store, OIL_RECORDS_KEY).expect("load changes");
    let loaded_mileage: MileageBook =
        load_snapshot(&store, CURRENT_MILEAGE_KEY).expect("load mileage");

    assert_eq!(loaded_rentals, rentals);
    assert_eq!(loaded_changes, changes);
    assert_eq!(loaded_mileage, mileage);
    assert_eq!(
        store.keys().expect("keys"),
        vec![
            "carRentalRecords".to_string(),
            "currentMileage".to_string(),
            "oilChangeRecords".to_string(),
        ]
    );
}

#[test]
fn json_store_writes_browser_compatible_documents() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path()).expect("create store");
    let mut mileage = MileageBook::new();
    mileage.set(VehicleId(2), 39_500);

    save_snapshot(&store, CURRENT_MILEAGE_KEY, &mileage).expect("save mileage");

    let path = store.snapshot_path(CURRENT_MILEAGE_KEY);
    assert_eq!(path, dir.path().join("currentMileage.json"));
    let raw = fs::read_to_string(path).expect("read snapshot");
    assert_eq!(raw, r#"{"2":39500}"#);
    assert!(!dir.path().join("currentMileage.json.tmp").exists());
}

#[test]
fn json_store_reads_legacy_numeric_car_ids() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path()).expect("create store");
    fs::write(
        store.snapshot_path(OIL_RECORDS_KEY),
        r#"[{"id":1,"carId":4,"date":"2024-03-01","mileage":81000,"oilType":"5W-40"}]"#,
    )
    .expect("seed snapshot");

    let loaded: Vec<MaintenanceRecord> =
        load_snapshot(&store, OIL_RECORDS_KEY).expect("load changes");

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].car_id, VehicleId(4));
    assert_eq!(loaded[0].notes(), None);
}

#[test]
fn json_store_treats_missing_file_as_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path().join("fresh")).expect("create store");

    assert_eq!(store.read(RENTAL_RECORDS_KEY).expect("read"), None);
    let loaded: Vec<FinancialRecord> =
        load_snapshot(&store, RENTAL_RECORDS_KEY).expect("load rentals");
    assert!(loaded.is_empty());
    assert!(store.keys().expect("keys").is_empty());
}

#[test]
fn json_store_reports_corrupted_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path()).expect("create store");
    fs::write(store.snapshot_path(RENTAL_RECORDS_KEY), "{ definitely not json")
        .expect("seed snapshot");

    let err = load_snapshot::<Vec<FinancialRecord>>(&store, RENTAL_RECORDS_KEY)
        .expect_err("corrupted snapshot");

    assert!(matches!(err, CoreError::Serde(_)));
}

#[test]
fn json_store_overwrites_whole_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path()).expect("create store");

    store.write("notes", "[1,2,3]").expect("first write");
    store.write("notes", "[]").expect("second write");

    assert_eq!(store.read("notes").expect("read").as_deref(), Some("[]"));
}
