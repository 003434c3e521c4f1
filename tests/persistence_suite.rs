mod common;

use std::fs;

use common::{open_manager, setup_test_env};
use fleet_ledger::core::errors::FleetError;
use fleet_ledger::domain::VehicleId;

#[test]
fn reload_reproduces_ledgers_and_derived_values() {
    let (mut manager, _config, base) = setup_test_env();

    let mut rental = manager.blank_rental_form();
    rental.car_id = "1".into();
    rental.amount = "150.00".into();
    rental.description = "Weekly rental".into();
    manager.submit_rental(&mut rental).expect("income");

    let mut rental = manager.blank_rental_form();
    rental.car_id = "2".into();
    rental.kind = "expense".into();
    rental.amount = "40".into();
    rental.description = "Fuel".into();
    rental.date = "2024-05-12".into();
    manager.submit_rental(&mut rental).expect("expense");

    let mut oil = manager.blank_oil_change_form();
    oil.car_id = "2".into();
    oil.mileage = "30000".into();
    oil.oil_type = "5W-30".into();
    oil.date = "2024-01-01".into();
    manager.submit_oil_change(&mut oil).expect("oil change");

    let mut mileage = manager.mileage_form_for("2");
    mileage.mileage = "39500".into();
    manager.update_mileage(&mut mileage).expect("mileage");

    let reloaded = open_manager(&base.join("data"));
    assert_eq!(reloaded.rentals(), manager.rentals());
    assert_eq!(reloaded.oil(), manager.oil());
    assert_eq!(reloaded.rental_stats(), manager.rental_stats());
    assert_eq!(reloaded.vehicle_statuses(), manager.vehicle_statuses());

    let projection = reloaded.next_change(VehicleId(2)).expect("projection");
    assert_eq!(projection.next_due_mileage, 40_000);
    assert_eq!(projection.remaining_distance, 500);
}

#[test]
fn oil_change_writes_history_and_mileage_files() {
    let (mut manager, _config, base) = setup_test_env();
    let mut oil = manager.blank_oil_change_form();
    oil.car_id = "3".into();
    oil.mileage = "12000".into();
    oil.oil_type = "0W-20".into();
    manager.submit_oil_change(&mut oil).expect("oil change");

    let data = base.join("data");
    let history = fs::read_to_string(data.join("oilChangeRecords.json")).expect("history file");
    assert!(history.contains("\"oilType\":\"0W-20\""));
    let mileage = fs::read_to_string(data.join("currentMileage.json")).expect("mileage file");
    assert_eq!(mileage, r#"{"3":12000}"#);
}

#[test]
fn failed_mileage_write_leaves_disk_and_memory_unchanged() {
    let (mut manager, _config, base) = setup_test_env();
    let data = base.join("data");
    // A directory where the temp file should go makes the mileage write fail.
    fs::create_dir_all(data.join("currentMileage.json.tmp")).unwrap();

    let mut oil = manager.blank_oil_change_form();
    oil.car_id = "1".into();
    oil.mileage = "5000".into();
    oil.oil_type = "5W-30".into();
    let err = manager.submit_oil_change(&mut oil).expect_err("write fails");

    assert!(matches!(err, FleetError::StorageError(_)));
    assert!(manager.oil().is_empty());
    assert_eq!(oil.mileage, "5000");

    fs::remove_dir_all(data.join("currentMileage.json.tmp")).unwrap();
    let reloaded = open_manager(&data);
    assert!(reloaded.oil().is_empty());
    assert!(reloaded.oil().mileage().is_empty());
}

#[test]
fn corrupted_snapshot_fails_startup() {
    let (_manager, _config, base) = setup_test_env();
    let data = base.join("data");
    fs::write(data.join("carRentalRecords.json"), "[{\"id\":").unwrap();

    let store = fleet_storage_json::JsonSnapshotStore::new(data).unwrap();
    let result = fleet_ledger::core::fleet_manager::FleetManager::load(
        Box::new(store),
        Box::new(fleet_ledger::services::FixedClock::on(common::today())),
        Default::default(),
    );
    assert!(matches!(result, Err(FleetError::CorruptedSnapshot(_))));
}

#[test]
fn deleting_records_persists_removal() {
    let (mut manager, _config, base) = setup_test_env();
    let mut rental = manager.blank_rental_form();
    rental.car_id = "4".into();
    rental.amount = "75".into();
    rental.description = "Weekend".into();
    let id = manager.submit_rental(&mut rental).expect("add");
    assert!(manager.delete_rental(id).expect("delete"));

    let reloaded = open_manager(&base.join("data"));
    assert!(reloaded.rentals().is_empty());
}
