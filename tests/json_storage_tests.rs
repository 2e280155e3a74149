use recovery_core::domain::{WalletRecord, WalletSummary};
use recovery_core::storage::{JsonStorage, TransientCache, WalletStore};

fn sample_records() -> Vec<WalletRecord> {
    vec![
        WalletRecord::new("Savings", "0xabc1234567"),
        WalletRecord::new("Spending", "0xfeed00beef77"),
    ]
}

#[test]
fn seed_if_empty_populates_only_once() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();

    storage.seed_if_empty(sample_records()).unwrap();
    assert_eq!(storage.list().unwrap().len(), 2);

    // A second seed must not clobber existing records.
    storage.seed_if_empty(vec![WalletRecord::new("Extra", "0xdead00")]).unwrap();
    let names: Vec<String> = storage
        .list()
        .unwrap()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, vec!["Savings", "Spending"]);
}

#[test]
fn find_by_address_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();
    storage.seed_if_empty(sample_records()).unwrap();

    let found = storage.find_by_address("0xABC1234567").unwrap().unwrap();
    assert_eq!(found.name, "Savings");
    assert!(storage.find_by_address("0xmissing000").unwrap().is_none());
}

#[test]
fn password_update_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();
    let target = records[0].id;
    {
        let storage = JsonStorage::new(dir.path()).unwrap();
        storage.seed_if_empty(records).unwrap();
        assert!(storage.update_password(target, "Abc12345").unwrap());
    }

    let reopened = JsonStorage::new(dir.path()).unwrap();
    let record = reopened
        .list()
        .unwrap()
        .into_iter()
        .find(|record| record.id == target)
        .unwrap();
    assert_eq!(record.password.as_deref(), Some("Abc12345"));
}

#[test]
fn updating_an_unknown_record_reports_false() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();
    storage.seed_if_empty(sample_records()).unwrap();

    assert!(!storage
        .update_password(uuid::Uuid::new_v4(), "Abc12345")
        .unwrap());
}

#[test]
fn recovered_wallet_slot_round_trips_and_clears() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();

    assert!(storage.recovered_wallet().unwrap().is_none());

    let wallet = WalletSummary {
        id: None,
        name: "Savings".into(),
        address: "0xabc1234567".into(),
        created_at: None,
    };
    storage.put_recovered_wallet(&wallet).unwrap();
    assert_eq!(storage.recovered_wallet().unwrap(), Some(wallet));

    storage.clear_recovered_wallet().unwrap();
    assert!(storage.recovered_wallet().unwrap().is_none());

    // Clearing an already-empty slot is fine.
    storage.clear_recovered_wallet().unwrap();
}
