//! Integration tests for the SQLite device repository, against in-memory
//! databases.

mod common;

use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use common::{computer, device, medical_device, repository, BASE_URL};
use domain::errors::DeviceError;
use domain::models::DeviceCriteria;
use domain::repository::DeviceRepository;

#[tokio::test]
async fn checkin_then_unfiltered_query_returns_the_record() -> anyhow::Result<()> {
    let repo = repository().await?;
    let input = computer("Lenovo");

    let stored = repo.checkin_computer(input.clone()).await?;
    assert_eq!(stored.device.id, input.device.id);
    assert!(stored.device.checkin_at.is_some());
    assert!(stored.device.checkout_at.is_none());

    let all = repo.get_computers(&DeviceCriteria::default()).await?;
    assert_eq!(all.len(), 1);
    let found = &all[0];
    assert_eq!(found.device.id, input.device.id);
    assert_eq!(found.device.brand, input.device.brand);
    assert_eq!(found.device.model, input.device.model);
    assert_eq!(found.device.photo_url, input.device.photo_url);
    assert_eq!(found.device.owner, input.device.owner);
    assert_eq!(found.color, input.color);
    Ok(())
}

#[tokio::test]
async fn checkin_keeps_a_caller_supplied_timestamp() -> anyhow::Result<()> {
    let repo = repository().await?;
    let checkin_at = Utc::now();
    let mut input = computer("Dell");
    input.device.checkin_at = Some(checkin_at);

    let stored = repo.checkin_computer(input).await?;
    assert_eq!(
        stored.device.checkin_at.unwrap().timestamp_millis(),
        checkin_at.timestamp_millis()
    );
    Ok(())
}

#[tokio::test]
async fn recheckin_mutates_instead_of_duplicating() -> anyhow::Result<()> {
    let repo = repository().await?;
    let input = computer("Lenovo");
    let id = input.device.id;

    repo.checkin_computer(input.clone()).await?;
    repo.checkout_device(id, Utc::now()).await?;
    assert!(!repo.is_device_entered(id).await?);

    tokio::time::sleep(Duration::from_millis(10)).await;
    repo.checkin_computer(input).await?;

    let all = repo.get_computers(&DeviceCriteria::default()).await?;
    assert_eq!(all.len(), 1);
    // The stale checkout predates the new checkin, so the device is entered.
    assert!(repo.is_device_entered(id).await?);
    Ok(())
}

#[tokio::test]
async fn duplicate_serial_is_rejected_without_a_duplicate_row() -> anyhow::Result<()> {
    let repo = repository().await?;
    repo.checkin_medical_device(medical_device("SN-100")).await?;

    let err = repo
        .checkin_medical_device(medical_device("SN-100"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeviceError::DuplicateSerial { serial } if serial == "SN-100"));

    let all = repo.get_medical_devices(&DeviceCriteria::default()).await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn recheckin_of_the_same_medical_device_keeps_its_serial() -> anyhow::Result<()> {
    let repo = repository().await?;
    let input = medical_device("SN-200");

    repo.checkin_medical_device(input.clone()).await?;
    let again = repo.checkin_medical_device(input).await?;
    assert_eq!(again.serial, "SN-200");

    let all = repo.get_medical_devices(&DeviceCriteria::default()).await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn default_order_is_newest_first() -> anyhow::Result<()> {
    let repo = repository().await?;
    let mut ids = Vec::new();
    for brand in ["first", "second", "third"] {
        let input = computer(brand);
        ids.push(input.device.id);
        repo.checkin_computer(input).await?;
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let all = repo.get_computers(&DeviceCriteria::default()).await?;
    let got: Vec<Uuid> = all.iter().map(|c| c.device.id).collect();
    assert_eq!(got, vec![ids[2], ids[1], ids[0]]);
    Ok(())
}

#[tokio::test]
async fn filter_sort_and_pagination_are_honored() -> anyhow::Result<()> {
    let repo = repository().await?;
    for (brand, model) in [("Dell", "m3"), ("Dell", "m1"), ("Apple", "m2"), ("Dell", "m2")] {
        let mut input = computer(brand);
        input.device.model = model.to_string();
        repo.checkin_computer(input).await?;
    }

    let filtered = repo
        .get_computers(&DeviceCriteria::filtered("brand", "Dell"))
        .await?;
    assert_eq!(filtered.len(), 3);
    assert!(filtered.iter().all(|c| c.device.brand == "Dell"));

    let criteria = DeviceCriteria {
        filter_by: Some(domain::models::FilterBy {
            field: "brand".to_string(),
            value: "Dell".to_string(),
        }),
        sort_by: Some(domain::models::SortBy {
            field: "model".to_string(),
            is_ascending: true,
        }),
        limit: Some(2),
        offset: Some(1),
    };
    let page = repo.get_computers(&criteria).await?;
    let models: Vec<&str> = page.iter().map(|c| c.device.model.as_str()).collect();
    assert_eq!(models, vec!["m2", "m3"]);
    Ok(())
}

#[tokio::test]
async fn unsupported_criteria_field_fails_before_storage() -> anyhow::Result<()> {
    let repo = repository().await?;
    let err = repo
        .get_computers(&DeviceCriteria::filtered("serial", "SN-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeviceError::UnsupportedField { field } if field == "serial"));
    Ok(())
}

#[tokio::test]
async fn empty_result_is_not_an_error() -> anyhow::Result<()> {
    let repo = repository().await?;
    let all = repo.get_computers(&DeviceCriteria::default()).await?;
    assert!(all.is_empty());
    Ok(())
}

#[tokio::test]
async fn frequent_registration_derives_urls_and_checkin_updates_cycle() -> anyhow::Result<()> {
    let repo = repository().await?;
    let input = device("Apple");
    let id = input.id;

    let registered = repo.register_frequent_computer(input).await?;
    assert_eq!(
        registered.checkin_url,
        format!("{BASE_URL}/devices/{id}/checkin")
    );
    assert_eq!(
        registered.checkout_url,
        format!("{BASE_URL}/devices/{id}/checkout")
    );
    assert!(registered.device.checkin_at.is_none());
    assert!(registered.device.checkout_at.is_none());

    let now = Utc::now();
    let checked_in = repo.checkin_frequent_computer(id, now).await?;
    assert_eq!(
        checked_in.device.checkin_at.unwrap().timestamp_millis(),
        now.timestamp_millis()
    );
    // last_checkout_at is untouched by an expedited checkin.
    assert!(checked_in.device.checkout_at.is_none());
    Ok(())
}

#[tokio::test]
async fn frequent_registration_is_idempotent_on_the_id() -> anyhow::Result<()> {
    let repo = repository().await?;
    let mut input = device("Apple");
    input.brand = "Apple".to_string();
    let id = input.id;

    let first = repo.register_frequent_computer(input.clone()).await?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    input.brand = "Apple Inc".to_string();
    let second = repo.register_frequent_computer(input).await?;

    assert_eq!(second.device.id, id);
    assert_eq!(second.device.brand, "Apple Inc");
    assert_eq!(
        second.created_at.timestamp_millis(),
        first.created_at.timestamp_millis()
    );

    let all = repo
        .get_frequent_computers(&DeviceCriteria::default())
        .await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn frequent_checkin_of_unregistered_id_is_not_found() -> anyhow::Result<()> {
    let repo = repository().await?;
    let id = Uuid::new_v4();
    let err = repo.checkin_frequent_computer(id, Utc::now()).await.unwrap_err();
    assert!(matches!(err, DeviceError::NotFound { id: missing } if missing == id));
    Ok(())
}

#[tokio::test]
async fn checkout_flips_entered_for_every_kind() -> anyhow::Result<()> {
    let repo = repository().await?;

    let comp = computer("Lenovo");
    let comp_id = comp.device.id;
    repo.checkin_computer(comp).await?;

    let med = medical_device("SN-300");
    let med_id = med.device.id;
    repo.checkin_medical_device(med).await?;

    let freq = device("Apple");
    let freq_id = freq.id;
    repo.register_frequent_computer(freq).await?;
    repo.checkin_frequent_computer(freq_id, Utc::now()).await?;

    for id in [comp_id, med_id, freq_id] {
        assert!(repo.is_device_entered(id).await?);
        repo.checkout_device(id, Utc::now()).await?;
        assert!(!repo.is_device_entered(id).await?);
    }
    Ok(())
}

#[tokio::test]
async fn checkout_of_unknown_id_is_not_found() -> anyhow::Result<()> {
    let repo = repository().await?;
    let id = Uuid::new_v4();
    let err = repo.checkout_device(id, Utc::now()).await.unwrap_err();
    assert!(matches!(err, DeviceError::NotFound { id: missing } if missing == id));
    Ok(())
}

#[tokio::test]
async fn expedited_recheckin_after_a_regular_checkout_counts_as_entered() -> anyhow::Result<()> {
    let repo = repository().await?;
    let comp = computer("Lenovo");
    let id = comp.device.id;

    // The standard frequent flow: a regular checkin/checkout cycle first,
    // then registration and an expedited checkin under the same id.
    repo.checkin_computer(comp).await?;
    repo.checkout_device(id, Utc::now()).await?;
    assert!(!repo.is_device_entered(id).await?);

    let mut freq = device("Lenovo");
    freq.id = id;
    repo.register_frequent_computer(freq).await?;
    assert!(!repo.is_device_entered(id).await?);

    repo.checkin_frequent_computer(id, Utc::now()).await?;
    // The checked-out computers row must not shadow the entered
    // frequent_computers row.
    assert!(repo.is_device_entered(id).await?);
    Ok(())
}

#[tokio::test]
async fn checkout_prefers_the_computer_record_when_an_id_spans_tables() -> anyhow::Result<()> {
    let repo = repository().await?;
    let comp = computer("Lenovo");
    let id = comp.device.id;
    repo.checkin_computer(comp).await?;

    let mut freq = device("Lenovo");
    freq.id = id;
    repo.register_frequent_computer(freq).await?;

    repo.checkout_device(id, Utc::now()).await?;

    let computers = repo.get_computers(&DeviceCriteria::default()).await?;
    assert!(computers[0].device.checkout_at.is_some());

    // The frequent record's expedited cycle is untouched.
    let frequents = repo
        .get_frequent_computers(&DeviceCriteria::default())
        .await?;
    assert!(frequents[0].device.checkin_at.is_none());
    assert!(frequents[0].device.checkout_at.is_none());

    assert!(!repo.is_device_entered(id).await?);
    Ok(())
}

#[tokio::test]
async fn entered_probe_is_false_for_unknown_ids() -> anyhow::Result<()> {
    let repo = repository().await?;
    assert!(!repo.is_device_entered(Uuid::new_v4()).await?);
    Ok(())
}

#[tokio::test]
async fn checked_in_history_probe_and_registration_probe() -> anyhow::Result<()> {
    let repo = repository().await?;

    let comp = computer("Lenovo");
    let id = comp.device.id;
    assert!(!repo.has_device_checked_in(id).await?);

    repo.checkin_computer(comp).await?;
    assert!(repo.has_device_checked_in(id).await?);

    // A checkout does not erase the history.
    repo.checkout_device(id, Utc::now()).await?;
    assert!(repo.has_device_checked_in(id).await?);

    assert!(!repo.is_frequent_computer_registered(id).await?);
    repo.register_frequent_computer(device("Apple")).await?;
    assert!(!repo.is_frequent_computer_registered(id).await?);

    let freq = device("Apple");
    let freq_id = freq.id;
    repo.register_frequent_computer(freq).await?;
    assert!(repo.is_frequent_computer_registered(freq_id).await?);
    Ok(())
}
