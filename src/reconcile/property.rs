use super::{
    build_payload, merge_additional_data, reconcile, resolve_field, Row, UpdatePayload,
    ADDITIONAL_DATA, RADIO_CHANNELS, TV_CHANNELS,
};
use crate::entity::{EntityConfig, ManifestEntry};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        Just(json!(0)),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::String),
    ]
}

fn arb_manifest() -> impl Strategy<Value = Vec<ManifestEntry>> {
    prop::collection::btree_set("[a-z_]{1,8}", 0..10).prop_map(|keys| {
        keys.into_iter()
            .map(|key| ManifestEntry {
                label: format!(" {}", key),
                key,
            })
            .collect()
    })
}

/// Some of `keys` with arbitrary scalars, plus a few keys outside them.
fn arb_sparse_row(keys: Vec<String>) -> impl Strategy<Value = Row> {
    let n = keys.len();
    (
        prop::collection::vec(prop::option::of(arb_scalar()), n),
        prop::collection::btree_map("[A-Z]{1,4}", arb_scalar(), 0..3),
    )
        .prop_map(move |(values, extra)| {
            let mut row = Row::new();
            for (k, v) in keys.iter().zip(values) {
                if let Some(v) = v {
                    row.insert(k.clone(), v);
                }
            }
            for (k, v) in extra {
                row.insert(k, v);
            }
            row
        })
}

fn arb_merge_inputs() -> impl Strategy<Value = (Vec<ManifestEntry>, Option<Row>, Option<Row>)> {
    arb_manifest().prop_flat_map(|manifest| {
        let keys: Vec<String> = manifest.iter().map(|e| e.key.clone()).collect();
        (
            Just(manifest),
            prop::option::of(arb_sparse_row(keys.clone())),
            prop::option::of(arb_sparse_row(keys)),
        )
    })
}

fn arb_channels() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(prop_oneof![
        Just(Value::Null),
        prop::collection::vec("[a-z][0-9]", 0..4).prop_map(|v| json!(v)),
        "[a-z][0-9]".prop_map(Value::String),
    ])
}

/// A row for `config`; `id` is set only for fallback rows.
fn arb_entity_row(config: &EntityConfig, id: Option<Value>) -> impl Strategy<Value = Row> {
    let keys: Vec<String> = config.keys().map(str::to_string).collect();
    let id_field = config.id_field.clone();
    (
        prop::option::of(arb_sparse_row(keys)),
        arb_channels(),
        arb_channels(),
    )
        .prop_map(move |(additional, tv, radio)| {
            let mut row = Row::new();
            if let Some(id) = &id {
                row.insert(id_field.clone(), id.clone());
            }
            if let Some(ad) = additional {
                row.insert(ADDITIONAL_DATA.to_string(), Value::Object(ad));
            }
            if let Some(tv) = tv {
                row.insert(TV_CHANNELS.to_string(), tv);
            }
            if let Some(radio) = radio {
                row.insert(RADIO_CHANNELS.to_string(), radio);
            }
            row
        })
}

fn arb_edit(config: EntityConfig) -> impl Strategy<Value = (Row, Row)> {
    (
        arb_entity_row(&config, None),
        arb_entity_row(&config, Some(json!("row-1"))),
    )
}

fn echo_row(config: &EntityConfig, payload: &UpdatePayload) -> Row {
    let mut row = Row::new();
    row.insert(config.id_field.clone(), payload.id.clone());
    row.insert(
        ADDITIONAL_DATA.to_string(),
        Value::Object(payload.additional_data.clone()),
    );
    row.insert(TV_CHANNELS.to_string(), json!(payload.tv_channels));
    row.insert(RADIO_CHANNELS.to_string(), json!(payload.radio_channels));
    row
}

fn assert_self_reconcile_stable(
    config: &EntityConfig,
    changes: &Row,
    fallback: &Row,
) -> Result<(), TestCaseError> {
    let payload = build_payload(config, changes, fallback);
    let echoed = echo_row(config, &payload);

    prop_assert_eq!(build_payload(config, &echoed, &echoed), payload);
    prop_assert_eq!(
        reconcile(config, Some(&echoed), &echoed),
        reconcile(config, Some(changes), fallback)
    );
    Ok(())
}

proptest! {
    #[test]
    fn change_entry_beats_fallback(
        key in "[a-z]{1,6}",
        change in arb_scalar(),
        fallback_value in arb_scalar(),
        other in arb_sparse_row(vec![]),
    ) {
        let mut changes = other.clone();
        changes.insert(key.clone(), change.clone());
        let mut fallback = other;
        fallback.insert(key.clone(), fallback_value.clone());

        prop_assert_eq!(resolve_field(Some(&changes), Some(&fallback), &key), change.clone());
        prop_assert_eq!(resolve_field(Some(&changes), None, &key), change);

        changes.remove(&key);
        prop_assert_eq!(resolve_field(Some(&changes), Some(&fallback), &key), fallback_value.clone());
        prop_assert_eq!(resolve_field(None, Some(&fallback), &key), fallback_value);
    }

    #[test]
    fn merged_keys_equal_manifest((manifest, changes, fallback) in arb_merge_inputs()) {
        let merged = merge_additional_data(&manifest, changes.as_ref(), fallback.as_ref());

        let keys: Vec<&str> = merged.keys().map(|k| k.as_str()).collect();
        let expected: Vec<&str> = manifest.iter().map(|e| e.key.as_str()).collect();
        prop_assert_eq!(keys, expected);

        for entry in &manifest {
            prop_assert_eq!(
                &merged[entry.key.as_str()],
                &resolve_field(changes.as_ref(), fallback.as_ref(), &entry.key)
            );
        }
    }

    #[test]
    fn institutions_self_reconcile_is_stable((changes, fallback) in arb_edit(EntityConfig::institutions())) {
        assert_self_reconcile_stable(&EntityConfig::institutions(), &changes, &fallback)?;
    }

    #[test]
    fn students_self_reconcile_is_stable((changes, fallback) in arb_edit(EntityConfig::students())) {
        assert_self_reconcile_stable(&EntityConfig::students(), &changes, &fallback)?;
    }

    #[test]
    fn channels_are_always_lists((changes, fallback) in arb_edit(EntityConfig::students())) {
        let payload = build_payload(&EntityConfig::students(), &changes, &fallback);
        let out = serde_json::to_value(&payload).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(out[TV_CHANNELS].is_array());
        prop_assert!(out[RADIO_CHANNELS].is_array());
    }
}
