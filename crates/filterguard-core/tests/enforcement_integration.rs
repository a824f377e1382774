//! Integration tests for required-filter enforcement.

use std::sync::Arc;
use std::thread;

use filterguard_core::{
    parse_required_filters, ConfigError, EnforcementError, EnforcerConfig, Error, FilterEnforcer,
    Predicate, SharedFilterEnforcer,
};
use serde_json::json;

const ORDERS_POLICY: &str = "orders:tenantId,orders:region";

fn orders_enforcer() -> FilterEnforcer {
    FilterEnforcer::from_config(&EnforcerConfig::new().with_required_filters(ORDERS_POLICY))
        .unwrap()
}

fn predicate(value: serde_json::Value) -> Predicate {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_missing_second_field_rejected() {
    let enforcer = orders_enforcer();
    let err = enforcer
        .check("orders", &predicate(json!({"tenantId": "t1"})))
        .unwrap_err();

    assert_eq!(
        err,
        EnforcementError::RequiredFilterMissing {
            collection: "orders".to_string(),
            field: "region".to_string(),
        }
    );
}

#[test]
fn test_all_fields_at_top_level_accepted() {
    let enforcer = orders_enforcer();
    let filter = predicate(json!({"tenantId": "t1", "region": "us"}));
    assert!(enforcer.check("orders", &filter).is_ok());
}

#[test]
fn test_fields_inside_and_list_accepted() {
    let enforcer = orders_enforcer();
    let filter = predicate(json!({"and": [{"tenantId": "t1"}, {"region": "us"}]}));
    assert!(enforcer.check("orders", &filter).is_ok());
}

#[test]
fn test_collection_without_policy_accepted() {
    let enforcer = orders_enforcer();
    assert!(enforcer.check("logs", &predicate(json!({}))).is_ok());
}

#[test]
fn test_missing_separator_fails_load() {
    let err = FilterEnforcer::from_config(&EnforcerConfig::new().with_required_filters("orders-tenantId"))
        .unwrap_err();
    match err {
        ConfigError::MalformedEntry { entry, .. } => assert_eq!(entry, "orders-tenantId"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_field_token_fails_load() {
    let err = parse_required_filters(Some("orders:tenantId,orders:")).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedEntry { .. }));
}

#[test]
fn test_absent_config_accepts_everything() {
    let enforcer = FilterEnforcer::from_config(&EnforcerConfig::new()).unwrap();
    for collection in ["orders", "logs", "users"] {
        assert!(enforcer.check(collection, &Predicate::default()).is_ok());
        assert!(enforcer
            .check(collection, &predicate(json!({"x": [1, 2, {"y": null}]})))
            .is_ok());
    }
}

#[test]
fn test_field_only_as_value_is_rejected() {
    let enforcer = orders_enforcer();
    let filter = predicate(json!({"tenantId": "region", "tags": ["region"]}));
    let err = enforcer.check("orders", &filter).unwrap_err();
    assert!(err.to_string().contains("'region'"));
}

#[test]
fn test_rejection_is_user_error() {
    let enforcer = orders_enforcer();
    let err: Error = enforcer
        .check("orders", &Predicate::default())
        .unwrap_err()
        .into();
    assert!(err.is_user_error());
    assert_eq!(err.code(), filterguard_core::error_codes::QUERY_REJECTED);
}

#[test]
fn test_concurrent_checks_during_reload() {
    let shared = SharedFilterEnforcer::new(orders_enforcer());
    let accepted = Arc::new(predicate(json!({"tenantId": "t1", "region": "us"})));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            let filter = Arc::clone(&accepted);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    // both policy sets accept this filter
                    assert!(shared.check("orders", &filter).is_ok());
                }
            })
        })
        .collect();

    for i in 0..50 {
        let raw = if i % 2 == 0 { "orders:tenantId" } else { ORDERS_POLICY };
        shared
            .reload(&EnforcerConfig::new().with_required_filters(raw))
            .unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
