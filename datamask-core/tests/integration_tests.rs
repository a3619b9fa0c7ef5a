// datamask-core/tests/integration_tests.rs
//! End-to-end scenarios: business payloads, shared maskers across threads,
//! and serializing masked output.

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use serde_json::json;
use test_log::test;

use datamask_core::patterns::{credit_card_rule, email_rule};
use datamask_core::{
    mask_data, with_custom_rule, MaskRule, MaskingEngine, RegexMasker, Value,
};

#[test]
fn test_complex_business_object_with_defaults() -> Result<()> {
    let transaction = Value::from(json!({
        "transaction_id": "TXN-12345",
        "user": {
            "name": "John Doe",
            "email": "john.doe@example.com",
            "cpf": "123.456.789-00",
            "address": { "street": "123 Main St", "city": "São Paulo", "zip": "01234-567" },
        },
        "payment": { "card_number": "4111-1111-1111-1111", "amount": 150.75, "currency": "BRL" },
        "metadata": { "ip_address": "192.168.1.1", "user_agent": "Mozilla/5.0..." },
    }));

    let result = mask_data(&transaction, Vec::new())?;
    let user = result.get("user").unwrap();
    let payment = result.get("payment").unwrap();
    let metadata = result.get("metadata").unwrap();

    // Only the card rule is on by default.
    assert_eq!(user.get("email"), Some(&Value::from("john.doe@example.com")));
    assert_eq!(user.get("cpf"), Some(&Value::from("123.456.789-00")));
    assert_eq!(payment.get("card_number"), Some(&Value::from("4111********1111")));

    assert_eq!(user.get("name"), Some(&Value::from("John Doe")));
    assert_eq!(payment.get("amount"), Some(&Value::from(150.75)));
    assert_eq!(payment.get("currency"), Some(&Value::from("BRL")));
    assert_eq!(metadata.get("ip_address"), Some(&Value::from("192.168.1.1")));
    assert_eq!(result.get("transaction_id"), Some(&Value::from("TXN-12345")));
    Ok(())
}

#[test]
fn test_multiple_custom_rules() -> Result<()> {
    let masker = RegexMasker::with_options(vec![
        with_custom_rule("ip_address", r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}", |_| {
            "***.***.***.***".to_string()
        }),
        with_custom_rule("session_id", r"session-[A-Za-z0-9]{20}", |_| {
            "session-********************".to_string()
        }),
    ])?;

    let input = Value::from(json!({
        "ip_address": "192.168.1.100",
        "session_id": "session-abc123def456ghi789jk",
        "credit_card": "4111-1111-1111-1111",
        "user_agent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    }));

    let result = masker.mask(&input);

    assert_eq!(result.get("ip_address"), Some(&Value::from("***.***.***.***")));
    assert_eq!(result.get("session_id"), Some(&Value::from("session-********************")));
    // Options replace the default catalog, so the card is left alone.
    assert_eq!(result.get("credit_card"), Some(&Value::from("4111-1111-1111-1111")));
    assert_eq!(
        result.get("user_agent"),
        Some(&Value::from("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"))
    );
    Ok(())
}

#[test]
fn test_concurrent_access_shares_one_masker() -> Result<()> {
    let masker = Arc::new(RegexMasker::from_rules(vec![credit_card_rule(), email_rule()])?);
    let input = Arc::new(Value::from(json!({
        "card": "4111-1111-1111-1111",
        "email": "test@example.com",
    })));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let masker = Arc::clone(&masker);
            let input = Arc::clone(&input);
            thread::spawn(move || masker.mask(&input))
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("masking thread panicked");
        assert_eq!(result.get("card"), Some(&Value::from("4111********1111")));
        assert_eq!(result.get("email"), Some(&Value::from("te***@example.com")));
    }
    Ok(())
}

#[test]
fn test_cloned_maskers_share_compiled_rules() -> Result<()> {
    let masker = RegexMasker::new()?;
    let inputs: Vec<String> = (0..8)
        .map(|i| format!("order {i}: 4111 1111 1111 111{i}"))
        .collect();

    thread::scope(|scope| {
        for input in &inputs {
            let masker = masker.clone();
            scope.spawn(move || {
                let masked = masker.mask_str(input);
                assert!(masked.contains("4111********111"), "{}", masked);
                assert!(!masked.contains("1111 1111"), "{}", masked);
            });
        }
    });
    Ok(())
}

#[test]
fn test_masked_output_serializes_to_json() -> Result<()> {
    let masker = RegexMasker::from_rules(vec![
        credit_card_rule(),
        MaskRule::fixed("secret", r"secret-\w+", "secret-***"),
    ])?;
    let input = Value::from(json!({
        "events": [
            { "msg": "charged 4111-1111-1111-1111", "count": 2 },
            { "msg": "rotated secret-abc123", "count": null },
        ],
    }));

    let masked = masker.mask(&input);
    let json = serde_json::to_value(&masked)?;

    assert_eq!(
        json,
        json!({
            "events": [
                { "msg": "charged 4111********1111", "count": 2 },
                { "msg": "rotated secret-***", "count": null },
            ],
        })
    );
    Ok(())
}

#[test]
fn test_dyn_engine_usage() -> Result<()> {
    let engine: Box<dyn MaskingEngine> = Box::new(RegexMasker::new()?);
    assert_eq!(engine.mask_str("4111111111111111"), "4111********1111");
    assert!(engine.compiled_rules().is_active());
    Ok(())
}
