//! Memoization: `Once` containers, lazy leaves and cached composites

use crate::test_utils::{concurrent, op};
use phi::{
    dataize, rule_fn, Data, DataType, DataizationError, Object, Once, Template, Value, VALUE_ATTR,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_once(counter: &Arc<AtomicUsize>, value: i64) -> Once<Value> {
    let counter = Arc::clone(counter);
    Once::new(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Int(value))
        },
        "",
    )
}

#[test]
fn test_once_computes_once_sequentially() {
    let counter = Arc::new(AtomicUsize::new(0));
    let once = counting_once(&counter, 5);
    for _ in 0..10 {
        assert_eq!(once.take().unwrap(), Value::Int(5));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_once_converges_across_threads() {
    let counter = Arc::new(AtomicUsize::new(0));
    let once = counting_once(&counter, 11);
    let results = concurrent::run_with_shared(16, once, |_, once| once.take());
    for result in results {
        assert_eq!(result.unwrap(), Value::Int(11));
    }
    let runs = counter.load(Ordering::SeqCst);
    assert!((1..=16).contains(&runs), "producer ran {} times", runs);
}

#[test]
fn test_once_placeholder_until_computed() {
    let once = Once::new(|| Ok(Value::from("ready")), "...");
    assert_eq!(once.to_string(), "...");
    once.take().unwrap();
    assert_eq!(once.to_string(), "\"ready\"");
}

#[test]
fn test_lazy_leaf_is_forced_by_dataization() {
    let counter = Arc::new(AtomicUsize::new(0));
    let leaf = Object::lazy(counting_once(&counter, 40));
    let object = op("int.add", vec![leaf.clone(), Object::data(2i64)]);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(42));
    assert_eq!(dataize(&leaf, DataType::Int).unwrap(), Value::Int(40));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_lazy_leaf_retries() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&attempts);
    let leaf = Object::lazy(Once::new(
        move || {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DataizationError::Undataizable {
                    object: "source".to_string(),
                })
            } else {
                Ok(Value::Bool(true))
            }
        },
        "",
    ));
    assert!(dataize(&leaf, DataType::Bool).is_err());
    assert_eq!(dataize(&leaf, DataType::Bool).unwrap(), Value::Bool(true));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_cached_composite_runs_rule_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let template = Template::builder("counted")
        .cached(
            VALUE_ATTR,
            rule_fn(move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(Object::data(1i64))
            }),
        )
        .build();
    let object = template.instantiate();
    for _ in 0..5 {
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(1));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    // A fresh instance has its own cache
    dataize(&template.instantiate(), DataType::Int).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_uncached_composite_runs_rule_every_time() {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let template = Template::builder("fresh")
        .composite(
            VALUE_ATTR,
            rule_fn(move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(Object::data(1i64))
            }),
        )
        .build();
    let object = template.instantiate();
    for _ in 0..3 {
        dataize(&object, DataType::Int).unwrap();
    }
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}
