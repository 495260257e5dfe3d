//! Cycle and depth guards

use crate::test_utils::{init_tracing, instance, nested_adds, on_spawned_stack, op};
use phi::{
    dataize, rule_fn, DataType, Dataizer, DataizationError, EngineConfig, Object, Template, Value,
    DATA_ATTR, DEFAULT_MAX_DEPTH, OPERANDS, VALUE_ATTR,
};

fn self_referencing() -> Template {
    Template::builder("loop")
        .composite(VALUE_ATTR, rule_fn(|owner, eval| eval.attr(owner, VALUE_ATTR)))
        .build()
}

#[test]
fn test_self_reference_is_cyclic() {
    init_tracing();
    let object = self_referencing().instantiate();
    match dataize(&object, DataType::Int).unwrap_err() {
        DataizationError::CyclicEvaluation { object: label, attr } => {
            assert_eq!(label, object.label());
            assert_eq!(attr, VALUE_ATTR);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_operator_consuming_itself_is_cyclic() {
    let object = instance("int.add");
    object.bind(OPERANDS, Object::data(1i64)).unwrap();
    object.bind(OPERANDS, object.clone()).unwrap();
    assert!(matches!(
        dataize(&object, DataType::Int),
        Err(DataizationError::CyclicEvaluation { .. })
    ));
}

#[test]
fn test_mutual_operators_are_cyclic() {
    let a = instance("int.add");
    let b = instance("int.mul");
    a.bind(OPERANDS, b.clone()).unwrap();
    b.bind(OPERANDS, a.clone()).unwrap();
    assert!(matches!(
        dataize(&a, DataType::Int),
        Err(DataizationError::CyclicEvaluation { .. })
    ));
}

#[test]
fn test_data_attribute_bound_to_owner_is_cyclic() {
    let object = instance("int");
    object.bind(DATA_ATTR, object.clone()).unwrap();
    assert!(matches!(
        dataize(&object, DataType::Int),
        Err(DataizationError::CyclicEvaluation { .. })
    ));
}

#[test]
fn test_shared_operand_is_not_a_cycle() {
    let shared = op("int.add", vec![Object::data(2i64), Object::data(3i64)]);
    let object = op("int.mul", vec![shared.clone(), shared]);
    assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(25));
}

#[test]
fn test_chain_at_default_depth_fits_a_spawned_stack() {
    let value = on_spawned_stack(|| dataize(&nested_adds(DEFAULT_MAX_DEPTH), DataType::Int));
    assert_eq!(value.unwrap(), Value::Int(DEFAULT_MAX_DEPTH as i64 - 1));
}

#[test]
fn test_chain_one_past_default_depth_is_rejected() {
    let result = on_spawned_stack(|| dataize(&nested_adds(DEFAULT_MAX_DEPTH + 1), DataType::Int));
    assert_eq!(
        result.unwrap_err(),
        DataizationError::DepthExceeded {
            limit: DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn test_very_deep_chain_fails_instead_of_overflowing() {
    let result = on_spawned_stack(|| dataize(&nested_adds(500), DataType::Int));
    assert!(matches!(
        result,
        Err(DataizationError::DepthExceeded { .. })
    ));
}

#[test]
fn test_configured_limit_below_default() {
    let shallow = Dataizer::new(EngineConfig {
        max_depth: 8,
        ..EngineConfig::default()
    });
    assert_eq!(
        shallow.dataize(&nested_adds(9), DataType::Int).unwrap_err(),
        DataizationError::DepthExceeded { limit: 8 }
    );
    assert_eq!(
        shallow.dataize(&nested_adds(8), DataType::Int).unwrap(),
        Value::Int(7)
    );
}

/// φ dataizes a fresh instance of its own template through the crate-level entry point
fn unfolding() -> Template {
    Template::builder("unfolding")
        .composite(
            VALUE_ATTR,
            rule_fn(|_, _| {
                let value = dataize(&unfolding().instantiate(), DataType::Int)?;
                Ok(Object::data(value))
            }),
        )
        .build()
}

#[test]
fn test_recursive_instantiation_fails_fast() {
    let result = on_spawned_stack(|| dataize(&unfolding().instantiate(), DataType::Int));
    assert_eq!(
        result.unwrap_err(),
        DataizationError::DepthExceeded {
            limit: DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn test_rule_dataizing_its_owner_is_cyclic() {
    let template = Template::builder("mirror")
        .composite(
            VALUE_ATTR,
            rule_fn(|owner, _| {
                let value = dataize(owner, DataType::Int)?;
                Ok(Object::data(value))
            }),
        )
        .build();
    let object = template.instantiate();
    let result = on_spawned_stack(move || dataize(&object, DataType::Int));
    assert!(matches!(
        result,
        Err(DataizationError::CyclicEvaluation { attr, .. }) if attr == VALUE_ATTR
    ));
}

#[test]
fn test_failed_cycle_leaves_object_dataizable_elsewhere() {
    let loop_object = self_referencing().instantiate();
    assert!(dataize(&loop_object, DataType::Int).is_err());
    let object = op("int.sub", vec![Object::data(9i64), Object::data(4i64)]);
    assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(5));
}
