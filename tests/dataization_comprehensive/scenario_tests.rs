//! Behavioral scenarios over nested object graphs

use crate::test_utils::{instance, op};
use phi::primitives::array;
use phi::{
    dataize, rule_fn, DataType, DataizationError, Dataizer, Evaluation, EngineConfig, Object,
    Template, Value, DATA_ATTR, VALUE_ATTR,
};

/// `square(n)`: φ multiplies the free attribute `n` by itself
fn square() -> Template {
    Template::builder("square")
        .free("n")
        .cached(
            VALUE_ATTR,
            rule_fn(|owner, eval| {
                let n = eval.attr(owner, "n")?;
                Ok(op("int.mul", vec![n.clone(), n]))
            }),
        )
        .build()
}

#[test]
fn test_user_template_decorates_an_operator() {
    let object = square().instantiate();
    object.bind("n", Object::data(7i64)).unwrap();
    assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(49));
}

#[test]
fn test_user_template_over_coerced_operand() {
    let object = square().instantiate();
    object.bind("n", phi::to_phi(-3i64).unwrap()).unwrap();
    assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(9));
}

#[test]
fn test_unbound_free_attribute_in_user_template() {
    let object = square().instantiate();
    match dataize(&object, DataType::Int).unwrap_err() {
        DataizationError::Unbound { object: label, attr } => {
            assert_eq!(label, object.label());
            assert_eq!(attr, "n");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_object_without_data_or_decoratee() {
    let template = Template::builder("empty").free("x").build();
    let object = template.instantiate();
    object.bind("x", Object::data(1i64)).unwrap();
    assert!(matches!(
        dataize(&object, DataType::Int),
        Err(DataizationError::Undataizable { .. })
    ));
}

#[test]
fn test_data_attribute_takes_precedence_over_decoratee() {
    let template = Template::builder("both")
        .free(DATA_ATTR)
        .composite(VALUE_ATTR, rule_fn(|_, _| Ok(Object::data(0i64))))
        .build();
    let object = template.instantiate();
    object.bind(DATA_ATTR, Object::data(1i64)).unwrap();
    assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(1));
}

#[test]
fn test_float_and_bool_pipelines() {
    let ratio = op(
        "float.div",
        vec![Object::data(1.0f64), Object::data(4.0f64)],
    );
    let total = op("float.add", vec![ratio, Object::data(0.5f64)]);
    assert_eq!(dataize(&total, DataType::Float).unwrap(), Value::Float(0.75));

    let either = op("bool.or", vec![Object::data(false), Object::data(true)]);
    let both = op("bool.and", vec![either, Object::data(true)]);
    assert_eq!(dataize(&both, DataType::Bool).unwrap(), Value::Bool(true));
}

#[test]
fn test_array_of_operator_results() {
    let object = array::of([
        op("int.add", vec![Object::data(1i64), Object::data(1i64)]),
        op("int.mul", vec![Object::data(3i64), Object::data(3i64)]),
    ])
    .unwrap();
    let value = dataize(&object, DataType::Array).unwrap();
    assert_eq!(value.to_string(), "[2, 9]");
}

#[test]
fn test_evaluation_depth_returns_to_zero() {
    let mut eval = Evaluation::new(EngineConfig::default());
    let object = op("int.sub", vec![Object::data(5i64), Object::data(1i64)]);
    assert_eq!(eval.dataize_as::<i64>(&object).unwrap(), 4);
    assert_eq!(eval.depth(), 0);
}

#[test]
fn test_dataizer_typed_access() {
    let dataizer = Dataizer::default();
    let object = instance("string");
    object.bind(DATA_ATTR, Object::data("phi")).unwrap();
    assert_eq!(dataizer.dataize_as::<String>(&object).unwrap(), "phi");
    assert!(matches!(
        dataizer.dataize_as::<i64>(&object),
        Err(DataizationError::TypeMismatch { .. })
    ));
}
