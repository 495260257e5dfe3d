//! Operator reduction: left folds, guards and operand checks

use crate::test_utils::{init_tracing, int_op, op};
use phi::{dataize, DataType, DataizationError, Diagnostic, Object, Value, BUILTIN_NAMES};
use proptest::prelude::*;

// =============================================================================
// Left Fold
// =============================================================================

mod left_fold {
    use super::*;

    #[test]
    fn test_div_chain_from_three_operands() {
        init_tracing();
        let object = int_op("int.div", &[84, 4, 3]);
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_sub_is_left_associative() {
        let object = int_op("int.sub", &[10, 3, 2]);
        // (10 - 3) - 2, not 10 - (3 - 2)
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(5));
    }

    #[test]
    fn test_mod_is_left_associative() {
        let object = int_op("int.mod", &[100, 7, 3]);
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_single_operand_is_identity() {
        for name in ["int.add", "int.sub", "int.mul", "int.div", "int.mod"] {
            let object = int_op(name, &[42]);
            assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(42), "{}", name);
        }
    }

    #[test]
    fn test_single_zero_operand_is_not_a_divisor() {
        let object = int_op("int.div", &[0]);
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_operator_result_feeds_another_operator() {
        let sum = int_op("int.add", &[80, 4]);
        let object = op("int.div", vec![sum, Object::data(4i64)]);
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(21));
    }
}

// =============================================================================
// Guards
// =============================================================================

mod guards {
    use super::*;

    #[test]
    fn test_zero_divisor_is_invalid_operand() {
        let err = dataize(&int_op("int.div", &[5, 0]), DataType::Int).unwrap_err();
        assert_eq!(
            err,
            DataizationError::InvalidOperand {
                op: "int.div".to_string(),
                diagnostic: Diagnostic::DivisionByZero,
            }
        );
        assert_eq!(err.to_string(), "int.div: division by zero is infinity");
    }

    #[test]
    fn test_zero_divisor_after_valid_steps() {
        assert!(matches!(
            dataize(&int_op("int.div", &[84, 4, 0, 3]), DataType::Int),
            Err(DataizationError::InvalidOperand {
                diagnostic: Diagnostic::DivisionByZero,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_modulus() {
        assert!(matches!(
            dataize(&int_op("int.mod", &[5, 0]), DataType::Int),
            Err(DataizationError::InvalidOperand {
                diagnostic: Diagnostic::ModuloByZero,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_dividend_is_fine() {
        assert_eq!(
            dataize(&int_op("int.div", &[0, 5]), DataType::Int).unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn test_failed_division_is_not_cached() {
        let object = int_op("int.div", &[5, 0]);
        assert!(dataize(&object, DataType::Int).is_err());
        assert!(dataize(&object, DataType::Int).is_err());
    }
}

// =============================================================================
// Operand Checks
// =============================================================================

mod operands {
    use super::*;

    #[test]
    fn test_every_operator_rejects_empty_operands() {
        for name in BUILTIN_NAMES.iter().filter(|n| n.contains('.')) {
            let object = op(name, Vec::new());
            let expected = if name.starts_with("float") {
                DataType::Float
            } else if name.starts_with("bool") {
                DataType::Bool
            } else {
                DataType::Int
            };
            assert_eq!(
                dataize(&object, expected).unwrap_err(),
                DataizationError::MissingOperands {
                    op: name.to_string()
                },
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_wrong_operand_type() {
        let object = op("int.add", vec![Object::data(1i64), Object::data("2")]);
        assert_eq!(
            dataize(&object, DataType::Int).unwrap_err(),
            DataizationError::TypeMismatch {
                expected: DataType::Int,
                actual: DataType::String,
            }
        );
    }

    #[test]
    fn test_wrong_requested_type() {
        let object = int_op("int.add", &[1, 2]);
        assert!(matches!(
            dataize(&object, DataType::Float),
            Err(DataizationError::TypeMismatch {
                expected: DataType::Float,
                actual: DataType::Int,
            })
        ));
    }

    #[test]
    fn test_unbound_operand_propagates() {
        let unbound = crate::test_utils::instance("int");
        let object = op("int.mul", vec![Object::data(3i64), unbound]);
        assert!(matches!(
            dataize(&object, DataType::Int),
            Err(DataizationError::Unbound { .. })
        ));
    }

    #[test]
    fn test_bound_int_object_as_operand() {
        let five = crate::test_utils::instance("int");
        five.bind(phi::DATA_ATTR, Object::data(5i64)).unwrap();
        let object = op("int.mul", vec![five, Object::data(3i64)]);
        assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(15));
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_sub_matches_left_fold(operands in prop::collection::vec(any::<i64>(), 1..8)) {
        let expected = operands[1..]
            .iter()
            .fold(operands[0], |acc, x| acc.wrapping_sub(*x));
        let object = int_op("int.sub", &operands);
        prop_assert_eq!(dataize(&object, DataType::Int).unwrap(), Value::Int(expected));
    }

    #[test]
    fn prop_div_fails_iff_a_divisor_is_zero(operands in prop::collection::vec(-3i64..4, 1..6)) {
        let object = int_op("int.div", &operands);
        let result = dataize(&object, DataType::Int);
        if operands[1..].contains(&0) {
            prop_assert!(
                matches!(
                    result,
                    Err(DataizationError::InvalidOperand {
                        diagnostic: Diagnostic::DivisionByZero,
                        ..
                    })
                ),
                "expected division failure"
            );
        } else {
            let expected = operands[1..]
                .iter()
                .fold(operands[0], |acc, x| acc.wrapping_div(*x));
            prop_assert_eq!(result.unwrap(), Value::Int(expected));
        }
    }

    #[test]
    fn prop_add_is_order_independent(mut operands in prop::collection::vec(any::<i64>(), 1..8)) {
        let forward = dataize(&int_op("int.add", &operands), DataType::Int).unwrap();
        operands.reverse();
        let backward = dataize(&int_op("int.add", &operands), DataType::Int).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
