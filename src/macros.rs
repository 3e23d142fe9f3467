#[macro_export]
macro_rules! tree {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elems:tt)+ ]) => {{
        let mut elements = Vec::new();
        $crate::tree!(@array elements ($($elems)+));
        $crate::Value::Array(elements)
    }};

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Handle non-empty object
    ({ $($entries:tt)+ }) => {{
        let mut object = $crate::Map::new();
        $crate::tree!(@object object ($($entries)+));
        $crate::Value::Object(object)
    }};

    // Element munching. A negative number literal is two token trees, so the
    // leading minus gets its own arm ahead of the single-token one.
    (@array $elements:ident ()) => {};
    (@array $elements:ident (- $n:literal $(, $($rest:tt)*)?)) => {
        $elements.push($crate::tree!(-$n));
        $crate::tree!(@array $elements ($($($rest)*)?));
    };
    (@array $elements:ident ($elem:tt $(, $($rest:tt)*)?)) => {
        $elements.push($crate::tree!($elem));
        $crate::tree!(@array $elements ($($($rest)*)?));
    };

    (@object $object:ident ()) => {};
    (@object $object:ident ($key:literal : - $n:literal $(, $($rest:tt)*)?)) => {
        $object.insert($key.to_string(), $crate::tree!(-$n));
        $crate::tree!(@object $object ($($($rest)*)?));
    };
    (@object $object:ident ($key:literal : $value:tt $(, $($rest:tt)*)?)) => {
        $object.insert($key.to_string(), $crate::tree!($value));
        $crate::tree!(@object $object ($($($rest)*)?));
    };

    // Fallback for any expression
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_tree_macro_primitives() {
        assert_eq!(tree!(null), Value::Null);
        assert_eq!(tree!(true), Value::Bool(true));
        assert_eq!(tree!(false), Value::Bool(false));
        assert_eq!(tree!(42), Value::Number(Number::Integer(42)));
        assert_eq!(tree!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(tree!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_tree_macro_negative_numbers() {
        assert_eq!(tree!(-42), Value::Number(Number::Integer(-42)));
        assert_eq!(
            tree!([1, -2]),
            Value::Array(vec![
                Value::Number(Number::Integer(1)),
                Value::Number(Number::Integer(-2)),
            ])
        );
        let obj = tree!({"neg": -42, "f": -1.5});
        match obj {
            Value::Object(map) => {
                assert_eq!(map.get("neg"), Some(&Value::Number(Number::Integer(-42))));
                assert_eq!(map.get("f"), Some(&Value::Number(Number::Float(-1.5))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_tree_macro_arrays() {
        assert_eq!(tree!([]), Value::Array(vec![]));

        let arr = tree!([1, 2, 3]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Number(Number::Integer(1)));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_tree_macro_objects() {
        assert_eq!(tree!({}), Value::Object(Map::new()));

        let obj = tree!({
            "name": "Alice",
            "age": 30
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Number(Number::Integer(30))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_tree_macro_nested() {
        let value = tree!({"a": {"b": [1, {"c": null}]}});
        match value {
            Value::Object(map) => assert!(map.get("a").is_some()),
            _ => panic!("Expected object"),
        }
    }
}
