use urltron::{stringify, urltron, Map, Value};

#[test]
fn test_urltron_macro_null() {
    let value = urltron!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_urltron_macro_booleans() {
    let true_val = urltron!(true);
    assert_eq!(true_val, Value::Bool(true));

    let false_val = urltron!(false);
    assert_eq!(false_val, Value::Bool(false));
}

#[test]
fn test_urltron_macro_numbers() {
    let int_val = urltron!(42);
    assert_eq!(int_val, Value::Number(42.0));

    let float_val = urltron!(3.5);
    assert_eq!(float_val, Value::Number(3.5));

    let negative_val = urltron!(-123);
    assert_eq!(negative_val, Value::Number(-123.0));

    let big_val = urltron!(-3e100);
    assert_eq!(big_val, Value::Number(-3e100));
}

#[test]
fn test_urltron_macro_strings() {
    let string_val = urltron!("hello world");
    assert_eq!(string_val, Value::String("hello world".to_string()));

    let empty_string = urltron!("");
    assert_eq!(empty_string, Value::String("".to_string()));
}

#[test]
fn test_urltron_macro_arrays() {
    let empty_array = urltron!([]);
    assert_eq!(empty_array, Value::Array(vec![]));

    let number_array = urltron!([1, 2, 3]);
    assert_eq!(
        number_array,
        Value::Array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ])
    );

    let mixed_array = urltron!([1, "hello", true, null, -0.5]);
    assert_eq!(
        mixed_array,
        Value::Array(vec![
            Value::Number(1.0),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
            Value::Number(-0.5),
        ])
    );
}

#[test]
fn test_urltron_macro_objects() {
    let empty_object = urltron!({});
    assert_eq!(empty_object, Value::Object(Map::new()));

    let simple_object = urltron!({
        "name": "Alice",
        "age": 30,
    });

    match simple_object {
        Value::Object(ref obj) => {
            assert_eq!(obj.len(), 2);
            assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
            assert_eq!(obj.get("age"), Some(&Value::Number(30.0)));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_urltron_macro_nested() {
    let nested = urltron!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    match nested {
        Value::Object(ref obj) => {
            assert_eq!(obj.len(), 3);

            if let Some(Value::Object(user)) = obj.get("user") {
                assert_eq!(user.get("id"), Some(&Value::Number(123.0)));
                assert_eq!(user.get("name"), Some(&Value::String("Bob".to_string())));
                assert_eq!(user.get("active"), Some(&Value::Bool(true)));
            } else {
                panic!("Expected user to be an object");
            }

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags[0], Value::String("admin".to_string()));
                assert_eq!(tags[1], Value::String("developer".to_string()));
            } else {
                panic!("Expected tags to be an array");
            }

            assert_eq!(obj.get("count"), Some(&Value::Number(42.0)));
        }
        _ => panic!("Expected object"),
    }

    assert_eq!(
        stringify(&nested).unwrap(),
        "user=(id=123&name=Bob&active)&tags=@(admin,developer)&count=42"
    );
}

#[test]
fn test_urltron_macro_expressions() {
    let limit = 25u32;
    let names = vec!["a", "b"];
    let value = urltron!({
        "limit": limit,
        "next": limit + 25,
        "names": names,
        "missing": None::<String>
    });

    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("limit"), Some(&Value::Number(25.0)));
    assert_eq!(obj.get("next"), Some(&Value::Number(50.0)));
    assert_eq!(
        obj.get("names"),
        Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
    );
    assert_eq!(obj.get("missing"), Some(&Value::Null));
}

#[test]
fn test_urltron_value_methods() {
    let null_val = urltron!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());
    assert_eq!(null_val.type_name(), "null");

    let bool_val = urltron!(true);
    assert!(bool_val.is_bool());
    assert_eq!(bool_val.as_bool(), Some(true));
    assert_eq!(bool_val.type_name(), "boolean");

    let num_val = urltron!(-7);
    assert_eq!(num_val.as_f64(), Some(-7.0));
    assert_eq!(num_val.as_i64(), Some(-7));
    assert_eq!(num_val.as_u64(), None);

    let str_val = urltron!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = urltron!([1, 2, 3]);
    assert!(array_val.is_array());
    assert_eq!(array_val.as_array().unwrap().len(), 3);

    let obj_val = urltron!({"key": "value"});
    assert!(obj_val.is_object());
    assert_eq!(obj_val.as_object().unwrap().len(), 1);
    assert_eq!(obj_val.type_name(), "object");
}
