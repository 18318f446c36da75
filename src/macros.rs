/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// ```rust
/// use urltron::{urltron, Value};
///
/// let value = urltron!({
///     "select": ["id", "name"],
///     "limit": -1,
///     "fullTable": true
/// });
/// assert_eq!(value.as_object().unwrap().get("limit"), Some(&Value::Number(-1.0)));
/// ```
///
/// Any other Rust expression is converted with [`to_value`](crate::to_value)
/// and becomes `Value::Null` if that fails.
#[macro_export]
macro_rules! urltron {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($tt:tt)+ ]) => {{
        let mut array = ::std::vec::Vec::new();
        $crate::urltron_internal!(@array array () $($tt)+);
        $crate::Value::Array(array)
    }};

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut object = $crate::Map::new();
        $crate::urltron_internal!(@object object $($tt)+);
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}

// Splits element and value tokens on top-level commas, so multi-token
// expressions such as `-1` can appear inside arrays and objects.
#[macro_export]
#[doc(hidden)]
macro_rules! urltron_internal {
    (@array $array:ident ()) => {};

    (@array $array:ident ($($elem:tt)+)) => {
        $array.push($crate::urltron!($($elem)+));
    };

    (@array $array:ident ($($elem:tt)+) , $($rest:tt)*) => {
        $array.push($crate::urltron!($($elem)+));
        $crate::urltron_internal!(@array $array () $($rest)*);
    };

    (@array $array:ident ($($elem:tt)*) $next:tt $($rest:tt)*) => {
        $crate::urltron_internal!(@array $array ($($elem)* $next) $($rest)*);
    };

    (@object $object:ident) => {};

    (@object $object:ident $key:literal : $($rest:tt)+) => {
        $crate::urltron_internal!(@value $object $key () $($rest)+);
    };

    (@value $object:ident $key:literal ($($value:tt)+)) => {
        $object.insert($key.to_string(), $crate::urltron!($($value)+));
    };

    (@value $object:ident $key:literal ($($value:tt)+) , $($rest:tt)*) => {
        $object.insert($key.to_string(), $crate::urltron!($($value)+));
        $crate::urltron_internal!(@object $object $($rest)*);
    };

    (@value $object:ident $key:literal ($($value:tt)*) $next:tt $($rest:tt)*) => {
        $crate::urltron_internal!(@value $object $key ($($value)* $next) $($rest)*);
    };
}
