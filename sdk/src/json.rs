use lancaster_schema::Value;
use serde_json::{Number, Value as Json};

/// Renders a decoded value as JSON.
///
/// Bytes become a string with one code point per byte, the way Avro's JSON
/// encoding writes them. Non-finite floats have no JSON form and become `null`.
/// Maps keep their entry order; when a key repeats, the last value wins.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(value) => Json::Bool(*value),
        Value::Int(value) => Json::from(*value),
        Value::Float(value) => Number::from_f64(*value).map_or(Json::Null, Json::Number),
        Value::Bytes(bytes) => Json::String(bytes.iter().copied().map(char::from).collect()),
        Value::String(value) => Json::String(value.clone()),
        Value::List(values) => Json::Array(values.iter().map(to_json).collect()),
        Value::Map(entries) => Json::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars() {
        assert_eq!(to_json(&Value::Null), json!(null));
        assert_eq!(to_json(&Value::Bool(true)), json!(true));
        assert_eq!(to_json(&Value::Int(-7)), json!(-7));
        assert_eq!(to_json(&Value::Float(1.5)), json!(1.5));
        assert_eq!(to_json(&Value::Float(f64::NAN)), json!(null));
        assert_eq!(to_json(&Value::Bytes(vec![0x61, 0x00, 0xff])), json!("a\u{0}\u{ff}"));
    }

    #[test]
    fn json_keeps_map_order() {
        let value = Value::Map(vec![
            ("zeta".to_owned(), Value::List(vec![Value::Int(1), Value::Null])),
            ("alpha".to_owned(), Value::String("x".to_owned())),
        ]);
        assert_eq!(
            serde_json::to_string(&to_json(&value)).unwrap(),
            r#"{"zeta":[1,null],"alpha":"x"}"#
        );
    }
}
