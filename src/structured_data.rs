use serde_json::Value;

const TYPE_KEY: &str = "@type";

/// Parses one JSON-LD block and returns the `@type` names it declares.
///
/// An object contributes its own `@type`; a top-level array contributes the
/// `@type` of each element in order. A `@type` holding a list of names
/// contributes every string in it.
pub fn parse_structured_data_types(block: &str) -> Result<Vec<String>, serde_json::Error> {
    let value: Value = serde_json::from_str(block)?;

    let mut types = Vec::new();
    match &value {
        Value::Object(_) => push_type(&value, &mut types),
        Value::Array(items) => {
            for item in items {
                push_type(item, &mut types);
            }
        }
        _ => {}
    }
    Ok(types)
}

fn push_type(value: &Value, types: &mut Vec<String>) {
    match value.get(TYPE_KEY) {
        Some(Value::String(name)) if !name.is_empty() => types.push(name.clone()),
        Some(Value::Array(names)) => types.extend(
            names
                .iter()
                .filter_map(Value::as_str)
                .filter(|name| !name.is_empty())
                .map(String::from),
        ),
        _ => {}
    }
}
