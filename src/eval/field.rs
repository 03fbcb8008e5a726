use serde_json::Value;

/// Resolves a dotted path against an entity snapshot.
///
/// Walks one segment at a time and returns `None` ("undefined") as soon as
/// an intermediate value is null, missing, or not an object. A path whose
/// final segment holds an explicit JSON `null` resolves to `Some(Null)` —
/// the distinction matters to `isNull` versus a field that does not exist.
///
/// # Example
///
/// ```
/// use jidou::eval::get_field_value;
/// use serde_json::json;
///
/// let entity = json!({ "category": { "group": { "name": "Shopping" } } });
/// let name = get_field_value(&entity, "category.group.name");
/// assert_eq!(name, Some(&json!("Shopping")));
///
/// let entity = json!({ "payee": null });
/// assert_eq!(get_field_value(&entity, "payee.name"), None);
/// ```
pub fn get_field_value<'a>(entity: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = entity;
    for segment in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}
