pub fn quote(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Joins a namespace and a short name into a full name.
pub fn full_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_owned()
    } else {
        format!("{}.{}", namespace, name)
    }
}
