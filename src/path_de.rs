use serde::de::DeserializeOwned;

use crate::error::GenError;

/// Deserialize a schema or config document, reporting the JSON path of the
/// first offending value. `wrap` turns the message into the caller's error
/// variant.
pub fn from_str_with_path<T, F>(src: &str, wrap: F) -> Result<T, GenError>
where
    T: DeserializeOwned,
    F: FnOnce(String) -> GenError,
{
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(wrap(format!("at JSON path {path} → {}", err.into_inner())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn error_message_names_the_json_path() {
        let src = r#"{"a": {"b": "not a number"}}"#;
        let err = from_str_with_path::<BTreeMap<String, BTreeMap<String, u32>>, _>(src, |message| {
            GenError::Config { path: "test.json".into(), message }
        })
        .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("a.b"), "{text}");
        assert!(text.contains("test.json"), "{text}");
    }
}
