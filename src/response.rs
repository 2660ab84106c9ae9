use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code and body of one Elasticsearch request, exactly as received.
///
/// Error statuses are returned here too; check [`Response::is_success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body
    pub body: String,
}

impl Response {
    pub fn new(status_code: u16, body: String) -> Self {
        Response { status_code, body }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Deserialize the body into the provided type
    pub fn json<T>(&self) -> Result<T, crate::error::EsError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|e| e.into())
    }

    /// Parse the body as an untyped JSON value
    pub fn value(&self) -> Result<Value, crate::error::EsError> {
        self.json()
    }

    /// Get a value from the JSON body by a slash-separated path.
    /// For example, "hits/hits/0/_id" reads the id of the first search hit.
    /// Returns `None` when the body is not JSON or the path does not exist.
    ///
    /// Parses the body on every call; for several lookups parse once with
    /// [`Response::value`] and use [`get_path`].
    pub fn get(&self, path: &str) -> Option<Value> {
        let value = self.value().ok()?;
        get_path(&value, path).cloned()
    }

    /// Get a string value from the JSON body by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Get a value from parsed JSON by a slash-separated path.
/// Numeric segments index into arrays.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('/').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "took": 3,
        "hits": {
            "total": {"value": 2},
            "hits": [
                {"_id": "1", "_source": {"title": "Dune"}},
                {"_id": "2", "_source": {"title": "Emma"}}
            ]
        }
    }"#;

    #[test]
    fn test_status_helpers() {
        assert!(Response::new(201, String::new()).is_success());
        assert!(!Response::new(404, String::new()).is_success());
        assert!(Response::new(404, String::new()).is_not_found());
        assert!(!Response::new(500, String::new()).is_not_found());
    }

    #[test]
    fn test_response_get() {
        let response = Response::new(200, SEARCH_BODY.to_string());
        assert_eq!(response.get_string("hits/hits/1/_id"), Some("2".to_string()));
        assert_eq!(
            response.get_string("hits/hits/0/_source/title"),
            Some("Dune".to_string())
        );
        assert_eq!(response.get("hits/total/value"), Some(serde_json::json!(2)));
        assert_eq!(response.get("hits/hits/5"), None);
        assert_eq!(response.get_string("took"), None);
    }

    #[test]
    fn test_get_path_borrows_parsed_value() {
        let response = Response::new(200, SEARCH_BODY.to_string());
        let value = response.value().unwrap();

        let hits = get_path(&value, "hits/hits").and_then(Value::as_array).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(get_path(&value, "hits/hits/1/_source/title"), Some(&Value::from("Emma")));
        assert_eq!(get_path(&value, "took/deeper"), None);
        assert_eq!(get_path(&value, ""), Some(&value));
    }

    #[test]
    fn test_response_get_non_json() {
        let response = Response::new(502, "Bad Gateway".to_string());
        assert_eq!(response.get("anything"), None);
        assert!(response.value().is_err());
    }

    #[test]
    fn test_response_json() {
        #[derive(Deserialize)]
        struct Indexed {
            _id: String,
            result: String,
        }

        let response = Response::new(201, r#"{"_id":"42","result":"created"}"#.to_string());
        let indexed: Indexed = response.json().unwrap();
        assert_eq!(indexed._id, "42");
        assert_eq!(indexed.result, "created");
    }
}
