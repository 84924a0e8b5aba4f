use serde::{Deserialize, Serialize};

/// HTTP methods the store protocol uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
        }
    }
}

/// A request to the store service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HttpRequest {
    #[serde(default)]
    pub method: Method,

    /// Absolute URL of the endpoint.
    pub url: String,

    /// Request body (will be JSON-serialized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Serialize) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// HTTP response from the store service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Raw body text
    #[serde(default)]
    pub body_text: String,
}

impl HttpResponse {
    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Try to deserialize the body into a specific type
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_helpers() {
        let ok = HttpResponse {
            status: 201,
            status_text: "Created".to_string(),
            body_text: String::new(),
        };
        assert!(ok.is_success());
        assert!(!ok.is_not_found());

        let missing = HttpResponse {
            status: 404,
            status_text: "Not Found".to_string(),
            body_text: String::new(),
        };
        assert!(!missing.is_success());
        assert!(missing.is_not_found());
    }

    #[test]
    fn json_body_parsing() {
        let response = HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            body_text: r#"{"content":"{}"}"#.to_string(),
        };
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["content"], "{}");
    }

    #[test]
    fn request_builders() {
        let request = HttpRequest::post("http://store/api/cafs/store")
            .with_body(serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(serde_json::json!({"a": 1})));

        let request = HttpRequest::get("http://store/api/cafs/retrieve/x");
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
    }
}
