use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

pub use gametracker_shared::protocol::HttpMethod;

// =========================================================
// HTTP interface abstraction
// =========================================================

/// A file part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Transport-neutral multipart body. The browser client turns it into a
/// `FormData`; tests inspect it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json(self, body: String) -> Self {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(RequestBody::Json(body));
        req
    }

    /// The transport sets the multipart boundary header itself.
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Json(body)) => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body; an empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            ApiError::decode(format!("unexpected response body: {}", e)).with_source(e)
        })
    }
}

/// HTTP client trait.
/// `?Send` because browser fetch futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// Resolves with any status the server returned; only transport
    /// failures are errors.
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// Test double: MockHttpClient
// =========================================================

#[cfg(test)]
pub use mock::MockHttpClient;

#[cfg(test)]
mod mock {
    use super::*;
    use std::cell::RefCell;

    /// Canned responses keyed by `(method, url)`. Unknown routes answer 404.
    pub struct MockHttpClient {
        responses: RefCell<HashMap<(HttpMethod, String), (u16, String)>>,
        offline: RefCell<bool>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                offline: RefCell::new(false),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn mock_response(
            &self,
            method: HttpMethod,
            url: &str,
            status: u16,
            body: serde_json::Value,
        ) {
            self.mock_text(method, url, status, &body.to_string());
        }

        pub fn mock_text(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .insert((method, url.to_string()), (status, body.to_string()));
        }

        /// Every following request fails at the transport level.
        pub fn go_offline(&self) {
            *self.offline.borrow_mut() = true;
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.borrow_mut().push(req.clone());

            if *self.offline.borrow() {
                return Err(ApiError::network("connection refused"));
            }

            let responses = self.responses.borrow();
            match responses.get(&(req.method, req.url.clone())) {
                Some((status, body)) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }
}
