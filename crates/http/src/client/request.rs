//! Re-sendable request descriptions
//!
//! A `reqwest::RequestBuilder` is consumed when sent and multipart bodies
//! cannot be cloned, so the pipeline works from an [`ApiRequest`] and builds
//! a fresh transport request for every attempt.

use super::ClientError;
use bytes::Bytes;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::Path;

/// Method, path, query and body of one backend call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

/// Request payload
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(JsonValue),
    Multipart(MultipartForm),
}

impl ApiRequest {
    /// Request for `path`, which is either relative to the base URL or absolute
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a single query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Append every non-null field of a serializable struct as query parameters
    ///
    /// Parameters keep the struct's field order.
    ///
    /// # Errors
    ///
    /// Fails if `params` does not serialize to a flat JSON object
    pub fn query<T: Serialize>(mut self, params: &T) -> Result<Self, ClientError> {
        match serde_json::to_value(params)? {
            JsonValue::Null => {}
            JsonValue::Object(map) => {
                for (name, value) in map {
                    match value {
                        JsonValue::Null => {}
                        JsonValue::String(s) => self.query.push((name, s)),
                        JsonValue::Array(_) | JsonValue::Object(_) => {
                            return Err(ClientError::Configuration(format!(
                                "query parameter '{name}' is not a scalar"
                            )));
                        }
                        other => self.query.push((name, other.to_string())),
                    }
                }
            }
            _ => {
                return Err(ClientError::Configuration(
                    "query parameters must be an object".into(),
                ));
            }
        }
        Ok(self)
    }

    /// JSON body
    ///
    /// # Errors
    ///
    /// Fails if `body` cannot be serialized
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// `multipart/form-data` body
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Resolve the target URL against `base_url`
    pub(crate) fn url(&self, base_url: &str) -> String {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            self.path.clone()
        } else {
            format!("{base_url}{}", self.path)
        }
    }

    /// Build a transport request on `client`
    pub(crate) fn build(
        &self,
        client: &reqwest::Client,
        base_url: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let mut builder = client.request(self.method.clone(), self.url(base_url));
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        builder = match &self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            // reqwest sets the multipart content type with its boundary
            RequestBody::Multipart(form) => builder.multipart(form.to_form()?),
        };
        Ok(builder)
    }
}

/// Ordered list of form fields and files
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

#[derive(Debug, Clone)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a text field only when `value` is present
    pub fn text_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.text(name, value.to_string()),
            None => self,
        }
    }

    /// Add a text field only when `value` is present and non-empty
    pub fn text_non_empty(self, name: &str, value: Option<&str>) -> Self {
        self.text_opt(name, value.filter(|v| !v.is_empty()))
    }

    /// Booleans travel as `"true"` / `"false"`
    pub fn flag(self, name: &str, value: Option<bool>) -> Self {
        self.text_opt(name, value)
    }

    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file,
        });
        self
    }

    pub fn file_opt(self, name: &str, file: Option<FileUpload>) -> Self {
        match file {
            Some(file) => self.file(name, file),
            None => self,
        }
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Text value of the first field called `name`
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn to_form(&self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File { name, file } => form.part(name.clone(), file.to_part()?),
            };
        }
        Ok(form)
    }
}

/// File contents held in memory so every attempt can re-send them
#[derive(Debug, Clone)]
pub struct FileUpload {
    file_name: String,
    mime: Option<String>,
    data: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            data: data.into(),
        }
    }

    /// Read a file from disk, guessing the MIME type from the extension
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = path
            .extension()
            .and_then(|ext| mime_for_extension(&ext.to_string_lossy()))
            .map(str::to_string);
        Ok(Self {
            file_name,
            mime,
            data: data.into(),
        })
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn to_part(&self) -> Result<Part, ClientError> {
        let part = Part::stream_with_length(self.data.clone(), self.data.len() as u64)
            .file_name(self.file_name.clone());
        match &self.mime {
            Some(mime) => Ok(part.mime_str(mime)?),
            None => Ok(part),
        }
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
