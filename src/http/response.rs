use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Which status codes success and bad-input replies use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMode {
  /// 200 for list/delete/patch, 400 for malformed input
  #[default]
  Standard,
  /// 302 for list/delete/patch, 500 for malformed input
  Legacy,
}

impl StatusMode {
  /// Status for a successful list, delete or patch
  pub fn found(self) -> StatusCode {
    match self {
      StatusMode::Standard => StatusCode::OK,
      StatusMode::Legacy => StatusCode::FOUND,
    }
  }

  /// Status for a request body that could not be accepted
  pub fn bad_input(self) -> StatusCode {
    match self {
      StatusMode::Standard => StatusCode::BAD_REQUEST,
      StatusMode::Legacy => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// Reply body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
  /// Plain text, used for every status message
  Text(String),
  /// JSON document, used for the account listing
  Json(serde_json::Value),
}

/// Status code, body and extra headers produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
  pub status: StatusCode,
  pub body: Body,
  pub headers: HeaderMap,
}

impl Reply {
  pub fn text(status: StatusCode, msg: impl Into<String>) -> Self {
    Self {
      status,
      body: Body::Text(msg.into()),
      headers: HeaderMap::new(),
    }
  }

  pub fn json(status: StatusCode, value: serde_json::Value) -> Self {
    Self {
      status,
      body: Body::Json(value),
      headers: HeaderMap::new(),
    }
  }

  /// 405 with an `Allow` header naming the supported methods
  pub fn method_not_allowed() -> Self {
    let mut reply = Self::text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    reply.headers.insert(
      header::ALLOW,
      HeaderValue::from_static("GET, POST, PATCH, DELETE"),
    );
    reply
  }

  /// Text of the body, if it is plain text
  pub fn text_body(&self) -> Option<&str> {
    match &self.body {
      Body::Text(s) => Some(s.as_str()),
      Body::Json(_) => None,
    }
  }
}

impl IntoResponse for Reply {
  fn into_response(self) -> Response {
    let mut response = match self.body {
      Body::Text(s) => (self.status, s).into_response(),
      Body::Json(value) => (self.status, axum::Json(value)).into_response(),
    };
    response.headers_mut().extend(self.headers);
    response
  }
}
