use serde::{Deserialize, Serialize};

/// Envelope for every backend response.
///
/// `success` is authoritative: a response carrying `data` but reporting
/// `success: false` is still a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Creates a failed envelope with the given error text.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Extracts the payload of a successful response.
    ///
    /// Returns the envelope's `error` text (or `default_msg` when the backend
    /// sent none) if the call failed or the payload is missing.
    pub fn into_data(self, default_msg: &str) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| default_msg.to_string())),
        }
    }

    /// Like [`into_data`](Self::into_data) for endpoints that return no payload.
    pub fn into_unit(self, default_msg: &str) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.error.unwrap_or_else(|| default_msg.to_string()))
        }
    }
}
