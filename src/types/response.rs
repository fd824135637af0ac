use serde::Serialize;

/// Body of successful reads: the payload wrapped in `data`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Body of successful writes. Creations also carry the stored record.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T = ()> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
            data: None,
        }
    }
}

impl<T> MessageResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        MessageResponse {
            message: message.into(),
            data: Some(data),
        }
    }
}
