use serde::Serialize;
use utoipa::ToSchema;

/// Payload of a successful delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
