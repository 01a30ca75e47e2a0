//! Shared HTTP plumbing: envelope responses, the edge error type and the
//! request extractors every handler module uses.

pub mod api_error;
pub mod dto;
pub mod extractors;
pub mod response;
pub mod validated_json;

pub use api_error::{ApiError, ApiResult};
pub use dto::{DeletedResponse, MessageResponse};
pub use extractors::{ApiPath, ListParams, Pagination, RawListQuery};
pub use response::status_for_code;
pub use validated_json::ValidatedJson;
