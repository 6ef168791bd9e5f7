mod extract;
mod response;
mod validated_json;

pub use extract::{ApiPath, ApiQuery, ExtractRejection};
pub use response::{ApiResponse, PaginatedResponse};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
