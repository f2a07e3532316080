pub mod status;

pub use status::{OperationStatus, display_field, display_status, format_status, use_color};
