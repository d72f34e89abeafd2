//! Visa domain module.
//!
//! Holds the user's work-authorization inquiry, the fixed-order detail
//! collection that completes it, and the table of canned guidance texts.

mod details;
mod response_table;
mod values;

pub use details::{DetailCollector, DetailProgress, DetailStep};
pub use response_table::{select_response, ResponseEntry, VisaGuidance, RESPONSE_TABLE};
pub use values::{
    normalize_visa_type, normalize_work_type, InquiryKind, UserInfo, DEFAULT_OCCUPATION_STATUS,
    DEFAULT_VISA_TYPE, DEFAULT_WORK_TYPE,
};
