mod analytics;
mod content;
mod forecast;
mod inquiry;

pub use analytics::*;
pub use content::*;
pub use forecast::*;
pub use inquiry::{Inquiry, InquiryResponseDraft, InquiryResponseRequest};
