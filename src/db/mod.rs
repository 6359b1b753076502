pub mod analytics_queries;
pub mod inquiry_queries;
