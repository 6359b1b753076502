pub mod analytics_service;
pub mod assistant_service;
pub mod content_templates;
pub mod forecasting_service;
pub mod indicators;
pub mod insights;
pub mod llm_service;
pub mod series;
pub mod text_analysis;
pub mod trend;
