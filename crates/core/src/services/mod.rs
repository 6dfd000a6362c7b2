pub mod aggregator_service;
pub mod classifier_service;
pub mod recurring_service;
pub mod source_service;
pub mod summarizer_service;
