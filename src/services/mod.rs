pub mod extraction_service;
pub mod quiz_generator;
pub mod scorer;
pub mod uploader;

pub use extraction_service::ExtractionService;
pub use quiz_generator::{QuizGenerator, MIN_CONTENT_CHARS};
pub use scorer::{QuizResults, ResultDetail, Scorer};
pub use uploader::Uploader;
