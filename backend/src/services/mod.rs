pub mod chat_service;
pub mod dataset;
pub mod disease_matcher;
pub mod food_matcher;
pub mod language;
pub mod llm;
pub mod session;
pub mod similarity;
pub mod workout_service;

pub use chat_service::ChatService;
pub use dataset::{DiseaseTable, FoodTable};
pub use disease_matcher::DiseaseMatcher;
pub use food_matcher::FoodMatcher;
pub use language::{Language, detect_language};
pub use llm::{CompletionBackend, CompletionClient};
pub use session::SessionStore;
pub use workout_service::WorkoutService;
