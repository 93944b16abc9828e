pub mod chat;
pub mod workout;

pub use chat::{ChatMode, ChatRequest, ChatResponse};
pub use workout::WorkoutProfile;
