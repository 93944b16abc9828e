pub mod chat;
pub mod health;
pub mod workout;

pub use chat::chat;
pub use health::health;
pub use workout::generate_workout;
