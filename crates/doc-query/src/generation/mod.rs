//! Answer generation against the hosted model API

pub mod chat;
pub mod prompt;
pub mod synthesizer;

pub use chat::ChatClient;
pub use prompt::PromptBuilder;
pub use synthesizer::AnswerSynthesizer;
