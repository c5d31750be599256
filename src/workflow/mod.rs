pub mod detect;
pub mod event;
pub mod pipeline;
pub mod publish;
pub mod summarize;
