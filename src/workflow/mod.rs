pub mod pipeline;
pub mod provision;
pub mod stage;
