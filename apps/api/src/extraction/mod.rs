pub mod completeness;
pub mod handlers;
pub mod normalize;
pub mod photo;
pub mod pipeline;
pub mod prompts;
pub mod structured;
pub mod upload;
