pub mod lenient;
pub mod resume;

pub use resume::ResumeRecord;
