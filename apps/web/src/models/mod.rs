pub mod resume;

pub use resume::{ResumeFields, SessionData};
