pub mod feedback;

pub use feedback::{AiFeedbackRequest, AiFeedbackResponse, FieldValue, InputData};
