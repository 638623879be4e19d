pub mod formatter;
pub mod gateway;
pub mod providers;
pub mod templates;

pub use formatter::PromptFormatter;
pub use gateway::ModelGateway;
pub use templates::TemplateRegistry;
