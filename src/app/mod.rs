// App layer: terminal front end (interactive session and result rendering).

pub mod render;
pub mod session;

pub use render::OutputFormat;
pub use session::Session;
