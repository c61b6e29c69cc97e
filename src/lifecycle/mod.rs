//! Console lifecycle: startup, shutdown and tracing setup.

pub mod console;
pub mod tracing;

pub use console::AdminConsole;
pub use self::tracing::setup_tracing;
