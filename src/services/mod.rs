pub mod console;
pub mod session_service;

pub use console::ConsoleService;
pub use session_service::SessionService;
