pub mod app;
pub mod components;
pub mod effect;
pub mod scenes;
pub mod terminal_guard;

pub use app::App;
pub use effect::Effect;
pub use scenes::SceneView;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
