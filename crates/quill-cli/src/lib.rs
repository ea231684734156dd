// Library interface for quill-cli so integration tests can reach the
// command and rendering modules that main.rs also declares.

#[path = "commands.rs"]
pub mod commands;

#[path = "render.rs"]
pub mod render;

pub use commands::{complete, highlight, parse_script, replay, tokens, ReplayReport, ScriptStep};
pub use render::render_ansi;
