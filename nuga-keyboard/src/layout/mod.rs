// Keyboard layout module
// Maps raw key-code slots onto named physical keys, per model

pub mod keymap;
pub mod registry;
pub mod template;

pub use keymap::KeyMap;
pub use registry::{template_registry, TemplateRegistry, TemplateSource};
pub use template::{Template, TemplateError, TemplateFile};
