//! High-level keyboard interface for NuPhy Halo keyboards
//!
//! This crate turns the raw buffers of the keyboard protocol into typed
//! values and back, on top of any [`nuga_transport::Transport`]:
//!
//! - key assignments ([`Keys`]), named through per-model layout templates
//! - macros ([`Macros`])
//! - backlight colors and lighting effects ([`Light`])
//! - an in-memory keyboard for tests and offline editing ([`simulation`])

pub mod bytes;
pub mod colors;
pub mod effects;
pub mod error;
pub mod keys;
pub mod layout;
pub mod light;
pub mod macros;
pub mod model;
pub mod simulation;

pub use colors::{palette, BacklightColors};
pub use effects::{Effects, LightParams};
pub use error::KeyboardError;
pub use keys::{KeySystem, Keys, KeysFeature};
pub use layout::{template_registry, KeyMap, Template, TemplateRegistry, TemplateSource};
pub use light::{Light, LightFeature};
pub use macros::{ActionKind, Macro, MacroAction, Macros};
pub use model::Model;
pub use simulation::{KeysSimulation, KeysState, LightSimulation, LightState};
