// NuPhy Halo keyboard library
// Device handles, state snapshots and simulation on top of nuga-keyboard

pub mod device;
pub mod dump;
pub mod error;

pub use device::{Device, Features};
pub use dump::{open_simulation, restore, State};
pub use error::DumpError;
