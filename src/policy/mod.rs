//! Policies for the phases of the search
//!
//! - Selection policies: which root child receives the next playout
//! - Expansion: materialising a node's legal continuations
//! - Simulation policies: how a game is played out from a candidate move
//! - Backpropagation policies: how node statistics are updated

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use expansion::expand;
pub use selection::{SelectionPolicy, UctPolicy};
pub use simulation::{RandomPlayout, SimulationPolicy};
