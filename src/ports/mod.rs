//! Port traits: the seams between the analysis core and the outside world.

pub mod config_port;
pub mod data_port;
pub mod render_port;
