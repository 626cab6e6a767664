//! Data types shared by the grid algorithms and their hosts.

mod attrs;
mod cell;
mod selection;

pub use attrs::*;
pub use cell::*;
pub use selection::*;
