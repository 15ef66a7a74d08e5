//! Core value types shared by the engine and the agents.
//!
//! Everything here is `Copy` or cheaply cloneable and carries no game rules:
//!
//! - [`Position`] - integer grid cell, `(column, row)` with row 0 at the bottom
//! - [`Point`] - real-valued agent location, possibly between two cells
//! - [`Action`] - the four moves plus [`Action::Stop`]
//! - [`Team`] - red (left half, even agent indices) or blue (right half, odd indices)
//! - [`Grid`] - dense rectangular storage addressed by [`Position`]

pub use self::{action::*, grid::*, position::*, team::*};

mod action;
mod grid;
mod position;
mod team;
