//! Core domain types for voxel carving.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A voxel coordinate submitted by a player.
///
/// Components are signed so that negative guesses can be represented and
/// rejected as out of bounds instead of failing to parse. Ordering is
/// lexicographic on `(x, y, z)`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_new::new,
)]
#[serde(from = "[i64; 3]", into = "[i64; 3]")]
#[display("({x}, {y}, {z})")]
pub struct Voxel {
    /// Column within a row.
    pub x: i64,
    /// Row within a layer.
    pub y: i64,
    /// Layer.
    pub z: i64,
}

impl From<[i64; 3]> for Voxel {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Voxel> for [i64; 3] {
    fn from(voxel: Voxel) -> Self {
        [voxel.x, voxel.y, voxel.z]
    }
}

/// Axis a clue line runs along.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Axis {
    /// Line varies `x`; fixed `(y, z)`.
    X,
    /// Line varies `y`; fixed `(x, z)`.
    Y,
    /// Line varies `z`; fixed `(x, y)`.
    Z,
}

/// Split classification attached to a clue.
///
/// Escalates once for every void cell seen after the first solid cell on a
/// line, saturating at [`Split::Split3Plus`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Split {
    /// No void seen after a solid cell.
    #[default]
    NoSplit,
    /// One void seen after a solid cell.
    Split2,
    /// Two or more voids seen after a solid cell.
    Split3Plus,
}

impl Split {
    /// Returns the next classification, saturating at `Split3Plus`.
    pub fn advance(self) -> Self {
        match self {
            Split::NoSplit => Split::Split2,
            Split::Split2 | Split::Split3Plus => Split::Split3Plus,
        }
    }
}
