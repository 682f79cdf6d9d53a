//! Occupancy grid for one puzzle.

use super::puzzle::PuzzleError;
use super::types::{Axis, Voxel};
use tracing::instrument;

/// Dense 3D occupancy grid. `true` cells are solid, `false` cells are void.
///
/// Cells are stored flat, layer by layer (`z`), then row by row (`y`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Builds a grid from nested layers indexed `[z][y][x]`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptyGrid`] if any dimension is zero and
    /// [`PuzzleError::Ragged`] if rows or layers disagree in length.
    #[instrument(skip(layers), fields(layers = layers.len()))]
    pub fn from_layers(layers: Vec<Vec<Vec<bool>>>) -> Result<Self, PuzzleError> {
        let size_z = layers.len();
        let size_y = layers.first().map_or(0, Vec::len);
        let size_x = layers
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, Vec::len);

        if size_x == 0 || size_y == 0 || size_z == 0 {
            return Err(PuzzleError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(size_x * size_y * size_z);
        for (z, layer) in layers.into_iter().enumerate() {
            if layer.len() != size_y {
                return Err(PuzzleError::Ragged {
                    z,
                    y: None,
                    expected: size_y,
                    found: layer.len(),
                });
            }
            for (y, row) in layer.into_iter().enumerate() {
                if row.len() != size_x {
                    return Err(PuzzleError::Ragged {
                        z,
                        y: Some(y),
                        expected: size_x,
                        found: row.len(),
                    });
                }
                cells.extend(row);
            }
        }

        Ok(Self {
            size_x,
            size_y,
            size_z,
            cells,
        })
    }

    /// Returns `(size_x, size_y, size_z)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    /// Checks whether `0 <= x < size_x`, `0 <= y < size_y` and `0 <= z < size_z`.
    pub fn in_bounds(&self, voxel: Voxel) -> bool {
        self.index(voxel).is_some()
    }

    /// Returns whether the voxel is solid, or `None` when it is out of bounds.
    pub fn is_solid(&self, voxel: Voxel) -> Option<bool> {
        self.index(voxel).map(|i| self.cells[i])
    }

    /// Iterates every void voxel in `z`, `y`, `x` order.
    pub fn void_voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, solid)| !**solid)
            .map(|(i, _)| self.voxel_at(i))
    }

    /// Number of void voxels in the grid.
    pub fn void_count(&self) -> usize {
        self.cells.iter().filter(|solid| !**solid).count()
    }

    /// Length of a line running along `axis`.
    pub fn line_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.size_x,
            Axis::Y => self.size_y,
            Axis::Z => self.size_z,
        }
    }

    /// Cells of the line along `axis` at fixed coordinates `(coord1, coord2)`.
    ///
    /// The fixed pair is `(y, z)` for X, `(x, z)` for Y and `(x, y)` for Z.
    /// A pair outside the grid yields an empty line.
    pub fn line(&self, axis: Axis, coord1: usize, coord2: usize) -> impl Iterator<Item = bool> + '_ {
        let (limit1, limit2) = match axis {
            Axis::X => (self.size_y, self.size_z),
            Axis::Y => (self.size_x, self.size_z),
            Axis::Z => (self.size_x, self.size_y),
        };
        let len = if coord1 < limit1 && coord2 < limit2 {
            self.line_len(axis)
        } else {
            0
        };
        (0..len).map(move |idx| {
            let (x, y, z) = match axis {
                Axis::X => (idx, coord1, coord2),
                Axis::Y => (coord1, idx, coord2),
                Axis::Z => (coord1, coord2, idx),
            };
            self.cells[self.flat(x, y, z)]
        })
    }

    fn flat(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.size_y + y) * self.size_x + x
    }

    fn index(&self, voxel: Voxel) -> Option<usize> {
        let x = usize::try_from(voxel.x).ok().filter(|&x| x < self.size_x)?;
        let y = usize::try_from(voxel.y).ok().filter(|&y| y < self.size_y)?;
        let z = usize::try_from(voxel.z).ok().filter(|&z| z < self.size_z)?;
        Some(self.flat(x, y, z))
    }

    fn voxel_at(&self, i: usize) -> Voxel {
        let x = i % self.size_x;
        let y = (i / self.size_x) % self.size_y;
        let z = i / (self.size_x * self.size_y);
        Voxel::new(x as i64, y as i64, z as i64)
    }
}
