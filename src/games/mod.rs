//! Game implementations.

pub mod voxels;
