//! Cloth error types.

use thiserror::Error;

/// Errors that can occur while building or stepping a cloth.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// `step` was called before any mesh data was installed.
    #[error("cloth mesh has not been generated")]
    MeshNotGenerated,

    /// Installed mesh does not match the grid's vertex count.
    #[error("mesh has {actual} vertices, grid expects {expected}")]
    MeshSizeMismatch {
        /// Vertex count implied by the grid divisions.
        expected: usize,
        /// Vertex count of the supplied mesh.
        actual: usize,
    },

    /// A triangle index points past the end of the vertex array.
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Index list length is not a multiple of three.
    #[error("index count {0} is not a multiple of 3")]
    InvalidIndexCount(usize),

    /// Cloth width or length is not a positive finite number.
    #[error("invalid cloth dimensions: {width} x {length}")]
    InvalidDimensions {
        /// Requested width.
        width: f32,
        /// Requested length.
        length: f32,
    },

    /// Grid must have at least one division on each axis.
    #[error("invalid grid divisions: {x} x {y}")]
    InvalidDivisions {
        /// Divisions along X.
        x: u32,
        /// Divisions along Y (world Z).
        y: u32,
    },

    /// Sphere radius must be positive and finite.
    #[error("invalid sphere radius: {0}")]
    InvalidSphere(f32),

    /// Ground rectangle must have positive finite extents.
    #[error("invalid ground rectangle: {width} x {length}")]
    InvalidGround {
        /// Requested width.
        width: f32,
        /// Requested length.
        length: f32,
    },

    /// Frame delta must be finite and non-negative.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f32),

    /// At least one substep is required.
    #[error("iteration count must be at least 1")]
    InvalidIterations,
}

/// Result alias for cloth operations.
pub type Result<T> = std::result::Result<T, ClothError>;
