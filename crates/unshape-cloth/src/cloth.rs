//! Cloth sheet state.
//!
//! A [`Cloth`] is a rectangular grid of Verlet vertices. It is created from
//! its dimensions and division counts, then populated with mesh data either by
//! [`Cloth::generate_mesh`] or [`Cloth::load_mesh`] before it can be stepped.

use glam::{UVec2, Vec2, Vec3};

use crate::buffer::{PackedVertex, VertexBuffer};
use crate::error::{ClothError, Result};
use crate::mesh::{ClothMesh, generate_grid};
use crate::topology::{EdgeAxis, EdgeClass, GridTopology, Link, Neighbors};

/// A vertex in the cloth simulation.
///
/// Velocity is implicit: `position - previous`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Current position (cloth-local).
    pub position: Vec3,
    /// Position at the previous substep.
    pub previous: Vec3,
    /// Shading normal, recomputed once per frame.
    pub normal: Vec3,
}

impl Vertex {
    /// Creates a vertex at rest.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            previous: position,
            normal: Vec3::Y,
        }
    }

    /// Implied displacement over the last substep.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.position - self.previous
    }
}

/// Rest lengths for each edge class, derived from grid spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestLengths {
    /// Spacing between adjacent columns.
    pub structural_x: f32,
    /// Spacing between adjacent rows.
    pub structural_y: f32,
    /// Two columns apart.
    pub bend_x: f32,
    /// Two rows apart.
    pub bend_y: f32,
    /// Across one cell.
    pub shear: f32,
}

impl RestLengths {
    /// Derives rest lengths from the per-cell spacing `(dx, dy)`.
    pub fn from_spacing(spacing: Vec2) -> Self {
        Self {
            structural_x: spacing.x,
            structural_y: spacing.y,
            bend_x: spacing.x * 2.0,
            bend_y: spacing.y * 2.0,
            shear: spacing.length(),
        }
    }

    /// Rest length for a link.
    #[inline]
    pub fn for_link(&self, link: &Link) -> f32 {
        match (link.class, link.axis) {
            (EdgeClass::Structural, EdgeAxis::Horizontal) => self.structural_x,
            (EdgeClass::Structural, _) => self.structural_y,
            (EdgeClass::Bend, EdgeAxis::Horizontal) => self.bend_x,
            (EdgeClass::Bend, _) => self.bend_y,
            (EdgeClass::Shear, _) => self.shear,
        }
    }
}

/// A rectangular cloth sheet.
#[derive(Debug, Clone)]
pub struct Cloth {
    /// World-space translation of the sheet.
    pub position: Vec3,
    /// Vertex color written into the packed buffer.
    pub color: Vec3,
    width: f32,
    length: f32,
    divisions: UVec2,
    rest: RestLengths,
    topology: GridTopology,
    neighbors: Vec<Neighbors>,
    vertices: Vec<Vertex>,
    rest_pose: Vec<Vec3>,
    buffer: VertexBuffer,
    indices: Vec<u32>,
}

impl Cloth {
    /// Creates a cloth descriptor without mesh data.
    ///
    /// # Arguments
    /// * `width` - Size along X in world units
    /// * `length` - Size along Z in world units
    /// * `divisions_x` - Number of cells along X
    /// * `divisions_y` - Number of cells along Z
    pub fn new(width: f32, length: f32, divisions_x: u32, divisions_y: u32) -> Result<Self> {
        if !(width.is_finite() && length.is_finite() && width > 0.0 && length > 0.0) {
            return Err(ClothError::InvalidDimensions { width, length });
        }
        if divisions_x == 0 || divisions_y == 0 {
            return Err(ClothError::InvalidDivisions {
                x: divisions_x,
                y: divisions_y,
            });
        }

        let divisions = UVec2::new(divisions_x, divisions_y);
        let spacing = Vec2::new(width, length) / divisions.as_vec2();
        let topology = GridTopology::from_divisions(divisions_x, divisions_y);

        Ok(Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            width,
            length,
            divisions,
            rest: RestLengths::from_spacing(spacing),
            topology,
            neighbors: topology.neighbor_table(),
            vertices: Vec::new(),
            rest_pose: Vec::new(),
            buffer: VertexBuffer::default(),
            indices: Vec::new(),
        })
    }

    /// Sets the world translation.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the vertex color used when the buffer is built.
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Generates a flat grid mesh and installs it.
    pub fn generate_mesh(&mut self) {
        let mesh = generate_grid(self.width, self.length, self.divisions);
        self.install(mesh);
    }

    /// Installs externally generated mesh data.
    ///
    /// The mesh must have exactly one vertex per grid point in row-major
    /// order, and every index must refer to an existing vertex.
    pub fn load_mesh(&mut self, mesh: ClothMesh) -> Result<()> {
        let expected = self.topology.vertex_count();
        if mesh.positions.len() != expected {
            return Err(ClothError::MeshSizeMismatch {
                expected,
                actual: mesh.positions.len(),
            });
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(ClothError::InvalidIndexCount(mesh.indices.len()));
        }
        if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= expected) {
            return Err(ClothError::IndexOutOfRange {
                index,
                vertex_count: expected,
            });
        }

        self.install(mesh);
        Ok(())
    }

    fn install(&mut self, mesh: ClothMesh) {
        self.vertices = mesh.positions.iter().map(|&p| Vertex::new(p)).collect();
        self.buffer = VertexBuffer::new(
            mesh.positions
                .iter()
                .map(|&p| PackedVertex::new(p, Vec3::Y, self.color))
                .collect(),
        );
        self.rest_pose = mesh.positions;
        self.indices = mesh.indices;
    }

    /// Restores the installed mesh pose with zero velocity.
    pub fn reset(&mut self) {
        for (vertex, &rest) in self.vertices.iter_mut().zip(&self.rest_pose) {
            *vertex = Vertex::new(rest);
        }
        self.buffer.publish(&self.vertices);
    }

    /// Checks that mesh data is present and consistent with the grid.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() || self.buffer.is_empty() {
            return Err(ClothError::MeshNotGenerated);
        }
        let expected = self.topology.vertex_count();
        for actual in [self.vertices.len(), self.buffer.len()] {
            if actual != expected {
                return Err(ClothError::MeshSizeMismatch { expected, actual });
            }
        }
        Ok(())
    }

    /// Returns true once mesh data has been installed.
    pub fn is_generated(&self) -> bool {
        self.validate().is_ok()
    }

    /// Cloth width in world units.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Cloth length in world units.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Cell counts along X and Z.
    pub fn divisions(&self) -> UVec2 {
        self.divisions
    }

    /// Rest lengths per edge class.
    pub fn rest_lengths(&self) -> &RestLengths {
        &self.rest
    }

    /// Grid topology.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Precomputed neighbor table, one entry per vertex.
    pub fn neighbors(&self) -> &[Neighbors] {
        &self.neighbors
    }

    /// Simulation vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable simulation vertices.
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Splits the cloth into the pieces one substep mutates.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Vertex], &[Neighbors], &RestLengths) {
        (&mut self.vertices, &self.neighbors, &self.rest)
    }

    /// Vertices alongside the index list, for the normal pass.
    pub(crate) fn vertices_and_indices_mut(&mut self) -> (&mut [Vertex], &[u32]) {
        (&mut self.vertices, &self.indices)
    }

    /// Copies simulation state into the renderer buffer.
    pub(crate) fn publish(&mut self) {
        self.buffer.publish(&self.vertices);
    }

    /// Triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Renderer-facing interleaved buffer.
    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    /// Number of vertices in the installed mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle indices in the installed mesh.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// World-space position of a vertex.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).map(|v| v.position + self.position)
    }
}
