/// Indexed triangle mesh
use nalgebra::{Point3, Vector3};

use crate::error::MeshError;
use crate::vector;

/// A mesh vertex, identified by its index in [`Mesh::vertices`]
pub type Vertex = Point3<f32>;

/// A triangle face referencing three vertices by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(i0: usize, i1: usize, i2: usize) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }
}

/// The resolved corner positions of one face, in index order
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit face normal following the winding order, `None` for a degenerate triangle
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let [v0, v1, v2] = self.vertices;
        vector::cross(&(v1 - v0), &(v2 - v0)).try_normalize(1e-12)
    }
}

/// Vertex list plus triangle list.
///
/// Every face index is checked against the vertex count when the face is
/// added, so the faces of an existing `Mesh` always resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, face: Face) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                face: self.faces.len(),
                index,
                vertex_count,
            });
        }
        self.faces.push(face);
        Ok(())
    }

    pub fn triangle(&self, face: &Face) -> Triangle {
        let [i0, i1, i2] = face.indices;
        Triangle::new(self.vertices[i0], self.vertices[i1], self.vertices[i2])
    }

    /// Triangles in face order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(move |face| self.triangle(face))
    }

    /// Axis-aligned cube centred on the origin, outward winding
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.add_vertex(Point3::new(x, y, z));
        }

        // Front, back, top, bottom, right, left
        mesh.faces = vec![
            Face::new(4, 5, 6),
            Face::new(4, 6, 7),
            Face::new(0, 3, 2),
            Face::new(0, 2, 1),
            Face::new(3, 7, 6),
            Face::new(3, 6, 2),
            Face::new(0, 1, 5),
            Face::new(0, 5, 4),
            Face::new(1, 2, 6),
            Face::new(1, 6, 5),
            Face::new(0, 4, 7),
            Face::new(0, 7, 3),
        ];

        mesh
    }
}
