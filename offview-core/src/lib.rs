/// offview core library - OFF meshes and the math around them
///
/// Parses OFF files into indexed triangle meshes, recenters them on their
/// centroid, measures bounding spheres and provides the small vector, transform
/// and projection helpers a viewer needs. Nothing here touches the terminal.

pub mod bounds;
pub mod error;
pub mod geometry;
pub mod off;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use bounds::BoundingSphere;
pub use error::{InvalidAxis, MeshError, OffError};
pub use geometry::{Face, Mesh, Triangle, Vertex};
pub use off::{load_off, parse_off, read_off};
pub use projection::{Camera, ProjectionMode, ScreenPoint};
pub use transform::{RotationState, Transform};
pub use vector::Axis;
