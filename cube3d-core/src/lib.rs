//! Cube3D Core Library - puzzle state, transforms and geometry
//!
//! This library holds everything about the 3x3x3 puzzle that does not touch a
//! terminal or window: the grid tables, the slice rotation engine, per-object
//! transforms with their orientation logs, the camera, and mesh loading.

pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod obj;
pub mod registry;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use engine::{ActiveRotation, CompletedRotation, SliceRotationEngine};
pub use error::ObjError;
pub use geometry::{FaceColor, Mesh, Triangle, Vertex};
pub use layout::{RotationDirection, Slice, NUM_SUB_CUBES};
pub use registry::{SubCube, SubCubeRegistry};
pub use scene::{AnimationTiming, CameraMove, Command, Scene, SceneSettings};
pub use transform::{RotationAxis, Transform};
