//! Ownership of the 27 drawable sub-cubes
use nalgebra::Vector3;

use crate::geometry::Mesh;
use crate::layout::{position_coords, NUM_SUB_CUBES};
use crate::transform::Transform;

/// One drawable sub-cube
///
/// The identity and home position never change; where the sub-cube currently
/// sits is tracked by the rotation engine, not here.
#[derive(Debug, Clone)]
pub struct SubCube {
    id: usize,
    home: usize,
    mesh: Mesh,
    transform: Transform,
}

impl SubCube {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Position the sub-cube occupies in the solved puzzle
    pub fn home(&self) -> usize {
        self.home
    }

    pub fn home_coords(&self) -> Vector3<f32> {
        position_coords(self.home)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// All sub-cubes, indexed by identity
#[derive(Debug, Clone)]
pub struct SubCubeRegistry {
    cubes: Vec<SubCube>,
}

impl SubCubeRegistry {
    /// Create the 27 sub-cubes from one shared mesh.
    ///
    /// Sub-cube `i` starts at position `i` and is painted for that position.
    pub fn new(mesh: &Mesh) -> Self {
        let cubes = (0..NUM_SUB_CUBES)
            .map(|id| SubCube {
                id,
                home: id,
                mesh: mesh.paint_stickers(&position_coords(id)),
                transform: Transform::new(),
            })
            .collect();
        Self { cubes }
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Panics if `id` is not a sub-cube identity.
    pub fn get(&self, id: usize) -> &SubCube {
        &self.cubes[id]
    }

    /// Panics if `id` is not a sub-cube identity.
    pub fn get_mut(&mut self, id: usize) -> &mut SubCube {
        &mut self.cubes[id]
    }

    pub fn transform_mut(&mut self, id: usize) -> &mut Transform {
        self.get_mut(id).transform_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubCube> {
        self.cubes.iter()
    }
}
