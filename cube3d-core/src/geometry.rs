//! Geometry primitives for the sub-cube meshes
use nalgebra::{Point3, Vector3};

/// Paint of one face of a sub-cube
///
/// Each side of the assembled puzzle has its own color; faces that point into
/// the puzzle are `Interior`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceColor {
    /// +Z
    White,
    /// -Z
    Yellow,
    /// +Y
    Orange,
    /// -Y
    Red,
    /// +X
    Green,
    /// -X
    Blue,
    #[default]
    Interior,
}

impl FaceColor {
    /// Color of the puzzle side facing along `normal`'s dominant axis
    pub fn for_direction(normal: &Vector3<f32>) -> Self {
        let (axis, component) = dominant_axis(normal);
        match (axis, component > 0.0) {
            (0, true) => FaceColor::Green,
            (0, false) => FaceColor::Blue,
            (1, true) => FaceColor::Orange,
            (1, false) => FaceColor::Red,
            (_, true) => FaceColor::White,
            (_, false) => FaceColor::Yellow,
        }
    }
}

/// Index and value of the largest-magnitude component
fn dominant_axis(v: &Vector3<f32>) -> (usize, f32) {
    let axis = v.iamax();
    (axis, v[axis])
}

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A painted triangle
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub color: FaceColor,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
            color: FaceColor::Interior,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    /// Outward normal, taken from the vertex normals when they are usable
    pub fn outward_normal(&self) -> Vector3<f32> {
        let summed: Vector3<f32> = self.vertices.iter().map(|v| v.normal).sum();
        if summed.norm() > 1e-6 {
            summed.normalize()
        } else {
            self.calculate_normal()
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Copy of this mesh painted for the sub-cube whose home is `home`.
    ///
    /// A face is painted when it points out of the puzzle from `home`: its
    /// dominant normal axis matches a coordinate of `home` that is on the
    /// outer layer, with the same sign. Every other face is `Interior`.
    pub fn paint_stickers(&self, home: &Vector3<f32>) -> Self {
        let mut painted = self.clone();
        for triangle in &mut painted.triangles {
            let normal = triangle.outward_normal();
            let (axis, component) = dominant_axis(&normal);
            let outside = home[axis] != 0.0 && home[axis].signum() == component.signum();
            triangle.color = if outside {
                FaceColor::for_direction(&normal)
            } else {
                FaceColor::Interior
            };
        }
        painted
    }

    /// Create a cube mesh centered on the origin with outward normals
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        // Each face as (normal, four corners counter-clockwise seen from outside)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // Front
            (
                [0.0, 0.0, 1.0],
                [[-half, -half, half], [half, -half, half], [half, half, half], [-half, half, half]],
            ),
            // Back
            (
                [0.0, 0.0, -1.0],
                [[half, -half, -half], [-half, -half, -half], [-half, half, -half], [half, half, -half]],
            ),
            // Top
            (
                [0.0, 1.0, 0.0],
                [[-half, half, half], [half, half, half], [half, half, -half], [-half, half, -half]],
            ),
            // Bottom
            (
                [0.0, -1.0, 0.0],
                [[-half, -half, -half], [half, -half, -half], [half, -half, half], [-half, -half, half]],
            ),
            // Right
            (
                [1.0, 0.0, 0.0],
                [[half, -half, half], [half, -half, -half], [half, half, -half], [half, half, half]],
            ),
            // Left
            (
                [-1.0, 0.0, 0.0],
                [[-half, -half, -half], [-half, -half, half], [-half, half, half], [-half, half, -half]],
            ),
        ];

        for ([nx, ny, nz], corners) in faces {
            let [a, b, c, d] = corners.map(|[x, y, z]| Vertex::new(x, y, z, nx, ny, nz));
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
