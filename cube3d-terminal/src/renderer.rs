//! ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cube3d_core::{Camera, FaceColor, SubCubeRegistry, Triangle};
use nalgebra::Matrix4;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 0.5;

/// Terminal color used for each face paint
pub fn face_color(color: FaceColor) -> Color {
    match color {
        FaceColor::White => Color::White,
        FaceColor::Yellow => Color::Yellow,
        FaceColor::Orange => Color::DarkYellow,
        FaceColor::Red => Color::Red,
        FaceColor::Green => Color::Green,
        FaceColor::Blue => Color::Blue,
        FaceColor::Interior => Color::DarkGrey,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    character: ' ',
    color: Color::Reset,
};

/// ASCII renderer that converts the sub-cubes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cell_buffer: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cell_buffer: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width / height of the drawing area in world units
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 * CELL_ASPECT / self.height as f32
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cell_buffer.fill(EMPTY);
    }

    pub fn character_at(&self, x: usize, y: usize) -> char {
        self.cell_buffer[y * self.width + x].character
    }

    /// Draw every sub-cube with its current transform
    pub fn render_cubes(&mut self, cubes: &SubCubeRegistry, camera: &Camera) {
        for cube in cubes.iter() {
            let model = cube.transform().matrix();
            for triangle in &cube.mesh().triangles {
                self.render_triangle(triangle, model, camera);
            }
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Matrix4<f32>, camera: &Camera) {
        // Shade with a light at the eye, and skip faces turned away from it.
        let normal = model_matrix.transform_vector(&triangle.outward_normal());
        let to_eye = camera.eye - model_matrix.transform_point(&triangle.vertices[0].position);
        if normal.norm() < 1e-6 || to_eye.norm() < 1e-6 {
            return;
        }
        let brightness = normal.normalize().dot(&to_eye.normalize());
        if brightness <= 0.0 {
            return;
        }

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coords, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *coords = projected,
                None => return, // Triangle is clipped
            }
        }

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let cell = Cell {
            character: LUMINOSITY_RAMP[char_index],
            color: face_color(triangle.color),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    // Interpolate depth
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                    let idx = y as usize * self.width + x as usize;
                    if depth < self.depth_buffer[idx] {
                        self.depth_buffer[idx] = depth;
                        self.cell_buffer[idx] = cell;
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cell_buffer[y * self.width + x];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.character))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube3d_core::{Mesh, Scene, SceneSettings};

    #[test]
    fn test_barycentric_corners() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)).unwrap();
        assert!((w0 - 1.0).abs() < 1e-6 && w1.abs() < 1e-6 && w2.abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn test_puzzle_covers_screen_center() {
        let mut renderer = AsciiRenderer::new(80, 40);
        let settings = SceneSettings {
            aspect: renderer.aspect(),
            ..SceneSettings::default()
        };
        let scene = Scene::new(settings, &Mesh::cube(2.0));

        renderer.clear();
        renderer.render_cubes(&scene.cubes, &scene.camera);
        assert_ne!(renderer.character_at(40, 20), ' ');
        assert_eq!(renderer.character_at(0, 0), ' ');

        // Looking straight at the white face.
        let center = renderer.cell_buffer[20 * 80 + 40];
        assert_eq!(center.color, Color::White);
    }

    #[test]
    fn test_draw_output_size() {
        let renderer = AsciiRenderer::new(4, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(' ').count(), 8);
        assert_eq!(text.matches("\r\n").count(), 1);
    }

    #[test]
    fn test_resize() {
        let mut renderer = AsciiRenderer::new(4, 2);
        renderer.resize(10, 5);
        assert_eq!((renderer.width(), renderer.height()), (10, 5));
        assert!((renderer.aspect() - 1.0).abs() < 1e-6);
    }
}
