/// Two-pass cel rasterizer for terminal rendering
///
/// Each mesh is drawn twice: first its back faces as thick black edges with a
/// strict depth test, then its front faces filled with a less-or-equal depth
/// test. Only the part of the edges that pokes out past the filled silhouette
/// survives, which gives the outline.
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;
use cel3d_core::{
    shading::{band_index, shade, toon_band},
    Camera, Mesh, OrbitingLight, ScreenPoint, Triangle, Vector3f,
};

/// Glyph ramp for the toon bands (darkest to lightest)
const BAND_GLYPHS: [char; 4] = ['.', ':', '+', '#'];

/// Clear colour of the viewport
pub const BACKGROUND: Color = Color::Rgb { r: 0, g: 102, b: 102 };
const OUTLINE_COLOR: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const LIGHT_COLOR: Color = Color::Rgb { r: 191, g: 191, b: 0 };

/// What last wrote a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Outline,
    Fill,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const EMPTY: Cell = Cell {
        kind: CellKind::Empty,
        glyph: ' ',
        fg: BACKGROUND,
        bg: BACKGROUND,
    };
}

/// Screen-space vertex with the lighting inputs needed by the fill pass
#[derive(Debug, Clone, Copy)]
struct Projected {
    screen: ScreenPoint,
    diffuse: f32,
    color: Vector3f,
}

/// Cel renderer that converts 3D meshes to terminal cells
pub struct CelRenderer {
    width: usize,
    height: usize,
    outline_width: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl CelRenderer {
    pub fn new(width: usize, height: usize, outline_width: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            outline_width,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![Cell::EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height, self.outline_width);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::EMPTY);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// Draw one object: outline pass, then fill pass
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        camera: &Camera,
        light: &OrbitingLight,
    ) {
        let model_view = view * model;
        let projected: Vec<[Projected; 3]> = mesh
            .triangles
            .iter()
            .filter_map(|t| self.project_triangle(t, model, &model_view, camera, light))
            .collect();

        for tri in projected.iter().filter(|t| !is_front_facing(t)) {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                self.draw_edge(&tri[a].screen, &tri[b].screen);
            }
        }

        for tri in projected.iter().filter(|t| is_front_facing(t)) {
            self.fill_triangle(tri);
        }
    }

    /// Mark the light's position
    pub fn render_light(&mut self, light: &OrbitingLight, view: &Matrix4<f32>, camera: &Camera) {
        let position: Point3<f32> = light.world_position().into();
        let (width, height) = (self.width as u32, self.height as u32);
        let Some(p) = camera.project_to_screen(&position, view, width, height) else {
            return;
        };
        if let Some(idx) = self.index(p.x.floor() as i64, p.y.floor() as i64) {
            if p.depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = p.depth;
                self.cells[idx] = Cell {
                    kind: CellKind::Light,
                    glyph: 'O',
                    fg: LIGHT_COLOR,
                    bg: BACKGROUND,
                };
            }
        }
    }

    fn project_triangle(
        &self,
        triangle: &Triangle,
        model: &Matrix4<f32>,
        model_view: &Matrix4<f32>,
        camera: &Camera,
        light: &OrbitingLight,
    ) -> Option<[Projected; 3]> {
        let mut out = [Projected {
            screen: ScreenPoint { x: 0.0, y: 0.0, depth: 0.0 },
            diffuse: 0.0,
            color: Vector3f::zero(),
        }; 3];

        for (slot, vertex) in out.iter_mut().zip(&triangle.vertices) {
            let local: Point3<f32> = vertex.position.into();
            let screen = camera.project_to_screen(
                &local,
                model_view,
                self.width as u32,
                self.height as u32,
            )?;

            let world = model.transform_point(&local);
            let normal = model
                .transform_vector(&Vector3::from(vertex.normal))
                .try_normalize(1e-6)
                .unwrap_or_else(Vector3::zeros);
            let to_light = light.direction_from(&Vector3f::from(world.coords));

            *slot = Projected {
                screen,
                diffuse: Vector3f::from(normal).dot(&to_light).max(0.0),
                color: vertex.color,
            };
        }
        Some(out)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Thick edge, strict depth test
    fn draw_edge(&mut self, p0: &ScreenPoint, p1: &ScreenPoint) {
        // Edges of triangles grazing the near plane can project far off screen
        let limit = 4 * (self.width + self.height);
        let span = (p1.x - p0.x).abs().max((p1.y - p0.y).abs());
        let steps = (span.ceil().max(1.0) as usize).min(limit.max(1));
        let reach = self.outline_width as i64;

        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = (p0.x + (p1.x - p0.x) * t).floor() as i64;
            let y = (p0.y + (p1.y - p0.y) * t).floor() as i64;
            let depth = p0.depth + (p1.depth - p0.depth) * t;

            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    if let Some(idx) = self.index(x + dx, y + dy) {
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.cells[idx] = Cell {
                                kind: CellKind::Outline,
                                glyph: ' ',
                                fg: OUTLINE_COLOR,
                                bg: OUTLINE_COLOR,
                            };
                        }
                    }
                }
            }
        }
    }

    /// Filled triangle, less-or-equal depth test
    fn fill_triangle(&mut self, tri: &[Projected; 3]) {
        let (v0, v1, v2) = (tri[0].screen, tri[1].screen, tri[2].screen);

        // Bounding box, clipped to screen bounds
        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as i64;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(self.width as f32 - 1.0) as i64;
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as i64;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(self.height as f32 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let corners = ((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y));
                let Some((w0, w1, w2)) = barycentric(corners.0, corners.1, corners.2, (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let Some(idx) = self.index(x, y) else {
                    continue;
                };

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                if depth > self.depth_buffer[idx] {
                    continue;
                }

                let diffuse = w0 * tri[0].diffuse + w1 * tri[1].diffuse + w2 * tri[2].diffuse;
                let color = tri[0].color * w0 + tri[1].color * w1 + tri[2].color * w2;
                let intensity = toon_band(diffuse);

                self.depth_buffer[idx] = depth;
                self.cells[idx] = Cell {
                    kind: CellKind::Fill,
                    glyph: BAND_GLYPHS[band_index(intensity).min(BAND_GLYPHS.len() - 1)],
                    fg: to_rgb(&shade(&color, intensity)),
                    bg: to_rgb(&shade(&color, intensity * 0.6)),
                };
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;

        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = &self.cells[y * self.width + x];

                if fg != Some(cell.fg) {
                    writer.queue(SetForegroundColor(cell.fg))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    writer.queue(SetBackgroundColor(cell.bg))?;
                    bg = Some(cell.bg);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Screen space has Y pointing down, so counter-clockwise world faces turn clockwise
fn is_front_facing(tri: &[Projected; 3]) -> bool {
    let (a, b, c) = (tri[0].screen, tri[1].screen, tri[2].screen);
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y) < 0.0
}

fn to_rgb(color: &Vector3f) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.x()),
        g: channel(color.y()),
        b: channel(color.z()),
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
