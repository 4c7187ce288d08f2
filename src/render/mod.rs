use crate::types::{Attractor, ColorId, ShipSnapshot, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Terminal cell coordinates back into world coordinates, the inverse
    /// of the mapping used by `draw`. Used to decode mouse clicks.
    pub fn cell_to_world(&self, cell_x: u16, cell_y: u16, viewport: Viewport) -> Vec2 {
        let half_w = viewport.width as f64 / 2.0;
        let half_h = viewport.height as f64 / 2.0;
        Vec2::new(
            self.pos.x + (cell_x as f64 - half_w) / self.zoom,
            self.pos.y + (cell_y as f64 - half_h) / self.zoom,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub ch: char,
    pub priority: f64,
    pub color: ColorId,
}

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(
                len,
                RenderCell {
                    ch: ' ',
                    priority: f64::NEG_INFINITY,
                    color: ColorId::White,
                },
            );
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.ch = ' ';
            cell.priority = f64::NEG_INFINITY;
            cell.color = ColorId::White;
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: u16, y: u16, ch: char, priority: f64, color: ColorId) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if priority >= cell.priority {
            cell.priority = priority;
            cell.ch = ch;
            cell.color = color;
        }
    }
}

const PRIORITY_LINE: f64 = 1.0;
const PRIORITY_MARKER: f64 = 1.5;
const PRIORITY_SHIP: f64 = 2.0;
const PRIORITY_PLANET: f64 = 3.0;

/// Rasterizes one tick's snapshot into the framebuffer. The planet is
/// drawn on top so it covers anything passing over it, matching the
/// sandbox's screen ordering.
pub fn draw(
    ships: &[ShipSnapshot],
    pending_line: Option<(Vec2, Vec2)>,
    attractor: &Attractor,
    camera: &Camera,
    viewport: Viewport,
    frame: &mut FrameBuffer,
) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }

    let half_w = viewport.width as f64 / 2.0;
    let half_h = viewport.height as f64 / 2.0;

    if let Some((launch, pointer)) = pending_line {
        draw_launch_line(launch, pointer, camera, frame, half_w, half_h);
    }

    for ship in ships {
        let sx = ((ship.pos.x - camera.pos.x) * camera.zoom + half_w).round() as i32;
        let sy = ((ship.pos.y - camera.pos.y) * camera.zoom + half_h).round() as i32;
        if sx < 0 || sy < 0 || sx >= viewport.width as i32 || sy >= viewport.height as i32 {
            continue;
        }
        let color = ship_color(ship.vel.length());
        frame.set(sx as u16, sy as u16, '*', PRIORITY_SHIP, color);
    }

    draw_planet(attractor, camera, frame, half_w, half_h);
}

fn draw_launch_line(
    launch: Vec2,
    pointer: Vec2,
    camera: &Camera,
    frame: &mut FrameBuffer,
    half_w: f64,
    half_h: f64,
) {
    let ax = (launch.x - camera.pos.x) * camera.zoom + half_w;
    let ay = (launch.y - camera.pos.y) * camera.zoom + half_h;
    let bx = (pointer.x - camera.pos.x) * camera.zoom + half_w;
    let by = (pointer.y - camera.pos.y) * camera.zoom + half_h;

    let steps = ((bx - ax).abs().max((by - ay).abs()).ceil() as i32).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (ax + (bx - ax) * t).round() as i32;
        let y = (ay + (by - ay) * t).round() as i32;
        if x >= 0 && y >= 0 {
            frame.set(x as u16, y as u16, '·', PRIORITY_LINE, ColorId::Gray);
        }
    }

    // Launch anchor marker on top of the line.
    let mx = ax.round() as i32;
    let my = ay.round() as i32;
    if mx >= 0 && my >= 0 {
        frame.set(mx as u16, my as u16, 'x', PRIORITY_MARKER, ColorId::Red);
    }
}

fn draw_planet(
    attractor: &Attractor,
    camera: &Camera,
    frame: &mut FrameBuffer,
    half_w: f64,
    half_h: f64,
) {
    let cx = (attractor.pos.x - camera.pos.x) * camera.zoom + half_w;
    let cy = (attractor.pos.y - camera.pos.y) * camera.zoom + half_h;
    let r = (attractor.radius * camera.zoom).max(0.5);
    let span = r.ceil() as i32;

    for dy in -span..=span {
        for dx in -span..=span {
            if (dx * dx + dy * dy) as f64 > r * r {
                continue;
            }
            let x = cx.round() as i32 + dx;
            let y = cy.round() as i32 + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let ch = if dx == 0 && dy == 0 { '@' } else { 'O' };
            frame.set(x as u16, y as u16, ch, PRIORITY_PLANET, ColorId::Yellow);
        }
    }
}

fn ship_color(speed: f64) -> ColorId {
    if speed > 2.0 {
        ColorId::Cyan
    } else if speed > 0.75 {
        ColorId::White
    } else {
        ColorId::Blue
    }
}
