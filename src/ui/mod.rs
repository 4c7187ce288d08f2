use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    config,
    core::World,
    render,
    types::{ColorId, InputEvent, ShipSnapshot, Vec2},
};

pub fn run() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut world = World::new();
    let mut snapshot: Vec<ShipSnapshot> = Vec::new();
    let mut ui_state = UiState::new();

    let mut accumulator = 0.0_f64;
    let mut last_tick = std::time::Instant::now();
    let mut last_render = std::time::Instant::now();
    let render_interval = Duration::from_secs_f64(1.0 / config::RENDER_HZ);
    let mut sim_counter = 0_u32;
    let mut render_counter = 0_u32;
    let mut last_fps_sample = std::time::Instant::now();
    let mut sim_fps = 0.0_f64;
    let mut render_fps = 0.0_f64;

    loop {
        let now = std::time::Instant::now();
        let dt = (now - last_tick).as_secs_f64();
        last_tick = now;
        accumulator += dt;

        while accumulator >= config::DT {
            world.tick(config::DT);
            accumulator -= config::DT;
            sim_counter += 1;
        }

        while event::poll(Duration::from_millis(0))? {
            match decode_event(event::read()?, &ui_state) {
                Some(InputEvent::Quit) => {
                    shutdown_terminal(&mut terminal)?;
                    return Ok(());
                }
                Some(input) => world.apply(input),
                None => {}
            }
        }

        if last_render.elapsed() >= render_interval {
            world.snapshot(&mut snapshot);
            let stats = world.stats();
            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f64();
                sim_fps = sim_counter as f64 / secs;
                render_fps = render_counter as f64 / secs;
                sim_counter = 0;
                render_counter = 0;
                last_fps_sample = std::time::Instant::now();
            }
            terminal.draw(|frame| {
                let size = frame.size();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(3),
                        Constraint::Length(3),
                    ])
                    .split(size);

                let header = Paragraph::new(format!(
                    "ships: {} | launched: {} | escaped: {} | crashed: {} | sim fps: {:.1} | render fps: {:.1}",
                    stats.active,
                    stats.spawned,
                    stats.escaped,
                    stats.crashed,
                    sim_fps,
                    render_fps
                ))
                .block(Block::default().borders(Borders::ALL).title("slingshot"));
                frame.render_widget(header, chunks[0]);

                ui_state.ensure_viewport(chunks[1]);
                render::draw(
                    &snapshot,
                    world.pending_line(),
                    world.attractor(),
                    &ui_state.camera,
                    render::Viewport {
                        width: ui_state.framebuf.width(),
                        height: ui_state.framebuf.height(),
                    },
                    &mut ui_state.framebuf,
                );

                let framebuf = &ui_state.framebuf;
                let width = framebuf.width();
                let height = framebuf.height();
                {
                    let lines_store = &mut ui_state.lines;
                    for y in 0..height {
                        let line = &mut lines_store[y as usize];
                        line.clear();
                        line.reserve(width as usize);
                        for x in 0..width {
                            let cell = framebuf.get(x, y);
                            line.push(cell.ch);
                        }
                    }
                }
                let lines: Vec<Line> = ui_state
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(y, line)| {
                        let mut spans: Vec<Span> = Vec::with_capacity(line.len());
                        for (x, ch) in line.chars().enumerate() {
                            let cell = framebuf.get(x as u16, y as u16);
                            let color = color_for(cell.color);
                            spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
                        }
                        Line::from(spans)
                    })
                    .collect();

                let viewport = Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title("Viewport"));
                frame.render_widget(viewport, chunks[1]);

                let footer = Paragraph::new(
                    "click: set launch point | click again: fire along the drag line | q / Esc: quit",
                )
                .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, chunks[2]);
            })?;

            last_render = std::time::Instant::now();
            render_counter += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn shutdown_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Translates a raw terminal event into a core [`InputEvent`]. Mouse
/// coordinates are mapped from terminal cells through the camera into world
/// space; events outside the viewport pane are dropped.
fn decode_event(event: CrosstermEvent, ui_state: &UiState) -> Option<InputEvent> {
    match event {
        CrosstermEvent::Key(key) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
            _ => None,
        },
        CrosstermEvent::Mouse(mouse) => {
            let pos = ui_state.mouse_to_world(&mouse)?;
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PrimaryClickAt(pos)),
                MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(InputEvent::PointerMovedTo(pos))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

struct UiState {
    camera: render::Camera,
    framebuf: render::FrameBuffer,
    lines: Vec<String>,
    view_rect: Rect,
}

impl UiState {
    fn new() -> Self {
        Self {
            camera: render::Camera::default(),
            framebuf: render::FrameBuffer::new(0, 0),
            lines: Vec::new(),
            view_rect: Rect::default(),
        }
    }

    /// Sizes the framebuffer to the viewport pane's inner area and fits the
    /// whole world into it through the camera zoom.
    fn ensure_viewport(&mut self, pane: Rect) {
        self.view_rect = pane;
        let width = pane.width.saturating_sub(2);
        let height = pane.height.saturating_sub(2);
        if self.framebuf.width() != width || self.framebuf.height() != height {
            self.framebuf.resize(width, height);
        }
        let desired = height as usize;
        if self.lines.len() != desired {
            self.lines.clear();
            self.lines.resize_with(desired, String::new);
        }
        self.camera.pos = Vec2::new(config::VIEW_WIDTH / 2.0, config::VIEW_HEIGHT / 2.0);
        if width > 0 && height > 0 {
            let zoom_x = width as f64 / config::VIEW_WIDTH;
            let zoom_y = height as f64 / config::VIEW_HEIGHT;
            self.camera.zoom = zoom_x.min(zoom_y);
        }
    }

    fn mouse_to_world(&self, mouse: &MouseEvent) -> Option<Vec2> {
        // Inner area of the bordered viewport pane.
        let inner_x = self.view_rect.x.saturating_add(1);
        let inner_y = self.view_rect.y.saturating_add(1);
        let width = self.framebuf.width();
        let height = self.framebuf.height();
        if width == 0 || height == 0 || self.camera.zoom <= 0.0 {
            return None;
        }
        if mouse.column < inner_x || mouse.row < inner_y {
            return None;
        }
        let cell_x = mouse.column - inner_x;
        let cell_y = mouse.row - inner_y;
        if cell_x >= width || cell_y >= height {
            return None;
        }
        Some(
            self.camera
                .cell_to_world(cell_x, cell_y, render::Viewport { width, height }),
        )
    }
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::White => Color::White,
        ColorId::Cyan => Color::Cyan,
        ColorId::Blue => Color::Blue,
        ColorId::Yellow => Color::Yellow,
        ColorId::Red => Color::Red,
        ColorId::Gray => Color::DarkGray,
    }
}
