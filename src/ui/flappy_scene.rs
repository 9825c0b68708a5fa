//! UI rendering for the flight scene.
//!
//! The play area is a small raster: every terminal cell shows two vertically
//! stacked pixels using the upper-half block, so the playfield gets twice the
//! vertical resolution of the terminal. Game units are scaled to fit the area.

use crate::core::config::GameConfig;
use crate::game::types::{FlightState, Phase, Pipe};
use crate::ui::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_status_bar,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const SKY_TOP: Color = Color::Rgb(70, 180, 200);
pub const SKY_BOTTOM: Color = Color::Rgb(135, 206, 235);
pub const PIPE_BODY: Color = Color::Rgb(50, 205, 50);
pub const PIPE_CAP: Color = Color::Rgb(34, 139, 34);
pub const BIRD_BODY: Color = Color::Rgb(255, 215, 0);
pub const BIRD_WING: Color = Color::Rgb(218, 165, 32);
pub const BIRD_BEAK: Color = Color::Rgb(225, 75, 35);
pub const BIRD_EYE: Color = Color::Rgb(0, 0, 0);

// Ornament sizes in game units
const CAP_HEIGHT: f64 = 20.0;
const CAP_OVERHANG: f64 = 4.0;

const INFO_PANEL_WIDTH: u16 = 18;

/// Render the whole flight screen. Returns the play area, where clicks count as flaps.
pub fn render_flappy(
    frame: &mut Frame,
    area: Rect,
    state: &FlightState,
    config: &GameConfig,
) -> Rect {
    if area.width == 0 || area.height == 0 {
        return Rect::default();
    }

    let layout = create_game_layout(frame, area, " Flappy Bird ", Color::Cyan, INFO_PANEL_WIDTH);

    render_play_area(frame, layout.content, state, config);
    render_score_overlay(frame, layout.content, state);
    render_phase_overlay(frame, layout.content, state);
    render_status_bar_content(frame, layout.status_bar, state);
    if layout.info_panel.width > 0 {
        render_info_panel(frame, layout.info_panel, state);
    }

    layout.content
}

/// Pixel buffer in play-area pixels (cells wide, two pixels per cell tall).
struct Raster {
    w: usize,
    h: usize,
    px: Vec<Color>,
    // Pixels per game unit
    sx: f64,
    sy: f64,
}

impl Raster {
    fn new(area: Rect, config: &GameConfig) -> Self {
        let w = area.width as usize;
        let h = area.height as usize * 2;
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
            sx: w as f64 / config.field_width,
            sy: h as f64 / config.field_height,
        }
    }

    fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.w + x]
    }

    fn fill_sky(&mut self) {
        for y in 0..self.h {
            let t = y as f64 / self.h.max(1) as f64;
            let c = lerp(SKY_TOP, SKY_BOTTOM, t);
            for x in 0..self.w {
                self.px[y * self.w + x] = c;
            }
        }
    }

    /// Fill a rectangle given in game units. Anything on-screen covers at least one pixel.
    fn fill_units(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, c: Color) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let (px0, px1) = to_pixel_span(x0 * self.sx, x1 * self.sx, self.w);
        let (py0, py1) = to_pixel_span(y0 * self.sy, y1 * self.sy, self.h);
        for y in py0..py1 {
            for x in px0..px1 {
                self.px[y * self.w + x] = c;
            }
        }
    }

    /// Convert pixel pairs into half-block lines, merging runs of equal colors.
    fn to_lines(&self) -> Vec<Line<'static>> {
        let rows = self.h / 2;
        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_style: Option<Style> = None;
            for col in 0..self.w {
                let style = Style::default()
                    .fg(self.get(col, row * 2))
                    .bg(self.get(col, row * 2 + 1));
                if run_style != Some(style) {
                    if let Some(prev) = run_style {
                        spans.push(Span::styled(std::mem::take(&mut run), prev));
                    }
                    run_style = Some(style);
                }
                run.push('\u{2580}'); // ▀
            }
            if let Some(prev) = run_style {
                spans.push(Span::styled(run, prev));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

fn to_pixel_span(a: f64, b: f64, limit: usize) -> (usize, usize) {
    let start = a.round().max(0.0);
    let end = b.round().max(start + 1.0);
    let start = (start as usize).min(limit);
    let end = (end as usize).min(limit);
    (start, end)
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    match (a, b) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ => a,
    }
}

/// Render the main play area with sky, pipes, and bird.
fn render_play_area(frame: &mut Frame, area: Rect, state: &FlightState, config: &GameConfig) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut raster = Raster::new(area, config);
    raster.fill_sky();
    for pipe in &state.pipes {
        draw_pipe(&mut raster, pipe, config);
    }
    draw_bird(&mut raster, state, config);

    frame.render_widget(Paragraph::new(raster.to_lines()), area);
}

fn draw_pipe(raster: &mut Raster, pipe: &Pipe, config: &GameConfig) {
    let left = pipe.x;
    let right = pipe.right_edge(config);
    let gap_top = pipe.top_height;
    let gap_bottom = pipe.gap_bottom(config);

    // Bodies
    raster.fill_units(left, 0.0, right, gap_top, PIPE_BODY);
    raster.fill_units(left, gap_bottom, right, config.field_height, PIPE_BODY);

    // Caps, slightly wider than the body, at the gap edges
    let cap_left = left - CAP_OVERHANG;
    let cap_right = right + CAP_OVERHANG;
    raster.fill_units(
        cap_left,
        (gap_top - CAP_HEIGHT).max(0.0),
        cap_right,
        gap_top,
        PIPE_CAP,
    );
    raster.fill_units(
        cap_left,
        gap_bottom,
        cap_right,
        (gap_bottom + CAP_HEIGHT).min(config.field_height),
        PIPE_CAP,
    );
}

fn draw_bird(raster: &mut Raster, state: &FlightState, config: &GameConfig) {
    let x = state.bird.x;
    let y = state.bird.y;
    let s = config.bird_size;

    raster.fill_units(x, y, x + s, y + s, BIRD_BODY);

    // Wing beats every 4 frames while flying
    let wing_up = state.phase != Phase::Playing || state.frame % 8 < 4;
    let wing_y = if wing_up { y + s * 0.35 } else { y + s * 0.55 };
    raster.fill_units(x + s * 0.05, wing_y, x + s * 0.45, wing_y + s * 0.3, BIRD_WING);

    raster.fill_units(x + s, y + s * 0.45, x + s * 1.2, y + s * 0.65, BIRD_BEAK);
    raster.fill_units(x + s * 0.65, y + s * 0.25, x + s * 0.8, y + s * 0.4, BIRD_EYE);
}

/// Current score, centered on the top row of the play area.
fn render_score_overlay(frame: &mut Frame, area: Rect, state: &FlightState) {
    if state.phase != Phase::Playing || area.height == 0 {
        return;
    }
    let text = format!(" {} ", state.score);
    let width = (text.len() as u16).min(area.width);
    let rect = Rect::new(area.x + (area.width - width) / 2, area.y, width, 1);
    let score = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(score, rect);
}

fn render_phase_overlay(frame: &mut Frame, area: Rect, state: &FlightState) {
    match state.phase {
        Phase::Playing => {}
        Phase::Start => {
            let lines = vec![
                Line::from(Span::styled(
                    "Ready to Fly?",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press SPACE or click to start"),
                Line::from(Span::styled(
                    format!("High Score: {}", state.best),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[ Start Game ]",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            render_modal(frame, area, Color::Yellow, lines);
        }
        Phase::GameOver => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Game Over!",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Score: {}", state.score),
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(
                    format!("High Score: {}", state.best),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            if state.new_best {
                lines.push(Line::from(Span::styled(
                    "NEW BEST!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[ Play Again ]",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "Press SPACE or click to play again",
                Style::default().fg(Color::DarkGray),
            )));
            render_modal(frame, area, Color::Red, lines);
        }
    }
}

/// Render the status bar at the bottom.
fn render_status_bar_content(frame: &mut Frame, area: Rect, state: &FlightState) {
    let color = match state.phase {
        Phase::Start => Color::Yellow,
        Phase::Playing => Color::Green,
        Phase::GameOver => Color::Red,
    };
    render_status_bar(
        frame,
        area,
        &format!("Score: {}   Best: {}", state.score, state.best),
        color,
        &[("[Space/Click]", "Flap"), ("[Q/Esc]", "Quit")],
    );
}

/// Render the info panel on the right.
fn render_info_panel(frame: &mut Frame, area: Rect, state: &FlightState) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let status = match state.phase {
        Phase::Start => ("Ready", Color::Yellow),
        Phase::Playing => ("Flying", Color::Green),
        Phase::GameOver => ("Crashed", Color::Red),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", state.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", state.best), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Status: ", Style::default().fg(Color::DarkGray)),
            Span::styled(status.0, Style::default().fg(status.1)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
