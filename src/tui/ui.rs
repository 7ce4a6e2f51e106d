//! UI rendering for the TUI.

use std::f64::consts::TAU;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders, Gauge, Paragraph,
    },
    Frame,
};

use crate::breath::{Clock, Snapshot, VisualState};
use crate::core::{format_duration, Variant};
use crate::tui::app::{circle_scale, App};

/// Render the application UI.
pub fn render<C: Clock>(frame: &mut Frame<'_>, app: &App<C>) {
    // Create layout: header, circle, label, pointer gauge, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Circle
            Constraint::Length(3), // Label
            Constraint::Length(3), // Cycle pointer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let snapshot = app.snapshot();
    let palette = app.variant.palette();

    render_header(frame, app, snapshot.as_ref(), chunks[0]);
    if let Some(snapshot) = snapshot {
        render_circle(frame, app.variant, &snapshot, chunks[1]);
        render_label(frame, app.variant, &snapshot, chunks[2]);
        render_pointer(frame, palette.accent, &snapshot, chunks[3]);
    }
    render_status_bar(frame, app, chunks[4]);
}

/// Render the header.
fn render_header<C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<C>,
    snapshot: Option<&Snapshot>,
    area: Rect,
) {
    let cycle = snapshot.map_or(0, |s| s.cycle);
    let title = format!(
        " breather · {} · {} cycle · #{cycle} ",
        app.variant,
        format_duration(app.cycle().total())
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(app.variant.palette().accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.variant.palette().accent)),
        );

    frame.render_widget(header, area);
}

/// Render the breathing circle.
#[allow(clippy::cast_precision_loss)]
fn render_circle(frame: &mut Frame<'_>, variant: Variant, snapshot: &Snapshot, area: Rect) {
    let palette = variant.palette();
    let scale = circle_scale(snapshot);
    let color = match snapshot.visual {
        VisualState::Grow => palette.grow,
        VisualState::Shrink => palette.shrink,
    };
    let rings = variant.rings();

    // Pointer travels clockwise from the top once per cycle.
    let angle = snapshot.cycle_progress * TAU;
    let pointer = [(angle.sin() * 1.1, angle.cos() * 1.1)];

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([-1.25, 1.25])
        .y_bounds([-1.25, 1.25])
        .paint(move |ctx| {
            for ring in 0..rings {
                let shade = if ring % 2 == 0 { color } else { palette.accent };
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: scale * (1.0 - ring as f64 * 0.18),
                    color: shade,
                });
            }
            ctx.draw(&Points {
                coords: &pointer,
                color: palette.accent,
            });
        });

    frame.render_widget(canvas, area);
}

/// Render the phase label.
fn render_label(frame: &mut Frame<'_>, variant: Variant, snapshot: &Snapshot, area: Rect) {
    let palette = variant.palette();
    let color = match snapshot.visual {
        VisualState::Grow => palette.grow,
        VisualState::Shrink => palette.shrink,
    };

    let label = Paragraph::new(snapshot.label.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(label, area);
}

/// Render the cycle pointer as a gauge.
fn render_pointer(frame: &mut Frame<'_>, accent: Color, snapshot: &Snapshot, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" cycle "))
        .gauge_style(Style::default().fg(accent))
        .ratio(snapshot.cycle_progress.clamp(0.0, 1.0))
        .label(snapshot.phase.to_string());

    frame.render_widget(gauge, area);
}

/// Render the status bar.
fn render_status_bar<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or("v:variant | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
