//! Geography section: world map that zooms from orbit onto Karachi, then
//! hands over to the 3D city mesh.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, BorderType, Borders, Paragraph, Widget,
    },
};

use crate::app::sections::{GlobeMount, GlobeSection};
use crate::core::geo::GeoView;
use crate::core::phase::Phase;
use crate::core::stl::Mesh;

use super::theme::Theme;

/// Largest mesh extent after scaling, in canvas units.
const MESH_EXTENT: f32 = 10.0;
/// Spin of the city mesh, radians per second.
const MESH_SPIN: f64 = 0.5;
const MAX_MESH_POINTS: usize = 6000;

pub struct GlobeWidget<'a> {
    section: &'a GlobeSection,
    mesh: Option<&'a Mesh>,
    now: Instant,
    block: Option<Block<'a>>,
}

impl<'a> GlobeWidget<'a> {
    pub fn new(section: &'a GlobeSection, now: Instant) -> Self {
        Self {
            section,
            mesh: None,
            now,
            block: None,
        }
    }

    pub fn mesh(mut self, mesh: Option<&'a Mesh>) -> Self {
        self.mesh = mesh;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// HUD heading for a phase.
pub fn status_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Initial => "ORBITAL VIEW",
        Phase::Transitioning => "ZOOMING IN",
        Phase::Final => "3D CITY MAP",
    }
}

/// Project the mesh onto the canvas plane: spin about the vertical axis,
/// then tilt so height reads as upward offset.
pub fn project_mesh(mesh: &Mesh, spin: f64) -> Vec<(f64, f64)> {
    let scale = f64::from(mesh.fit_scale(MESH_EXTENT));
    let step = (mesh.positions.len() / MAX_MESH_POINTS).max(1);
    let (sin, cos) = spin.sin_cos();
    mesh.positions
        .iter()
        .step_by(step)
        .map(|p| {
            let x = f64::from(p[0]) * scale;
            let y = f64::from(p[1]) * scale;
            let z = f64::from(p[2]) * scale;
            let rx = x * cos - y * sin;
            let ry = x * sin + y * cos;
            (rx, ry * 0.5 + z)
        })
        .collect()
}

fn render_map(view: GeoView, area: Rect, buf: &mut Buffer) {
    let (x_bounds, y_bounds) = view.bounds();
    let karachi = [(GeoView::KARACHI.lng, GeoView::KARACHI.lat)];
    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Theme::UMBER,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &karachi,
                color: Theme::EMBER,
            });
            ctx.print(
                GeoView::KARACHI.lng,
                GeoView::KARACHI.lat,
                Span::styled(" Karachi", Theme::marker_style()),
            );
        })
        .render(area, buf);
}

fn render_mesh(mesh: &Mesh, spin: f64, area: Rect, buf: &mut Buffer) {
    let points = project_mesh(mesh, spin);
    let half = f64::from(MESH_EXTENT) * 0.6;
    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-half, half])
        .y_bounds([-half, half])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &points,
                color: Theme::TERRACOTTA,
            });
        })
        .render(area, buf);
}

fn hud_lines(mount: &GlobeMount, now: Instant) -> Vec<Line<'static>> {
    let phase = mount.phase();
    let view = mount.view();
    let dim = Theme::hud_style().add_modifier(Modifier::DIM);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("SYSTEM STATUS: ", dim),
            Span::styled(status_label(phase), Theme::title_style()),
            Span::styled(format!("  {}", chrono::Local::now().format("%H:%M:%S")), dim),
        ]),
        Line::from(Span::styled(
            format!("LAT {:>8.4}  LNG {:>8.4}  ALT {:.2}", view.lat, view.lng, view.altitude),
            Theme::hud_style(),
        )),
    ];
    match phase {
        Phase::Initial => {
            let hint = match mount.auto_trigger_in(now) {
                Some(left) => format!("click to zoom · auto in {}s", left.as_secs() + 1),
                None => "click to zoom".to_string(),
            };
            lines.push(Line::from(Span::styled(hint, Theme::accent_style())));
        }
        Phase::Transitioning => {
            let pct = (mount.transition_progress(now) * 100.0).round() as u32;
            lines.push(Line::from(Span::styled(format!("approach {pct}%"), Theme::accent_style())));
        }
        Phase::Final => {}
    }
    lines
}

fn typewriter_lines(mount: &GlobeMount) -> Vec<Line<'_>> {
    let typewriter = mount.typewriter();
    let cursor = typewriter.cursor_line();
    typewriter
        .visible_lines()
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut spans = vec![Span::styled(text, Theme::hud_style())];
            if cursor == Some(i) {
                spans.push(Span::styled("▌", Theme::marker_style()));
            }
            Line::from(spans)
        })
        .collect()
}

impl<'a> Widget for GlobeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        let Some(mount) = self.section.mounted() else {
            return;
        };
        if inner.height < 4 || inner.width < 20 {
            return;
        }

        let phase = mount.phase();
        let [stage, panel] = if phase == Phase::Initial {
            [inner, Rect::default()]
        } else {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(inner);
            [chunks[0], chunks[1]]
        };

        match (phase, self.mesh) {
            (Phase::Final, Some(mesh)) => {
                let spin = self.now.saturating_duration_since(mount.mounted_at()).as_secs_f64() * MESH_SPIN;
                render_mesh(mesh, spin, stage, buf);
            }
            _ => render_map(mount.view(), stage, buf),
        }

        let hud = hud_lines(mount, self.now);
        let hud_height = (hud.len() as u16).min(stage.height);
        Paragraph::new(hud).render(Rect { height: hud_height, ..stage }, buf);

        if panel.width > 0 {
            let block = Block::default()
                .borders(Borders::LEFT)
                .border_type(BorderType::Plain)
                .border_style(Theme::border_style())
                .title(Span::styled(" Karachi ", Theme::title_style()));
            Paragraph::new(typewriter_lines(mount))
                .block(block)
                .render(panel, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_per_phase() {
        assert_eq!(status_label(Phase::Initial), "ORBITAL VIEW");
        assert_eq!(status_label(Phase::Final), "3D CITY MAP");
    }

    #[test]
    fn projection_fits_the_canvas() {
        let mesh = Mesh {
            positions: vec![[-20.0, 0.0, 0.0], [20.0, 0.0, 0.0], [0.0, 10.0, 5.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
        };
        let points = project_mesh(&mesh, 0.0);
        assert_eq!(points.len(), 3);
        assert!((points[0].0 + 5.0).abs() < 1e-6);
        assert!((points[1].0 - 5.0).abs() < 1e-6);
        for (x, y) in points {
            assert!(x.abs() <= 6.0 && y.abs() <= 6.0);
        }
    }

    #[test]
    fn unmounted_globe_draws_nothing() {
        let section = GlobeSection::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        GlobeWidget::new(&section, Instant::now()).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
