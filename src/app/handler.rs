//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::ui::layout::AppLayout;
use crate::ui::stage;

use super::event::AppEvent;
use super::page::{SectionKind, CELL_H_PX};
use super::state::AppState;

/// Share of the viewport a page step moves.
const PAGE_FRACTION: f64 = 0.9;

pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handle_key(state, k),
        AppEvent::Mouse(m) => handle_mouse(state, m),
        AppEvent::Resize(w, h) => state.resize(ratatui::layout::Rect::new(0, 0, w, h)),
    }
}

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    if key.kind == KeyEventKind::Release {
        return;
    }
    if let Some(action) = state.config.match_key(key) {
        state.status_message = None;
        apply_action(state, action);
    }
}

pub fn apply_action(state: &mut AppState, action: Action) {
    let vh = state.viewport.height;
    let step = state.config.motion.scroll_step_px;
    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollDown => state.scroll.scroll_by(step),
        Action::ScrollUp => state.scroll.scroll_by(-step),
        Action::PageDown => state.scroll.scroll_by(vh * PAGE_FRACTION),
        Action::PageUp => state.scroll.scroll_by(-vh * PAGE_FRACTION),
        Action::NextSection => {
            let top = state.page.next_section_top(state.scroll.target(), vh);
            state.scroll.scroll_to(top);
        }
        Action::PrevSection => {
            let top = state.page.prev_section_top(state.scroll.target(), vh);
            state.scroll.scroll_to(top);
        }
        Action::Trigger => {
            let section = state.current_section();
            activate(state, section);
        }
    }
}

/// Click or Enter on a section.
fn activate(state: &mut AppState, section: Option<SectionKind>) {
    match section {
        Some(SectionKind::Geography) => {
            if state.globe.click(state.now) {
                state.status_message = Some("Zooming in on Karachi".to_string());
            }
        }
        Some(SectionKind::CultureStack) => state.cards.send_top_to_back(),
        _ => {}
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);
    let step = state.config.motion.scroll_step_px;

    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll.scroll_by(step),
        MouseEventKind::ScrollUp => state.scroll.scroll_by(-step),
        MouseEventKind::Down(MouseButton::Left) => {
            let stage_area = layout.stage_area;
            if !point_in_rect(stage_area, mouse.column, mouse.row) {
                return;
            }
            let y_px = f64::from(mouse.row - stage_area.y) * CELL_H_PX;
            let section = stage::hit_test(state, y_px);
            activate(state, section);
        }
        _ => {}
    }
}

fn point_in_rect(rect: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::phase::Phase;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;
    use std::time::{Duration, Instant};

    fn state() -> AppState {
        AppState::new(AppConfig::default(), Rect::new(0, 0, 160, 42), false, Instant::now())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);

        let mut s = state();
        handle_key(
            &mut s,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(s.should_quit);
    }

    #[test]
    fn scroll_keys_move_the_target() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('j')));
        assert_eq!(s.scroll.target(), 96.0);
        handle_key(&mut s, press(KeyCode::Char('k')));
        assert_eq!(s.scroll.target(), 0.0);
        handle_key(&mut s, press(KeyCode::Tab));
        assert_eq!(s.scroll.target(), 640.0);
    }

    #[test]
    fn clicking_the_globe_starts_the_zoom() {
        let mut s = state();
        s.scroll.jump_to(640.0);
        s.update(s.now + Duration::from_millis(10));
        assert_eq!(s.current_section(), Some(SectionKind::Geography));

        handle_mouse(&mut s, click(80, 20));
        assert_eq!(s.globe.mounted().map(|m| m.phase()), Some(Phase::Transitioning));
        assert!(s.status_message.is_some());

        // Latched: a second click changes nothing.
        s.status_message = None;
        handle_mouse(&mut s, click(80, 20));
        assert!(s.status_message.is_none());
    }

    #[test]
    fn a_queued_batch_applies_in_order() {
        let mut s = state();
        let batch = [
            AppEvent::Key(press(KeyCode::Char('j'))),
            AppEvent::Key(press(KeyCode::Char('j'))),
            AppEvent::Resize(100, 30),
            AppEvent::Key(press(KeyCode::Char('k'))),
        ];
        for event in batch {
            handle_event(&mut s, event);
        }
        assert_eq!(s.terminal_area, Rect::new(0, 0, 100, 30));
        assert_eq!(s.viewport.height, 28.0 * CELL_H_PX);
        assert!(!s.should_quit);
    }

    #[test]
    fn clicks_outside_the_stage_are_ignored() {
        let mut s = state();
        s.scroll.jump_to(640.0);
        s.update(s.now);
        handle_mouse(&mut s, click(80, 41));
        assert_eq!(s.globe.mounted().map(|m| m.phase()), Some(Phase::Initial));
    }
}
