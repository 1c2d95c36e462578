//! User configuration: key bindings, motion tunables, and persistence.
//!
//! Stored as a simple `key = value` text file at
//! `$XDG_CONFIG_HOME/kolachi-scroll/config.toml`
//! (default `~/.config/kolachi-scroll/config.toml`).  Unknown keys and
//! unparsable values are logged and skipped; everything missing keeps its
//! default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::marquee::MarqueeSpeed;
use crate::core::phase::PhaseConfig;
use crate::core::rotation::RotationConfig;
use crate::core::segments::{ResponsiveStrip, SegmentCurve};
use crate::core::typewriter::TypewriterConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    NextSection,
    PrevSection,
    Trigger,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::PageDown,
        Action::PageUp,
        Action::NextSection,
        Action::PrevSection,
        Action::Trigger,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollDown => "Scroll Down",
            Action::ScrollUp => "Scroll Up",
            Action::PageDown => "Page Down",
            Action::PageUp => "Page Up",
            Action::NextSection => "Next Section",
            Action::PrevSection => "Previous Section",
            Action::Trigger => "Zoom to Karachi",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::Trigger => "trigger",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

/// Key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT take part in the comparison.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Config-file / status-bar form, e.g. `"Ctrl+c"`, `"PageDown"`, `"j"`.
    pub fn to_config_string(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        match self.code {
            KeyCode::Char(' ') => s.push_str("Space"),
            KeyCode::Char(c) => s.push(c),
            KeyCode::F(n) => s.push_str(&format!("F{n}")),
            other => s.push_str(named_key(other).unwrap_or("?")),
        }
        s
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key = parts.pop()?;
        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }
        let lower = key.to_lowercase();
        let code = match lower.as_str() {
            "space" => KeyCode::Char(' '),
            "return" => KeyCode::Enter,
            "escape" => KeyCode::Esc,
            "pgup" => KeyCode::PageUp,
            "pgdn" => KeyCode::PageDown,
            f if f.starts_with('f') && f.len() > 1 => KeyCode::F(f[1..].parse().ok()?),
            _ if key.chars().count() == 1 => KeyCode::Char(key.chars().next()?),
            named => NAMED_KEYS
                .iter()
                .find(|(_, n)| n.to_lowercase() == named)
                .map(|(code, _)| *code)?,
        };
        Some(Self { code, modifiers })
    }
}

const NAMED_KEYS: &[(KeyCode, &str)] = &[
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::Esc, "Esc"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::BackTab, "BackTab"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
];

fn named_key(code: KeyCode) -> Option<&'static str> {
    NAMED_KEYS.iter().find(|(c, _)| *c == code).map(|(_, n)| *n)
}

// ───────────────────────────────────────── motion ────────────

/// Every animation tunable, with the site's values as defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    pub segment_curve: SegmentCurve,
    pub strip: ResponsiveStrip,
    pub phase: PhaseConfig,
    pub rotation: RotationConfig,
    pub typewriter: TypewriterConfig,
    /// Culture card stack auto-cycle period.
    pub card_interval: Duration,
    /// Below this viewport width the story connectors are drawn whole and
    /// every story card is shown.
    pub story_breakpoint: f64,
    /// Share of a story card that must be on screen to reveal it.
    pub reveal_threshold: f64,
    pub marquee_speed: MarqueeSpeed,
    /// Testimonial card pitch on the marquee track.
    pub marquee_card_px: u32,
    /// Virtual pixels scrolled per scroll key / wheel notch.
    pub scroll_step_px: f64,
    /// Page scroll smoothing: fraction of the remaining distance per frame.
    pub scroll_smoothing: f64,
    /// Frame rate of the update loop.
    pub fps: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            segment_curve: SegmentCurve::default(),
            strip: ResponsiveStrip::default(),
            phase: PhaseConfig::default(),
            rotation: RotationConfig::default(),
            typewriter: TypewriterConfig::default(),
            card_interval: Duration::from_millis(2000),
            story_breakpoint: 768.0,
            reveal_threshold: 0.2,
            marquee_speed: MarqueeSpeed::Slow,
            marquee_card_px: 400,
            scroll_step_px: 96.0,
            scroll_smoothing: 0.3,
            fps: 30,
        }
    }
}

impl MotionConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, 240)))
    }

    /// Apply one `key = value` pair.  Returns `false` for unknown keys or
    /// bad values.
    fn apply(&mut self, key: &str, value: &str) -> bool {
        let float = || value.parse::<f64>().ok().filter(|v| v.is_finite());
        let millis = || value.parse::<u64>().ok().map(Duration::from_millis);
        macro_rules! set {
            ($field:expr, $parsed:expr) => {
                match $parsed {
                    Some(v) => {
                        $field = v;
                        true
                    }
                    None => false,
                }
            };
        }
        match key {
            "fade_gain" => set!(self.segment_curve.fade_gain, float()),
            "scale_base" => set!(self.segment_curve.scale_base, float()),
            "rise_px" => set!(self.segment_curve.rise_px, float()),
            "compact_breakpoint_px" => set!(self.strip.breakpoint, float()),
            "segment_width_px" => set!(self.strip.wide.segment_width, float()),
            "segment_gap_px" => set!(self.strip.wide.gap, float()),
            "end_padding_px" => set!(self.strip.wide.end_padding, float()),
            "compact_segment_width_px" => set!(self.strip.compact.segment_width, float()),
            "compact_segment_gap_px" => set!(self.strip.compact.gap, float()),
            "compact_end_padding_px" => set!(self.strip.compact.end_padding, float()),
            "auto_trigger_ms" => match value.parse::<u64>() {
                Ok(0) => {
                    self.phase.auto_trigger_after = None;
                    true
                }
                Ok(ms) => {
                    self.phase.auto_trigger_after = Some(Duration::from_millis(ms));
                    true
                }
                Err(_) => false,
            },
            "transition_ms" => set!(self.phase.transition, millis()),
            "rotation_turns" => set!(self.rotation.turns, float()),
            "rotation_smoothing" => set!(self.rotation.smoothing, float().map(|v| v.clamp(0.01, 1.0))),
            "rotation_complete_at" => set!(self.rotation.complete_at, float()),
            "rotation_unlock_ms" => set!(self.rotation.unlock_after, millis()),
            "typewriter_char_ms" => set!(self.typewriter.char_delay, millis()),
            "typewriter_line_pause_ms" => set!(self.typewriter.line_pause, millis()),
            "card_interval_ms" => set!(self.card_interval, millis()),
            "story_breakpoint_px" => set!(self.story_breakpoint, float()),
            "reveal_threshold" => set!(self.reveal_threshold, float().map(|v| v.clamp(0.0, 1.0))),
            "marquee_speed" => set!(self.marquee_speed, MarqueeSpeed::parse(value)),
            "marquee_card_px" => set!(self.marquee_card_px, value.parse::<u32>().ok().filter(|v| *v > 0)),
            "scroll_step_px" => set!(self.scroll_step_px, float().map(f64::abs)),
            "scroll_smoothing" => set!(self.scroll_smoothing, float().map(|v| v.clamp(0.05, 1.0))),
            "fps" => set!(self.fps, value.parse::<u32>().ok().map(|v| v.clamp(1, 240))),
            _ => false,
        }
    }

    fn serialise_into(&self, lines: &mut Vec<String>) {
        let ms = |d: Duration| d.as_millis();
        let auto = self.phase.auto_trigger_after.map_or(0, ms);
        lines.extend([
            format!("fade_gain = {}", self.segment_curve.fade_gain),
            format!("scale_base = {}", self.segment_curve.scale_base),
            format!("rise_px = {}", self.segment_curve.rise_px),
            format!("compact_breakpoint_px = {}", self.strip.breakpoint),
            format!("segment_width_px = {}", self.strip.wide.segment_width),
            format!("segment_gap_px = {}", self.strip.wide.gap),
            format!("end_padding_px = {}", self.strip.wide.end_padding),
            format!("compact_segment_width_px = {}", self.strip.compact.segment_width),
            format!("compact_segment_gap_px = {}", self.strip.compact.gap),
            format!("compact_end_padding_px = {}", self.strip.compact.end_padding),
            "# 0 disables the automatic globe transition".to_string(),
            format!("auto_trigger_ms = {auto}"),
            format!("transition_ms = {}", ms(self.phase.transition)),
            format!("rotation_turns = {}", self.rotation.turns),
            format!("rotation_smoothing = {}", self.rotation.smoothing),
            format!("rotation_complete_at = {}", self.rotation.complete_at),
            format!("rotation_unlock_ms = {}", ms(self.rotation.unlock_after)),
            format!("typewriter_char_ms = {}", ms(self.typewriter.char_delay)),
            format!("typewriter_line_pause_ms = {}", ms(self.typewriter.line_pause)),
            format!("card_interval_ms = {}", ms(self.card_interval)),
            format!("story_breakpoint_px = {}", self.story_breakpoint),
            format!("reveal_threshold = {}", self.reveal_threshold),
            "# slow, normal or fast".to_string(),
            format!("marquee_speed = {}", self.marquee_speed.label()),
            format!("marquee_card_px = {}", self.marquee_card_px),
            format!("scroll_step_px = {}", self.scroll_step_px),
            format!("scroll_smoothing = {}", self.scroll_smoothing),
            format!("fps = {}", self.fps),
        ]);
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub motion: MotionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            motion: MotionConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(PrevSection, vec![KeyBind::new(BackTab, KeyModifiers::SHIFT), KeyBind::new(Char('p'), n)]);
        m.insert(Trigger, vec![KeyBind::new(Enter, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Action bound to `event`; the binding with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        self.bindings
            .get(&action)
            .and_then(|b| b.first())
            .map_or_else(|| "?".into(), KeyBind::to_config_string)
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: next section | {}: zoom | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::Trigger),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("{e}; using defaults");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    /// Write to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, self.serialise()).map_err(write_err)
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();
        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "config line without '=' ignored");
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Some(action) = Action::from_config_key(key) {
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    tracing::warn!(line = lineno + 1, key, "no usable key bindings");
                } else {
                    config.bindings.insert(action, parsed);
                }
                continue;
            }

            if !config.motion.apply(key, value) {
                tracing::warn!(line = lineno + 1, key, value, "unknown config key or bad value");
            }
        }
        config
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# kolachi-scroll configuration".to_string(),
            String::new(),
            "[motion]".to_string(),
        ];
        self.motion.serialise_into(&mut lines);
        lines.extend([
            String::new(),
            "[keys]".to_string(),
            "# Format: action = Key1, Key2, ...   Modifiers: Ctrl+, Alt+, Shift+".to_string(),
        ]);
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// `$XDG_CONFIG_HOME/kolachi-scroll/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn parses_named_and_modified_keys() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBind::parse("pagedown"),
            Some(KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("Alt+Up"),
            Some(KeyBind::new(KeyCode::Up, KeyModifiers::ALT))
        );
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("Nope"), None);
    }

    #[test]
    fn default_bindings_match() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::ScrollDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Trigger)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_overrides_motion_and_keys() {
        let config = AppConfig::parse(
            "# comment\n[motion]\nfade_gain = 3\nauto_trigger_ms = 0\nfps = 1000\nbogus = 1\nscale_base = abc\n[keys]\nquit = x, Ctrl+q\n",
        );
        assert_eq!(config.motion.segment_curve.fade_gain, 3.0);
        assert_eq!(config.motion.segment_curve.scale_base, 0.92);
        assert_eq!(config.motion.phase.auto_trigger_after, None);
        assert_eq!(config.motion.fps, 240);
        assert_eq!(
            config.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            ]
        );
    }

    #[test]
    fn serialised_defaults_parse_back_to_defaults() {
        let original = AppConfig::default();
        let reparsed = AppConfig::parse(&original.serialise());
        assert_eq!(reparsed.motion, original.motion);
        for &action in Action::ALL {
            assert_eq!(reparsed.bindings[&action], original.bindings[&action], "{action:?}");
        }
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.motion.card_interval = Duration::from_millis(750);
        config.motion.marquee_speed = MarqueeSpeed::Fast;
        config.bindings.insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::ALT)]);

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.motion, config.motion);
        assert_eq!(loaded.bindings[&Action::Quit], config.bindings[&Action::Quit]);
    }

    #[test]
    fn save_into_a_file_path_reports_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let err = AppConfig::default().save_to(&blocker.join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }), "{err}");
    }

    #[test]
    fn frame_interval_from_fps() {
        let mut motion = MotionConfig::default();
        motion.fps = 50;
        assert_eq!(motion.frame_interval(), Duration::from_millis(20));
    }
}
