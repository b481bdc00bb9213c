#![forbid(unsafe_code)]

//! Terminal scene surface: layout, hit testing, and drawing.
//!
//! Every scene is laid out on the same grid:
//!
//! ```text
//! row 0        header: brand, progress, track toggle
//! row 2        title
//! rows 4..h-5  scrolling body
//! row h-4      chips (TOOLS), start over (PROOF)
//! row h-3      controls: Prev, cross-links, Next
//! row h-1      status line
//! ```
//!
//! Layout is recomputed from `(scene, track, size)` on every call, so hit
//! testing and drawing can never disagree.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use folio_core::geometry::{Point, Rect};
use folio_core::hit::{ElementId, ElementKind, HitTarget};
use folio_runtime::ghost_cursor::{CursorFrame, CursorState};
use folio_runtime::scene::{SCENE_ORDER, Scene, Track};
use folio_runtime::session::{Command, Hit, SceneSurface, SessionView};
use folio_runtime::sound::SoundCue;

use crate::chime::{BellHandle, ChimeIndicator};

// ---------------------------------------------------------------------------
// Element ids
// ---------------------------------------------------------------------------

pub const TRACK_TOGGLE: ElementId = ElementId(1);
pub const INTRO_STAGE: ElementId = ElementId(2);
pub const INTRO_ENTER: ElementId = ElementId(3);
pub const PREV: ElementId = ElementId(10);
pub const NEXT: ElementId = ElementId(11);
pub const SKIP_TO_TOOLS: ElementId = ElementId(12);
pub const START_OVER: ElementId = ElementId(13);
pub const CONTACT: ElementId = ElementId(20);
pub const BACK_CONTROL: ElementId = ElementId(21);
const FIRST_CHIP: u64 = 30;

/// Tool chips on the TOOLS scene with their proficiency labels.
const CHIPS: [(&str, &str); 4] = [
    ("Rust", "Daily driver"),
    ("TypeScript", "Daily driver"),
    ("Figma", "Comfortable"),
    ("SQL", "Comfortable"),
];

// ---------------------------------------------------------------------------
// Placeholder copy
// ---------------------------------------------------------------------------

fn copy(scene: Scene, track: Track) -> (&'static str, &'static [&'static str]) {
    match (scene, track) {
        (Scene::Intro, Track::Design) => ("Hello. I make calm interfaces.", &[]),
        (Scene::Intro, Track::Logic) => ("fn hello() -> Portfolio", &[]),
        (Scene::AboutMe, Track::Design) => (
            "About me",
            &[
                "Designer who ships.",
                "",
                "I sketch in the browser and prototype in code.",
                "Small details carry the whole experience.",
            ],
        ),
        (Scene::AboutMe, Track::Logic) => (
            "About me",
            &[
                "Engineer who cares how things feel.",
                "",
                "State machines first, pixels second.",
                "Every interaction has a timeline.",
            ],
        ),
        (Scene::Core, Track::Design) => (
            "Core",
            &[
                "Motion with intent.",
                "Hierarchy through rhythm.",
                "Feedback within a frame.",
            ],
        ),
        (Scene::Core, Track::Logic) => (
            "Core",
            &[
                "Owned state, explicit transitions.",
                "Host-driven clocks.",
                "Failures that stay local.",
            ],
        ),
        (Scene::Proof, Track::Design) => (
            "Proof",
            &[
                "Case study: onboarding redesign.",
                "  Completion up, support tickets down.",
                "",
                "Case study: design system rollout.",
                "  Forty screens, one component library.",
                "",
                "Case study: motion guidelines.",
                "  Shared easing tokens across three apps.",
            ],
        ),
        (Scene::Proof, Track::Logic) => (
            "Proof",
            &[
                "Case study: realtime sync engine.",
                "  Conflict-free merges under flaky networks.",
                "",
                "Case study: render pipeline rewrite.",
                "  Frame budget halved on low-end devices.",
                "",
                "Case study: test harness.",
                "  Deterministic clocks for every animation.",
            ],
        ),
        (Scene::Tools, Track::Design) => (
            "Tools",
            &["What I reach for, and how often.", "Hover a chip for details."],
        ),
        (Scene::Tools, Track::Logic) => (
            "Tools",
            &["cargo, tsc, psql and a sketchbook.", "Hover a chip for details."],
        ),
        (Scene::Resolution, _) => ("Let's build something.", &[]),
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// A clickable or hoverable region.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub id: ElementId,
    pub kind: ElementKind,
    pub area: Rect,
    pub text: String,
    pub command: Option<Command>,
    pub hover_label: Option<String>,
}

impl Control {
    fn new(id: ElementId, kind: ElementKind, area: Rect, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            area,
            text: text.into(),
            command: None,
            hover_label: None,
        }
    }

    fn command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    fn hover(mut self, label: impl Into<String>) -> Self {
        self.hover_label = Some(label.into());
        self
    }

    /// Whether the control is drawn as text (the INTRO stage is not).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }

    fn to_hit(&self) -> Hit {
        let mut target = HitTarget::new(self.id, self.kind);
        if self.kind == ElementKind::Link {
            target = target.within(ElementKind::Other);
        }
        let mut hit = Hit::new(target);
        hit.command = self.command;
        hit.hover_label = self.hover_label.clone();
        hit
    }
}

const START_OVER_TEXT: &str = "Start over";

fn start_over(area: Rect) -> Control {
    Control::new(START_OVER, ElementKind::Link, area, START_OVER_TEXT)
        .command(Command::Reset)
        .hover("From the top")
}

/// Resolved positions for one scene at one terminal size.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub area: Rect,
    pub title: Rect,
    pub body: Rect,
    /// Controls in paint order; later entries sit on top.
    pub controls: Vec<Control>,
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

impl SceneLayout {
    #[must_use]
    pub fn compute(scene: Scene, track: Track, width: u16, height: u16) -> Self {
        let area = Rect::from_size(width, height);
        let (title_text, _) = copy(scene, track);
        let title = area.centered_row(2.min(height.saturating_sub(1)), text_width(title_text));
        let body = Rect::new(
            4.min(width),
            4.min(height),
            width.saturating_sub(8),
            height.saturating_sub(9),
        );
        let controls_row = height.saturating_sub(3);
        let mut controls = Vec::new();

        if scene == Scene::Intro {
            controls.push(
                Control::new(
                    INTRO_STAGE,
                    ElementKind::Other,
                    Rect::new(0, 1, width, height.saturating_sub(2)),
                    "",
                )
                .command(Command::Advance),
            );
            let text = "[ Enter ]";
            controls.push(
                Control::new(
                    INTRO_ENTER,
                    ElementKind::Button,
                    area.centered_row(height / 2 + 2, text_width(text)),
                    text,
                )
                .command(Command::Advance)
                .hover("Enter"),
            );
        }

        if scene.has_inline_back() {
            let text = "← Prev";
            controls.push(
                Control::new(
                    PREV,
                    ElementKind::Button,
                    Rect::new(2.min(width), controls_row, text_width(text), 1),
                    text,
                )
                .command(Command::Back)
                .hover("Prev"),
            );
        }

        if let Some(next) = scene.next()
            && scene != Scene::Intro
        {
            let text = "Next →";
            let w = text_width(text);
            controls.push(
                Control::new(
                    NEXT,
                    ElementKind::Button,
                    Rect::new(width.saturating_sub(w + 2), controls_row, w, 1),
                    text,
                )
                .command(Command::Advance)
                .hover(next.name()),
            );
        }

        match scene {
            Scene::Proof => {
                let text = "Skip to tools";
                controls.push(
                    Control::new(
                        SKIP_TO_TOOLS,
                        ElementKind::Link,
                        area.centered_row(controls_row, text_width(text)),
                        text,
                    )
                    .command(Command::GoTo(Scene::Tools))
                    .hover("Tools"),
                );
                controls.push(start_over(area.centered_row(
                    height.saturating_sub(4),
                    text_width(START_OVER_TEXT),
                )));
            }
            Scene::Tools => {
                let row = height.saturating_sub(4);
                let mut x = body.x;
                for (i, (name, level)) in CHIPS.iter().enumerate() {
                    let text = format!("[{name}]");
                    let w = text_width(&text);
                    controls.push(
                        Control::new(
                            ElementId(FIRST_CHIP + i as u64),
                            ElementKind::Link,
                            Rect::new(x, row, w, 1),
                            text,
                        )
                        .hover(*level),
                    );
                    x = x.saturating_add(w + 2);
                }
            }
            Scene::Resolution => {
                let back = "[×]";
                controls.push(
                    Control::new(
                        BACK_CONTROL,
                        ElementKind::Button,
                        Rect::new(2.min(width), 2.min(height), text_width(back), 1),
                        back,
                    )
                    .command(Command::Back)
                    .hover("Prev"),
                );
                let contact = "[ Copy email ]";
                controls.push(
                    Control::new(
                        CONTACT,
                        ElementKind::Button,
                        area.centered_row(height / 2, text_width(contact)),
                        contact,
                    )
                    .command(Command::Contact)
                    .hover("Copy email"),
                );
                controls.push(start_over(
                    area.centered_row(controls_row, text_width(START_OVER_TEXT)),
                ));
            }
            Scene::Intro | Scene::AboutMe | Scene::Core => {}
        }

        let toggle = format!("[{}]", track.toggled().as_str());
        let w = text_width(&toggle);
        controls.push(
            Control::new(
                TRACK_TOGGLE,
                ElementKind::Button,
                Rect::new(width.saturating_sub(w + 1), 0, w, 1),
                toggle,
            )
            .command(Command::ToggleTrack)
            .hover(format!("Switch to {}", track.toggled())),
        );

        Self {
            area,
            title,
            body,
            controls,
        }
    }

    /// Topmost control under `(x, y)`.
    #[must_use]
    pub fn control_at(&self, x: u16, y: u16) -> Option<&Control> {
        self.controls.iter().rev().find(|c| c.area.contains(x, y))
    }

    #[must_use]
    pub fn control(&self, id: ElementId) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Resting center of the magnetic contact button.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.control(CONTACT).map(|c| c.area.center())
    }
}

/// Rows of body copy that do not fit in the viewport.
fn overflow(scene: Scene, track: Track, body: Rect) -> u16 {
    let (_, lines) = copy(scene, track);
    u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(body.height)
}

/// Longest prefix of `text` that fits in `max` columns.
fn clip(text: &str, max: u16) -> &str {
    let mut used = 0usize;
    for (i, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > usize::from(max) {
            return &text[..i];
        }
    }
    text
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Renders sessions to a terminal writer.
pub struct TerminalSurface<W: Write> {
    out: W,
    width: u16,
    height: u16,
    chime: ChimeIndicator,
    bell: BellHandle,
    frames: u64,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            width,
            height,
            chime: ChimeIndicator::default(),
            bell: BellHandle::default(),
            frames: 0,
        }
    }

    /// Show cues from `indicator` on the status line and ring `bell`.
    #[must_use]
    pub fn with_chime(mut self, indicator: ChimeIndicator, bell: BellHandle) -> Self {
        self.chime = indicator;
        self.bell = bell;
        self
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn layout(&self, scene: Scene, track: Track) -> SceneLayout {
        SceneLayout::compute(scene, track, self.width, self.height)
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn accent(track: Track) -> Color {
        match track {
            Track::Design => Color::Magenta,
            Track::Logic => Color::Green,
        }
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> io::Result<()> {
        if y >= self.height || x >= self.width {
            return Ok(());
        }
        let text = clip(text, self.width - x);
        queue!(self.out, MoveTo(x, y), Print(text))
    }

    fn draw_header(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        let accent = Self::accent(view.track);
        let scene = view.navigation.current;
        queue!(
            self.out,
            SetForegroundColor(accent),
            SetAttribute(Attribute::Bold)
        )?;
        self.draw_text(1, 0, "FOLIO")?;
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        let progress = format!("{}/{}", scene.index() + 1, SCENE_ORDER.len());
        self.draw_text(8, 0, &progress)
    }

    fn draw_copy(&mut self, view: &SessionView<'_>, layout: &SceneLayout) -> io::Result<()> {
        let (title, lines) = copy(view.navigation.current, view.track);
        queue!(self.out, SetAttribute(Attribute::Bold))?;
        self.draw_text(layout.title.x, layout.title.y, title)?;
        queue!(self.out, SetAttribute(Attribute::Reset))?;

        let body = layout.body;
        let visible = lines
            .iter()
            .skip(usize::from(view.scroll_offset))
            .take(usize::from(body.height));
        for (row, line) in visible.enumerate() {
            let y = body.y + row as u16;
            let line = clip(line, body.width);
            self.draw_text(body.x, y, line)?;
        }
        Ok(())
    }

    fn draw_controls(&mut self, view: &SessionView<'_>, layout: &SceneLayout) -> io::Result<()> {
        let accent = Self::accent(view.track);
        for control in &layout.controls {
            let hidden_back = control.id == BACK_CONTROL && !view.show_back_control;
            if !control.is_visible() || hidden_back {
                continue;
            }
            let (mut x, mut y) = (control.area.x, control.area.y);
            if control.id == CONTACT
                && let Some(position) = view.magnet
            {
                let rest = control.area.center();
                let (dx, dy) = rest.delta_to(position);
                x = shift(x, dx, self.width);
                y = shift(y, dy, self.height);
            }
            let hovered = view.hovered == Some(control.id);
            queue!(self.out, SetForegroundColor(accent))?;
            if hovered {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            self.draw_text(x, y, &control.text)?;
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
            if control.id == CONTACT && view.contact_copied {
                let note = "Copied!";
                let row = layout.area.centered_row(y.saturating_add(2), text_width(note));
                self.draw_text(row.x, row.y, note)?;
            }
        }
        Ok(())
    }

    fn draw_cursor(&mut self, frame: &CursorFrame, track: Track) -> io::Result<()> {
        let (x, y) = frame.dot.to_cell();
        let glyph = match frame.state {
            CursorState::Hover => "◉",
            CursorState::Idle if frame.scale > 1.1 => "●",
            _ => "•",
        };
        queue!(self.out, SetForegroundColor(Self::accent(track)))?;
        if frame.opacity < 0.75 {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        self.draw_text(x, y, glyph)?;
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;

        if let Some(label) = &frame.label {
            let (lx, ly) = frame.label_position.to_cell();
            queue!(self.out, SetAttribute(Attribute::Italic))?;
            self.draw_text(lx.saturating_add(2), ly.saturating_add(1), label)?;
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    fn draw_status(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        let status = status_line(
            view.navigation.current,
            view.track,
            view.scroll_locked,
            self.chime.last(),
        );
        let row = self.height.saturating_sub(1);
        queue!(self.out, SetAttribute(Attribute::Dim))?;
        self.draw_text(0, row, &status)?;
        queue!(self.out, SetAttribute(Attribute::Reset))
    }
}

const KEY_HINTS: &str = "←/Esc back  →/Enter next  t track  q quit";

/// Status line text. Live state comes first so clipping only eats key hints.
fn status_line(scene: Scene, track: Track, locked: bool, cue: Option<SoundCue>) -> String {
    let mut status = format!(" {} · {}", scene.name(), track);
    if let Some(cue) = cue {
        status.push_str("  ♪ ");
        status.push_str(cue.name());
    }
    if locked {
        status.push_str("  · settling");
    }
    status.push_str(" │ ");
    status.push_str(KEY_HINTS);
    status
}

/// Move a cell coordinate by a rounded float delta, staying on screen.
fn shift(at: u16, delta: f32, limit: u16) -> u16 {
    let moved = f32::from(at) + delta.round();
    moved.clamp(0.0, f32::from(limit.saturating_sub(1))) as u16
}

impl<W: Write> SceneSurface for TerminalSurface<W> {
    type Error = io::Error;

    fn hit_test(&self, scene: Scene, track: Track, x: u16, y: u16) -> Option<Hit> {
        let layout = self.layout(scene, track);
        let control = layout.control_at(x, y)?;
        if control.id == BACK_CONTROL && !scene.shows_back_control() {
            return None;
        }
        Some(control.to_hit())
    }

    fn anchor(&self, scene: Scene, track: Track) -> Option<Point> {
        self.layout(scene, track).anchor()
    }

    fn scroll_limit(&self, scene: Scene, track: Track) -> u16 {
        overflow(scene, track, self.layout(scene, track).body)
    }

    fn render(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        let layout = self.layout(view.navigation.current, view.track);
        queue!(self.out, Clear(ClearType::All))?;
        self.draw_header(view)?;
        self.draw_copy(view, &layout)?;
        self.draw_controls(view, &layout)?;
        if let Some(frame) = &view.cursor {
            self.draw_cursor(frame, view.track)?;
        }
        self.draw_status(view)?;
        if self.bell.take() {
            queue!(self.out, Print('\u{7}'))?;
        }
        self.frames += 1;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u16 = 80;
    const H: u16 = 24;

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::new(Vec::new(), W, H)
    }

    #[test]
    fn intro_stage_advances_everywhere() {
        let s = surface();
        let hit = s.hit_test(Scene::Intro, Track::Design, 5, 10).unwrap();
        assert_eq!(hit.target.id(), INTRO_STAGE);
        assert_eq!(hit.command, Some(Command::Advance));
        assert!(!hit.target.is_interactive());
        assert_eq!(hit.hover_label, None);
    }

    #[test]
    fn intro_enter_button_sits_above_stage() {
        let layout = SceneLayout::compute(Scene::Intro, Track::Design, W, H);
        let enter = layout.control(INTRO_ENTER).unwrap().area;
        let hit = layout.control_at(enter.x, enter.y).unwrap();
        assert_eq!(hit.id, INTRO_ENTER);
    }

    #[test]
    fn inline_back_scenes_have_prev_and_next() {
        for scene in [Scene::AboutMe, Scene::Core, Scene::Proof, Scene::Tools] {
            let layout = SceneLayout::compute(scene, Track::Logic, W, H);
            let prev = layout.control(PREV).unwrap();
            assert_eq!(prev.command, Some(Command::Back));
            assert_eq!(prev.hover_label.as_deref(), Some("Prev"));
            let next = layout.control(NEXT).unwrap();
            assert_eq!(next.command, Some(Command::Advance));
            assert_eq!(prev.area.y, H - 3);
        }
    }

    #[test]
    fn resolution_has_back_contact_and_reset() {
        let s = surface();
        let layout = s.layout(Scene::Resolution, Track::Design);
        assert!(layout.control(PREV).is_none());
        assert!(layout.control(NEXT).is_none());
        let back = layout.control(BACK_CONTROL).unwrap();
        let hit = s
            .hit_test(Scene::Resolution, Track::Design, back.area.x, back.area.y)
            .unwrap();
        assert_eq!(hit.command, Some(Command::Back));
        assert_eq!(hit.hover_label.as_deref(), Some("Prev"));
        assert_eq!(
            layout.control(CONTACT).unwrap().command,
            Some(Command::Contact)
        );
        assert_eq!(
            layout.control(START_OVER).unwrap().command,
            Some(Command::Reset)
        );
        assert!(s.anchor(Scene::Resolution, Track::Design).is_some());
        assert!(s.anchor(Scene::Core, Track::Design).is_none());
    }

    #[test]
    fn proof_links_to_tools() {
        let layout = SceneLayout::compute(Scene::Proof, Track::Design, W, H);
        let link = layout.control(SKIP_TO_TOOLS).unwrap();
        assert_eq!(link.command, Some(Command::GoTo(Scene::Tools)));
        assert_eq!(link.kind, ElementKind::Link);
        let reset = layout.control(START_OVER).unwrap();
        assert_eq!(reset.command, Some(Command::Reset));
        assert_ne!(reset.area.y, link.area.y);
    }

    #[test]
    fn tool_chips_carry_labels_without_commands() {
        let layout = SceneLayout::compute(Scene::Tools, Track::Design, W, H);
        let chips: Vec<_> = layout
            .controls
            .iter()
            .filter(|c| c.id.0 >= FIRST_CHIP)
            .collect();
        assert_eq!(chips.len(), CHIPS.len());
        assert!(chips.iter().all(|c| c.command.is_none()));
        assert_eq!(chips[0].hover_label.as_deref(), Some("Daily driver"));
        assert!(chips.windows(2).all(|w| w[0].area.right() < w[1].area.x));
    }

    #[test]
    fn toggle_is_topmost_and_names_other_track() {
        let layout = SceneLayout::compute(Scene::Intro, Track::Design, W, H);
        let toggle = layout.controls.last().unwrap();
        assert_eq!(toggle.id, TRACK_TOGGLE);
        assert_eq!(toggle.text, "[logic]");
        assert_eq!(toggle.area.right(), W - 1);
    }

    #[test]
    fn empty_space_misses() {
        let s = surface();
        assert!(s.hit_test(Scene::Core, Track::Design, 40, 12).is_none());
    }

    #[test]
    fn scroll_limit_reflects_overflow() {
        let tall = TerminalSurface::new(Vec::new(), W, 40);
        assert_eq!(tall.scroll_limit(Scene::Proof, Track::Design), 0);
        let short = TerminalSurface::new(Vec::new(), W, 12);
        // 12 rows leaves a 3-row body for 8 lines of copy.
        assert_eq!(short.scroll_limit(Scene::Proof, Track::Design), 5);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        for scene in SCENE_ORDER {
            let layout = SceneLayout::compute(scene, Track::Design, 3, 2);
            assert!(!layout.controls.is_empty());
        }
    }

    #[test]
    fn clip_respects_wide_chars() {
        assert_eq!(clip("hello", 3), "hel");
        assert_eq!(clip("→→→", 3), "→→→");
        assert_eq!(clip("日本語", 3), "日");
        assert_eq!(clip("", 0), "");
    }

    #[test]
    fn sound_cue_survives_narrow_status_line() {
        let status = status_line(Scene::Resolution, Track::Design, true, Some(SoundCue::Whoosh));
        let visible = clip(&status, 50);
        assert!(visible.contains("♪ whoosh"), "{visible:?}");
        assert!(visible.contains("settling"));
        assert!(status.ends_with(KEY_HINTS));
    }

    #[test]
    fn rendered_status_keeps_cue_at_80_columns() {
        use crate::chime::Chime;
        use folio_runtime::config::FolioConfig;
        use folio_runtime::session::Session;
        use folio_runtime::sound::SoundPlayer;
        use std::time::Instant;

        let (chime, indicator) = Chime::new(false);
        let bell = chime.bell_handle();
        let mut session = Session::new(FolioConfig::default(), SoundPlayer::new(chime))
            .starting_at(Scene::Resolution);
        let t0 = Instant::now();
        session.start(t0);
        session.execute(Command::Contact, t0);
        let mut surface = TerminalSurface::new(Vec::new(), W, H).with_chime(indicator, bell);
        session.render(&mut surface).unwrap();
        let out = String::from_utf8_lossy(surface.writer()).into_owned();
        assert!(out.contains("♪ pop"));
        assert!(out.contains("settling"));
    }

    #[test]
    fn shift_clamps_to_screen() {
        assert_eq!(shift(5, 2.4, 80), 7);
        assert_eq!(shift(1, -3.0, 80), 0);
        assert_eq!(shift(78, 5.0, 80), 79);
    }
}
