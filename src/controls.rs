//! On-screen controls: two sliders and two buttons in a strip under the grid.
//!
//! There is no text rendering, so buttons carry icons and the window title
//! shows the labels and values.

use glam::Vec2;
use image::Rgba;

use crate::params::{ControlDefaults, SliderSpec};
use crate::render::Surface;

const STRIP_BG: Rgba<u8> = Rgba([28, 28, 34, 255]);
const TRACK: Rgba<u8> = Rgba([70, 70, 80, 255]);
const KNOB: Rgba<u8> = Rgba([230, 230, 235, 255]);
const BUTTON: Rgba<u8> = Rgba([52, 52, 62, 255]);
const ICON: Rgba<u8> = Rgba([230, 230, 235, 255]);
const PADDING: f32 = 10.0;

/// Axis-aligned hit box in frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < max.x && point.y < max.y
    }
}

/// Numeric slider with a fixed range and step
#[derive(Debug, Clone)]
pub struct Slider {
    spec: SliderSpec,
    value: f64,
    bounds: Bounds,
}

impl Slider {
    pub fn new(spec: SliderSpec, bounds: Bounds) -> Self {
        let mut slider = Self {
            spec,
            value: spec.default,
            bounds,
        };
        slider.set_value(spec.default);
        slider
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn spec(&self) -> &SliderSpec {
        &self.spec
    }

    /// Clamp into range and snap to the nearest step
    pub fn set_value(&mut self, value: f64) {
        let clamped = value.clamp(self.spec.min, self.spec.max);
        let snapped = if self.spec.step > 0.0 {
            let steps = ((clamped - self.spec.min) / self.spec.step).round();
            (self.spec.min + steps * self.spec.step).min(self.spec.max)
        } else {
            clamped
        };
        self.value = snapped;
    }

    /// Move by `steps` increments (negative moves down)
    pub fn nudge(&mut self, steps: i32) {
        self.set_value(self.value + steps as f64 * self.spec.step);
    }

    /// Position of the value along the track in [0, 1]
    pub fn fraction(&self) -> f64 {
        let span = self.spec.max - self.spec.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.spec.min) / span
    }

    /// Set the value from a pointer x coordinate on the track
    pub fn set_from_pointer(&mut self, x: f32) {
        let t = ((x - self.bounds.origin.x) / self.bounds.size.x.max(1.0)).clamp(0.0, 1.0) as f64;
        self.set_value(self.spec.min + t * (self.spec.max - self.spec.min));
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let b = self.bounds;
        let track_h = 4.0;
        surface.fill_rect(
            Vec2::new(b.origin.x, b.origin.y + (b.size.y - track_h) * 0.5),
            Vec2::new(b.size.x, track_h),
            TRACK,
        );
        let knob_w = 8.0;
        let knob_x = b.origin.x + self.fraction() as f32 * (b.size.x - knob_w);
        surface.fill_rect(Vec2::new(knob_x, b.origin.y), Vec2::new(knob_w, b.size.y), KNOB);
    }
}

/// What a button draws as its icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Play,
    Pause,
    Clear,
}

/// Clickable button with a label and an icon
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    icon: Icon,
    bounds: Bounds,
}

impl Button {
    pub fn new(label: &str, icon: Icon, bounds: Bounds) -> Self {
        Self {
            label: label.to_string(),
            icon,
            bounds,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str, icon: Icon) {
        self.label = label.to_string();
        self.icon = icon;
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let b = self.bounds;
        surface.fill_rect(b.origin, b.size, BUTTON);

        let centre = b.origin + b.size * 0.5;
        let unit = (b.size.y * 0.18).max(2.0);
        match self.icon {
            Icon::Pause => {
                for dx in [-1.6, 0.6] {
                    surface.fill_rect(
                        Vec2::new(centre.x + dx * unit, centre.y - 2.0 * unit),
                        Vec2::new(unit, 4.0 * unit),
                        ICON,
                    );
                }
            }
            Icon::Play => {
                // Stepped triangle, widest on the left
                for k in 0..4 {
                    let half_h = (4 - k) as f32 * unit * 0.5;
                    let x = centre.x - 1.5 * unit + k as f32 * unit * 0.75;
                    surface.fill_rect(
                        Vec2::new(x, centre.y - half_h),
                        Vec2::new(unit * 0.75, half_h * 2.0),
                        ICON,
                    );
                }
            }
            Icon::Clear => {
                surface.stroke_rect(
                    Vec2::new(centre.x - 1.5 * unit, centre.y - 1.5 * unit),
                    Vec2::splat(3.0 * unit),
                    ICON,
                );
            }
        }
    }
}

/// Which control a pointer event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHit {
    Speed,
    Strength,
    PlayPause,
    Clear,
}

/// Result of a pointer press on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    PlayPauseClicked,
    ClearClicked,
    SliderChanged,
}

/// The control strip: Speed and Strength sliders, Play/Pause and Clear buttons
#[derive(Debug, Clone)]
pub struct ControlPanel {
    bounds: Bounds,
    pub speed: Slider,
    pub strength: Slider,
    pub play_pause: Button,
    pub clear: Button,
    dragging: Option<ControlHit>,
}

impl ControlPanel {
    /// Lay out the panel in the strip starting at `top` across `width` pixels
    pub fn new(defaults: &ControlDefaults, top: f32, width: f32, height: f32) -> Self {
        let inner_h = (height - 2.0 * PADDING).max(4.0);
        let button_w = inner_h * 1.6;
        let slider_w = ((width - 2.0 * button_w - 5.0 * PADDING) * 0.5).max(20.0);

        let mut x = PADDING;
        let y = top + PADDING;
        let play_pause = Button::new("Play", Icon::Play, Bounds::new(x, y, button_w, inner_h));
        x += button_w + PADDING;
        let clear = Button::new("Clear", Icon::Clear, Bounds::new(x, y, button_w, inner_h));
        x += button_w + PADDING;
        let speed = Slider::new(defaults.speed, Bounds::new(x, y, slider_w, inner_h));
        x += slider_w + PADDING;
        let strength = Slider::new(defaults.strength, Bounds::new(x, y, slider_w, inner_h));

        Self {
            bounds: Bounds::new(0.0, top, width, height),
            speed,
            strength,
            play_pause,
            clear,
            dragging: None,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds.contains(point)
    }

    pub fn hit(&self, point: Vec2) -> Option<ControlHit> {
        if self.play_pause.bounds().contains(point) {
            Some(ControlHit::PlayPause)
        } else if self.clear.bounds().contains(point) {
            Some(ControlHit::Clear)
        } else if self.speed.bounds().contains(point) {
            Some(ControlHit::Speed)
        } else if self.strength.bounds().contains(point) {
            Some(ControlHit::Strength)
        } else {
            None
        }
    }

    /// Pointer pressed at `point`
    pub fn press(&mut self, point: Vec2) -> Option<ControlEvent> {
        match self.hit(point)? {
            ControlHit::PlayPause => Some(ControlEvent::PlayPauseClicked),
            ControlHit::Clear => Some(ControlEvent::ClearClicked),
            slider @ (ControlHit::Speed | ControlHit::Strength) => {
                self.dragging = Some(slider);
                self.drag(point)
            }
        }
    }

    /// Pointer moved while held
    pub fn drag(&mut self, point: Vec2) -> Option<ControlEvent> {
        match self.dragging? {
            ControlHit::Speed => self.speed.set_from_pointer(point.x),
            ControlHit::Strength => self.strength.set_from_pointer(point.x),
            _ => return None,
        }
        Some(ControlEvent::SliderChanged)
    }

    pub fn release(&mut self) {
        self.dragging = None;
    }

    /// Reflect the play state on the Play/Pause button
    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.play_pause.set_label("Pause", Icon::Pause);
        } else {
            self.play_pause.set_label("Play", Icon::Play);
        }
    }

    /// Human-readable summary for the window title
    pub fn title(&self) -> String {
        format!(
            "glitchgrid  [{}]  speed {:.3}  strength {:.2}",
            self.play_pause.label(),
            self.speed.value(),
            self.strength.value()
        )
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(self.bounds.origin, self.bounds.size, STRIP_BG);
        self.play_pause.draw(surface);
        self.clear.draw(surface);
        self.speed.draw(surface);
        self.strength.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;

    fn panel() -> ControlPanel {
        ControlPanel::new(&ControlDefaults::default(), 400.0, 600.0, 48.0)
    }

    #[test]
    fn test_slider_defaults() {
        let panel = panel();
        assert!((panel.speed.value() - 0.01).abs() < 1e-12);
        assert!((panel.strength.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_slider_clamps_and_snaps() {
        let mut panel = panel();
        panel.speed.set_value(0.2);
        assert!((panel.speed.value() - 0.05).abs() < 1e-12);

        panel.strength.set_value(0.123);
        assert!((panel.strength.value() - 0.12).abs() < 1e-9);

        panel.strength.set_value(-3.0);
        assert_eq!(panel.strength.value(), 0.0);
    }

    #[test]
    fn test_nudge_moves_by_step() {
        let mut panel = panel();
        panel.speed.nudge(2);
        assert!((panel.speed.value() - 0.012).abs() < 1e-9);
        panel.speed.nudge(-100);
        assert_eq!(panel.speed.value(), 0.0);
    }

    #[test]
    fn test_press_hits_buttons() {
        let mut panel = panel();
        let play = panel.play_pause.bounds();
        let clear = panel.clear.bounds();

        assert_eq!(
            panel.press(play.origin + Vec2::splat(2.0)),
            Some(ControlEvent::PlayPauseClicked)
        );
        assert_eq!(
            panel.press(clear.origin + Vec2::splat(2.0)),
            Some(ControlEvent::ClearClicked)
        );
        assert_eq!(panel.press(Vec2::new(599.0, 401.0)), None);
    }

    #[test]
    fn test_drag_sets_slider_from_pointer() {
        let mut panel = panel();
        let track = panel.strength.bounds();

        let start = track.origin + Vec2::new(0.0, 5.0);
        assert_eq!(panel.press(start), Some(ControlEvent::SliderChanged));
        assert_eq!(panel.strength.value(), 0.0);

        panel.drag(track.origin + Vec2::new(track.size.x, 5.0));
        assert!((panel.strength.value() - 1.0).abs() < 1e-12);

        panel.release();
        assert_eq!(panel.drag(start), None);
        assert!((panel.strength.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_play_label_follows_state() {
        let mut panel = panel();
        assert_eq!(panel.play_pause.label(), "Play");
        panel.set_playing(true);
        assert_eq!(panel.play_pause.label(), "Pause");
        assert_eq!(panel.play_pause.icon(), Icon::Pause);
        assert!(panel.title().contains("[Pause]"));
    }

    #[test]
    fn test_draw_fills_strip() {
        let panel = panel();
        let mut canvas = Canvas::new(600, 448);
        panel.draw(&mut canvas);
        assert_eq!(canvas.pixel(599, 447), STRIP_BG);
    }
}
