//! Decorative layers: floating particles, twinkling stars, pointer-following
//! blobs and the spotlight.

use fastrand::Rng;
use folio_protocol::{DomCommand, ElementRef, Point, Size};

use crate::config::BackgroundConfig;

pub const PARTICLE_COLORS: [&str; 3] = [
    "rgba(99,102,241,0.4)",
    "rgba(139,92,246,0.4)",
    "rgba(236,72,153,0.4)",
];

/// Layers hidden on devices too weak to animate them.
pub const HEAVY_SELECTOR: &str = ".blob, .aurora, .particles, .stars";
/// Elements whose CSS animations pause while the page is hidden.
pub const ANIMATED_SELECTOR: &str = ".blob, .particle, .star";

pub fn is_mobile(viewport_width: f64, config: &BackgroundConfig) -> bool {
    viewport_width < config.mobile_breakpoint_px
}

/// `hardwareConcurrency` is optional in browsers; an unreported value keeps
/// the effects on.
pub fn heavy_effects_allowed(cores: Option<u32>, config: &BackgroundConfig) -> bool {
    cores.is_none_or(|n| n == 0 || n >= config.min_cores)
}

pub fn animation_play_state(hidden: bool) -> &'static str {
    if hidden { "paused" } else { "running" }
}

fn between(rng: &mut Rng, lo: f64, span: f64) -> f64 {
    rng.f64() * span + lo
}

/// Inline `cssText` for `count` particles.
pub fn particle_styles(rng: &mut Rng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let width = between(rng, 4.0, 8.0);
            let height = between(rng, 4.0, 8.0);
            let left = between(rng, 0.0, 100.0);
            let color = PARTICLE_COLORS[rng.usize(..PARTICLE_COLORS.len())];
            let duration = between(rng, 20.0, 15.0);
            let delay = between(rng, 0.0, 10.0);
            format!(
                "width: {width}px; height: {height}px; left: {left}%; background: {color}; \
                 animation: floatParticle {duration}s linear infinite; animation-delay: {delay}s;"
            )
        })
        .collect()
}

/// Inline `cssText` for `count` stars.
pub fn star_styles(rng: &mut Rng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let width = between(rng, 1.0, 2.0);
            let height = between(rng, 1.0, 2.0);
            let left = between(rng, 0.0, 100.0);
            let top = between(rng, 0.0, 100.0);
            let duration = between(rng, 2.0, 3.0);
            let delay = between(rng, 0.0, 3.0);
            format!(
                "width: {width}px; height: {height}px; left: {left}%; top: {top}%; \
                 animation: twinkleStar {duration}s ease-in-out infinite; animation-delay: {delay}s;"
            )
        })
        .collect()
}

/// Low-pass filtered pointer offset driving the blob parallax.
///
/// Both points are normalized offsets from the viewport center, each axis in
/// `[-0.5, 0.5]`.
#[derive(Debug, Clone)]
pub struct PointerFollow {
    target: Point,
    current: Point,
    smoothing: f64,
}

impl PointerFollow {
    pub fn new(smoothing: f64) -> Self {
        Self {
            target: Point::default(),
            current: Point::default(),
            smoothing,
        }
    }

    pub fn set_pointer(&mut self, client: Point, viewport: Size) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        self.target = Point::new(
            client.x / viewport.width - 0.5,
            client.y / viewport.height - 0.5,
        );
    }

    /// One frame of smoothing toward the latest pointer position.
    pub fn step(&mut self) -> Point {
        self.current.x += (self.target.x - self.current.x) * self.smoothing;
        self.current.y += (self.target.y - self.current.y) * self.smoothing;
        self.current
    }

    /// Transform for the blob at `index`; later blobs move further.
    pub fn blob_transform(&self, index: usize) -> String {
        let speed = (index as f64 + 1.0) * 10.0;
        format!(
            "translate({}px, {}px)",
            self.current.x * speed,
            self.current.y * speed
        )
    }
}

/// What the host must do with its animation-frame handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Start,
    Cancel,
    Nothing,
}

/// Run/suspend bookkeeping for the blob frame loop.
#[derive(Debug, Clone, Default)]
pub struct FollowLoop {
    running: bool,
}

impl FollowLoop {
    pub fn start(&mut self) -> LoopAction {
        if self.running {
            LoopAction::Nothing
        } else {
            self.running = true;
            LoopAction::Start
        }
    }

    pub fn visibility_changed(&mut self, hidden: bool) -> LoopAction {
        if hidden {
            if self.running {
                self.running = false;
                LoopAction::Cancel
            } else {
                LoopAction::Nothing
            }
        } else {
            self.start()
        }
    }
}

/// Spotlight gradient center, as percentages of the viewport.
pub fn spotlight_commands(client: Point, viewport: Size) -> Vec<DomCommand> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }
    vec![
        DomCommand::set_style(
            ElementRef::Spotlight,
            "--mouse-x",
            format!("{}%", client.x / viewport.width * 100.0),
        ),
        DomCommand::set_style(
            ElementRef::Spotlight,
            "--mouse-y",
            format!("{}%", client.y / viewport.height * 100.0),
        ),
    ]
}
