//! Layered "quantum glitch" text: three jittered copies while hovered or
//! dragged, and a burst of drifting particles when a drag is released.

use rand::prelude::*;

pub const GRAYS: [&str; 10] = [
    "#232323", "#181818", "#444", "#888", "#BDBDBD", "#E0E0E0", "#757575", "#212121", "#616161",
    "#F5F5F5",
];
pub const WHITES: [&str; 4] = ["#fff", "#F5F5F5", "#FAFAFA", "#ECECEC"];
pub const BLACKS: [&str; 3] = ["#000", "#181818", "#232323"];

const PARTICLE_COUNT: usize = 18;
const PARTICLE_STEP: f32 = 0.18;
const PARTICLE_LIFE_DECAY: f32 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchLayer {
    pub dx: f32,
    pub dy: f32,
    pub opacity: f32,
    pub color: &'static str,
}

pub const RESTING_LAYERS: [GlitchLayer; 3] = [
    GlitchLayer { dx: 0.0, dy: 0.0, opacity: 1.0, color: WHITES[0] },
    GlitchLayer { dx: 0.0, dy: 0.0, opacity: 1.0, color: GRAYS[0] },
    GlitchLayer { dx: 0.0, dy: 0.0, opacity: 1.0, color: BLACKS[0] },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub life: f32,
    pub blur: f32,
    pub opacity: f32,
    pub color: &'static str,
}

pub struct GlitchText {
    rng: StdRng,
    pub hovered: bool,
    pub dragging: bool,
    pub inactive: bool,
    pub offset: [f32; 2],
    particles: Vec<Particle>,
}

impl GlitchText {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            hovered: false,
            dragging: false,
            inactive: false,
            offset: [0.0, 0.0],
            particles: Vec::new(),
        }
    }

    #[inline]
    pub fn is_glitching(&self) -> bool {
        !self.inactive && (self.hovered || self.dragging)
    }

    fn jitter(&mut self, span_x: f32, span_y: f32) -> (f32, f32) {
        let dx = self.rng.gen::<f32>() * span_x - span_x / 2.0 + self.offset[0];
        let dy = self.rng.gen::<f32>() * span_y - span_y / 2.0 + self.offset[1];
        (dx, dy)
    }

    /// Layers for the current frame.
    pub fn layers(&mut self) -> [GlitchLayer; 3] {
        if !self.is_glitching() {
            return RESTING_LAYERS;
        }
        let (dx0, dy0) = self.jitter(12.0, 8.0);
        let (dx1, dy1) = self.jitter(18.0, 12.0);
        let (dx2, dy2) = self.jitter(24.0, 16.0);
        let o0 = 0.7 + self.rng.gen::<f32>() * 0.3;
        let o1 = 0.5 + self.rng.gen::<f32>() * 0.5;
        let o2 = 0.4 + self.rng.gen::<f32>() * 0.6;
        let gray = *GRAYS.choose(&mut self.rng).unwrap_or(&GRAYS[0]);
        let white = *WHITES.choose(&mut self.rng).unwrap_or(&WHITES[0]);
        [
            GlitchLayer { dx: dx0, dy: dy0, opacity: o0, color: WHITES[0] },
            GlitchLayer { dx: dx1, dy: dy1, opacity: o1, color: gray },
            GlitchLayer { dx: dx2, dy: dy2, opacity: o2, color: white },
        ]
    }

    pub fn begin_drag(&mut self) {
        if !self.inactive {
            self.dragging = true;
        }
    }

    pub fn drag_to(&mut self, offset: [f32; 2]) {
        if self.dragging {
            self.offset = offset;
        }
    }

    /// Ends a drag; a displaced release throws a particle burst.
    pub fn release(&mut self) {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        let offset = std::mem::replace(&mut self.offset, [0.0, 0.0]);
        if self.inactive || !was_dragging || offset[0] == 0.0 || offset[1] == 0.0 {
            return;
        }
        let palette: Vec<&'static str> = GRAYS
            .iter()
            .chain(WHITES.iter())
            .chain(BLACKS.iter())
            .copied()
            .collect();
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: 0.0,
                y: 0.0,
                dx: self.rng.gen::<f32>() * 18.0 - 9.0,
                dy: self.rng.gen::<f32>() * 18.0 - 9.0,
                life: 1.6 + self.rng.gen::<f32>() * 0.8,
                blur: 2.0 + self.rng.gen::<f32>() * 6.0,
                opacity: 0.18 + self.rng.gen::<f32>() * 0.22,
                color: *palette.choose(&mut self.rng).unwrap_or(&WHITES[0]),
            })
            .collect();
    }

    /// Mouse left the text: everything snaps back.
    pub fn leave(&mut self) {
        self.hovered = false;
        self.dragging = false;
        self.offset = [0.0, 0.0];
    }

    /// Advances particles one frame; returns those still alive.
    pub fn step_particles(&mut self) -> &[Particle] {
        for p in self.particles.iter_mut() {
            p.x += p.dx * PARTICLE_STEP;
            p.y += p.dy * PARTICLE_STEP;
            p.life -= PARTICLE_LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
        &self.particles
    }
}
