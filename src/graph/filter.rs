//! Biquad shelf/peak filters (RBJ cookbook coefficients).
//!
//! Three fixed bands: a low shelf at 80 Hz, a peaking filter at 1100 Hz
//! with Q = 1, and a high shelf at 7200 Hz. The band layout is a design
//! constant; only the gains move.

/// Equalizer band identifiers, in chain order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Band {
    Bass,
    Mid,
    Treble,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Bass, Band::Mid, Band::Treble];

    fn index(self) -> usize {
        match self {
            Band::Bass => 0,
            Band::Mid => 1,
            Band::Treble => 2,
        }
    }
}

pub const MIN_GAIN_DB: f32 = -12.0;
pub const MAX_GAIN_DB: f32 = 12.0;

const BASS_SHELF_HZ: f32 = 80.0;
const MID_PEAK_HZ: f32 = 1100.0;
const MID_Q: f32 = 1.0;
const TREBLE_SHELF_HZ: f32 = 7200.0;
// Butterworth Q for the shelves.
const SHELF_Q: f32 = 0.707;

const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Clamp a requested gain into the legal range.
pub fn clamp_gain(db: f32) -> f32 {
    db.clamp(MIN_GAIN_DB, MAX_GAIN_DB)
}

/// One second-order section with per-channel state for up to two channels.
#[derive(Debug, Clone)]
struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    // [x1, x2, y1, y2] per channel.
    state: [[f32; 4]; 2],
}

impl Biquad {
    fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            state: [[0.0; 4]; 2],
        }
    }

    fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;
    }

    fn set_peaking(&mut self, sample_rate: f32, frequency: f32, q: f32, gain_db: f32) {
        if sample_rate < 1.0 {
            return;
        }
        let a = 10.0_f32.powf(gain_db / 40.0);
        // Clamp toward Nyquist to keep the section stable.
        let clamped = frequency.min(sample_rate * 0.45);
        let omega = 2.0 * std::f32::consts::PI * clamped / sample_rate;
        let (sin_omega, cos_omega) = (omega.sin(), omega.cos());
        let alpha = sin_omega / (2.0 * q);

        self.set_coefficients(
            1.0 + alpha * a,
            -2.0 * cos_omega,
            1.0 - alpha * a,
            1.0 + alpha / a,
            -2.0 * cos_omega,
            1.0 - alpha / a,
        );
    }

    fn set_low_shelf(&mut self, sample_rate: f32, frequency: f32, q: f32, gain_db: f32) {
        if sample_rate < 1.0 {
            return;
        }
        let a = 10.0_f32.powf(gain_db / 40.0);
        let clamped = frequency.min(sample_rate * 0.45);
        let omega = 2.0 * std::f32::consts::PI * clamped / sample_rate;
        let (sin_omega, cos_omega) = (omega.sin(), omega.cos());
        let alpha = sin_omega / 2.0 * ((a + 1.0 / a) * (1.0 / q - 1.0) + 2.0).sqrt();
        let beta = 2.0 * a.sqrt() * alpha;

        self.set_coefficients(
            a * ((a + 1.0) - (a - 1.0) * cos_omega + beta),
            2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega),
            a * ((a + 1.0) - (a - 1.0) * cos_omega - beta),
            (a + 1.0) + (a - 1.0) * cos_omega + beta,
            -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega),
            (a + 1.0) + (a - 1.0) * cos_omega - beta,
        );
    }

    fn set_high_shelf(&mut self, sample_rate: f32, frequency: f32, q: f32, gain_db: f32) {
        if sample_rate < 1.0 {
            return;
        }
        let a = 10.0_f32.powf(gain_db / 40.0);
        let clamped = frequency.min(sample_rate * 0.45);
        let omega = 2.0 * std::f32::consts::PI * clamped / sample_rate;
        let (sin_omega, cos_omega) = (omega.sin(), omega.cos());
        let alpha = sin_omega / 2.0 * ((a + 1.0 / a) * (1.0 / q - 1.0) + 2.0).sqrt();
        let beta = 2.0 * a.sqrt() * alpha;

        self.set_coefficients(
            a * ((a + 1.0) + (a - 1.0) * cos_omega + beta),
            -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega),
            a * ((a + 1.0) + (a - 1.0) * cos_omega - beta),
            (a + 1.0) - (a - 1.0) * cos_omega + beta,
            2.0 * ((a - 1.0) - (a + 1.0) * cos_omega),
            (a + 1.0) - (a - 1.0) * cos_omega - beta,
        );
    }

    fn reset(&mut self) {
        self.state = [[0.0; 4]; 2];
    }

    #[inline]
    fn process(&mut self, sample: f32, channel: usize) -> f32 {
        let [x1, x2, y1, y2] = self.state[channel];
        let y = self.b0 * sample + self.b1 * x1 + self.b2 * x2 - self.a1 * y1 - self.a2 * y2;
        self.state[channel] = [sample, x1, y, y1];
        y
    }
}

/// The ordered three-node chain: source -> bass -> mid -> treble -> output.
#[derive(Debug, Clone)]
pub struct FilterChain {
    sample_rate: f32,
    gains: [f32; 3],
    bands: [Biquad; 3],
}

impl FilterChain {
    pub fn new(gains: [f32; 3]) -> Self {
        let mut chain = Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            gains: gains.map(clamp_gain),
            bands: [Biquad::identity(), Biquad::identity(), Biquad::identity()],
        };
        chain.recompute_all();
        chain
    }

    /// Retune the chain for a new stream sample rate and clear history.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate >= 1.0 && sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.recompute_all();
        }
        self.reset_state();
    }

    /// Apply a gain change live. Returns the clamped value in effect.
    pub fn set_gain(&mut self, band: Band, db: f32) -> f32 {
        let db = clamp_gain(db);
        self.gains[band.index()] = db;
        self.recompute(band);
        db
    }

    pub fn gain(&self, band: Band) -> f32 {
        self.gains[band.index()]
    }

    /// Drop filter history, e.g. when a new source is connected.
    pub fn reset_state(&mut self) {
        for band in &mut self.bands {
            band.reset();
        }
    }

    /// Run one sample through the chain. Channels beyond the first two
    /// pass through unfiltered.
    #[inline]
    pub fn process(&mut self, sample: f32, channel: usize) -> f32 {
        if channel >= 2 {
            return sample;
        }
        let mut s = sample;
        for band in &mut self.bands {
            s = band.process(s, channel);
        }
        s
    }

    fn recompute_all(&mut self) {
        for band in Band::ALL {
            self.recompute(band);
        }
    }

    fn recompute(&mut self, band: Band) {
        let gain = self.gains[band.index()];
        let sr = self.sample_rate;
        let node = &mut self.bands[band.index()];
        match band {
            Band::Bass => node.set_low_shelf(sr, BASS_SHELF_HZ, SHELF_Q, gain),
            Band::Mid => node.set_peaking(sr, MID_PEAK_HZ, MID_Q, gain),
            Band::Treble => node.set_high_shelf(sr, TREBLE_SHELF_HZ, SHELF_Q, gain),
        }
    }
}
