use crate::{config::WheelConfig, reel::Reel, rng::RandomSource};

/// Logical state of the spin controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// How one reel moves during a spin.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelMotion {
    pub reel: usize,
    /// Instant jump before the transition starts.
    pub from_px: f64,
    pub to_px: f64,
    /// Normalized position applied once the transition ends.
    pub settle_px: f64,
    pub duration_secs: f64,
    pub transition: String,
}

/// Everything decided when a spin starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub spin_id: u64,
    pub target_index: usize,
    pub base_duration_secs: f64,
    pub longest_secs: f64,
    pub reveal_buffer_ms: u32,
    pub motions: Vec<ReelMotion>,
}

impl SpinPlan {
    /// Delay after which the result is revealed.
    pub fn reveal_delay_ms(&self) -> u32 {
        // float to int casts saturate
        let longest_ms = (self.longest_secs * 1000.0).round() as u32;
        longest_ms.saturating_add(self.reveal_buffer_ms)
    }
}

pub fn transition_css(duration_secs: f64, easing: &str) -> String {
    format!("transform {duration_secs}s {easing}")
}

/// Per-reel durations: `base + i * (stagger + jitter_i)`.
pub fn reel_durations<R: RandomSource + ?Sized>(
    base_secs: f64,
    count: usize,
    config: &WheelConfig,
    rng: &mut R,
) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let jitter = rng.next_jitter_secs(config.jitter_steps);
            base_secs + i as f64 * (config.column_stagger_secs + jitter)
        })
        .collect()
}

/// Draws the target and durations, and lays out every reel's motion.
pub fn plan_spin<R: RandomSource + ?Sized>(
    spin_id: u64,
    reels: &[Reel],
    item_count: usize,
    config: &WheelConfig,
    rng: &mut R,
) -> SpinPlan {
    let target_index = rng.next_index(item_count);
    let base_duration_secs =
        config.base_duration_secs + rng.next_jitter_secs(config.jitter_steps);
    let durations = reel_durations(base_duration_secs, reels.len(), config, rng);

    let motions: Vec<ReelMotion> = reels
        .iter()
        .zip(&durations)
        .enumerate()
        .map(|(i, (reel, &duration_secs))| ReelMotion {
            reel: i,
            from_px: reel.translate_px(reel.base_index, true),
            to_px: reel.translate_px(reel.end_index(config.cycles, target_index), true),
            settle_px: reel.translate_px(reel.normalized_index(target_index), true),
            duration_secs,
            transition: transition_css(duration_secs, &config.easing),
        })
        .collect();

    let longest_secs = durations
        .iter()
        .copied()
        .fold(base_duration_secs, f64::max);

    SpinPlan {
        spin_id,
        target_index,
        base_duration_secs,
        longest_secs,
        reveal_buffer_ms: config.reveal_buffer_ms,
        motions,
    }
}
