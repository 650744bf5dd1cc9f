use tracing::{debug, info};

use crate::{
    config::WheelConfig,
    dialog::{CloseReason, DialogState, FocusTarget},
    error::{WheelError, WheelResult},
    item::Item,
    reel::{build_reels, Reel},
    rng::RandomSource,
    spin::{plan_spin, SpinPhase, SpinPlan},
};

#[derive(Debug, Clone, PartialEq)]
struct ActiveSpin {
    target_index: usize,
    settled: Vec<bool>,
}

/// Result of a completed spin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub target_index: usize,
    pub item: Item,
    /// Reels whose transition end never arrived and were snapped on reveal,
    /// with the translateY they were snapped to.
    pub forced: Vec<(usize, f64)>,
}

/// State of one wheel widget: its items, reels, spin phase and dialog.
#[derive(Debug, Clone)]
pub struct Wheel {
    config: WheelConfig,
    items: Vec<Item>,
    reels: Vec<Reel>,
    phase: SpinPhase,
    active: Option<ActiveSpin>,
    dialog: DialogState,
    spins: u64,
}

impl Wheel {
    pub fn new(config: WheelConfig, items: Vec<Item>) -> WheelResult<Self> {
        if items.is_empty() {
            return Err(WheelError::EmptyDataset);
        }
        let reels = build_reels(items.len(), &config);
        debug!(
            reels = reels.len(),
            items = items.len(),
            repeat = config.repeat_factor(),
            "built reels"
        );
        Ok(Self {
            config,
            items,
            reels,
            phase: SpinPhase::Idle,
            active: None,
            dialog: DialogState::default(),
            spins: 0,
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// Number of spins started so far.
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Records the rendered cell height of a reel and returns its rest offset.
    pub fn measure_reel(&mut self, index: usize, measured: Option<f64>) -> WheelResult<f64> {
        let count = self.reels.len();
        let fallback = self.config.fallback_cell_height;
        let reel = self
            .reels
            .get_mut(index)
            .ok_or(WheelError::ReelOutOfRange { index, count })?;
        reel.measure(measured, fallback);
        Ok(reel.resting_px())
    }

    /// Starts a spin. Returns `None` while already spinning or without reels.
    pub fn begin_spin<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<SpinPlan> {
        if self.is_spinning() || self.reels.is_empty() {
            return None;
        }
        self.spins += 1;
        let plan = plan_spin(self.spins, &self.reels, self.items.len(), &self.config, rng);
        self.phase = SpinPhase::Spinning;
        self.active = Some(ActiveSpin {
            target_index: plan.target_index,
            settled: vec![false; self.reels.len()],
        });
        info!(
            spin = plan.spin_id,
            target = plan.target_index,
            longest_secs = plan.longest_secs,
            "spin started"
        );
        Some(plan)
    }

    /// Normalizes a reel once its transition has ended. Returns the offset to
    /// snap to, or `None` if there is no spin or the reel already settled.
    pub fn settle_reel(&mut self, index: usize) -> Option<f64> {
        let active = self.active.as_mut()?;
        let flag = active.settled.get_mut(index)?;
        if *flag {
            return None;
        }
        *flag = true;
        let reel = self.reels.get_mut(index)?;
        reel.settle(active.target_index);
        Some(reel.resting_px())
    }

    /// Ends the spin: snaps any reel that has not settled, opens the dialog
    /// with the target item and returns to idle.
    pub fn finish_spin(&mut self) -> Option<SpinOutcome> {
        let active = self.active.take()?;
        let mut forced = Vec::new();
        for (index, settled) in active.settled.iter().enumerate() {
            if !settled {
                if let Some(reel) = self.reels.get_mut(index) {
                    reel.settle(active.target_index);
                    forced.push((index, reel.resting_px()));
                }
            }
        }
        if !forced.is_empty() {
            debug!(reels = forced.len(), "snapped reels without transition end");
        }

        self.phase = SpinPhase::Idle;
        let item = self.items.get(active.target_index)?.clone();
        self.dialog.open(item.clone());
        info!(target = active.target_index, title = %item.title, "spin result");
        Some(SpinOutcome {
            target_index: active.target_index,
            item,
            forced,
        })
    }

    pub fn close_dialog(&mut self, reason: CloseReason) -> bool {
        let closed = self.dialog.close();
        if closed {
            debug!(?reason, "result dialog closed");
        }
        closed
    }

    pub fn take_focus(&mut self) -> Option<FocusTarget> {
        self.dialog.take_focus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn wheel(items: usize, reels: usize) -> Wheel {
        let config = WheelConfig {
            reels,
            ..WheelConfig::default()
        };
        let items = (0..items)
            .map(|i| Item::new(format!("item {i}"), format!("desc {i}")))
            .collect();
        Wheel::new(config, items).unwrap()
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = Wheel::new(WheelConfig::default(), Vec::new()).unwrap_err();
        assert!(matches!(err, WheelError::EmptyDataset));
    }

    #[test]
    fn spin_while_spinning_is_ignored() {
        let mut wheel = wheel(5, 3);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert!(wheel.begin_spin(&mut rng).is_some());
        let reels_before = wheel.reels().to_vec();
        assert!(wheel.begin_spin(&mut rng).is_none());
        assert_eq!(wheel.spins(), 1);
        assert_eq!(wheel.reels(), reels_before.as_slice());
        assert!(wheel.is_spinning());
    }

    #[test]
    fn settle_is_idempotent_per_reel() {
        let mut wheel = wheel(5, 3);
        let mut rng = ScriptedRng::new(vec![0.5]);
        wheel.begin_spin(&mut rng).unwrap();
        assert!(wheel.settle_reel(1).is_some());
        assert!(wheel.settle_reel(1).is_none());
        assert!(wheel.settle_reel(9).is_none());
    }

    #[test]
    fn finish_snaps_unsettled_reels() {
        let mut wheel = wheel(5, 3);
        let mut rng = ScriptedRng::new(vec![0.5]);
        wheel.begin_spin(&mut rng).unwrap();
        wheel.settle_reel(0);
        let outcome = wheel.finish_spin().unwrap();
        assert_eq!(outcome.target_index, 2);
        assert_eq!(
            outcome.forced.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(!wheel.is_spinning());
        assert!(wheel.dialog().is_open());
        assert!(wheel.finish_spin().is_none());
    }

    #[test]
    fn measure_out_of_range() {
        let mut wheel = wheel(2, 1);
        assert!(matches!(
            wheel.measure_reel(3, Some(10.0)),
            Err(WheelError::ReelOutOfRange { index: 3, count: 1 })
        ));
        assert_eq!(wheel.measure_reel(0, Some(10.0)).unwrap(), -60.0);
    }
}
