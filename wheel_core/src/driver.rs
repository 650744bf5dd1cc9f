//! Drives a planned spin to completion against a rendering host.
//!
//! Each reel's animation is a future that resolves when the host observes
//! the end of its transition. All reels are joined and raced against the
//! reveal deadline; the deadline alone decides when the result is shown.

use std::cell::RefCell;
use std::future::Future;

use futures::future::{self, Either};
use tracing::debug;

use crate::{
    rng::RandomSource,
    spin::{ReelMotion, SpinPlan},
    wheel::{SpinOutcome, Wheel},
};

/// Rendering side of a spin.
pub trait SpinHost {
    type Settled: Future<Output = ()>;
    type Delay: Future<Output = ()>;

    /// Jumps to `motion.from_px` without animation, then starts the
    /// transition to `motion.to_px`. Resolves when the transition ends.
    fn animate(&self, motion: &ReelMotion) -> Self::Settled;

    /// Places a reel at `translate_px` without animation.
    fn snap(&self, reel: usize, translate_px: f64);

    fn delay(&self, ms: u32) -> Self::Delay;

    /// Called whenever the wheel's presentation may have changed.
    fn refresh(&self) {}
}

/// Begins a spin and drives it. `None` if the wheel refused to spin.
pub async fn run_spin<H, R>(wheel: &RefCell<Wheel>, rng: &mut R, host: &H) -> Option<SpinOutcome>
where
    H: SpinHost,
    R: RandomSource + ?Sized,
{
    let plan = wheel.borrow_mut().begin_spin(rng)?;
    drive_spin(wheel, plan, host).await
}

/// Animates every reel of `plan` and reveals the result after the longest
/// reel's duration plus the reveal buffer.
pub async fn drive_spin<H: SpinHost>(
    wheel: &RefCell<Wheel>,
    plan: SpinPlan,
    host: &H,
) -> Option<SpinOutcome> {
    host.refresh();

    let reels = plan.motions.iter().map(|motion| {
        let settled = host.animate(motion);
        async move {
            settled.await;
            let snapped = wheel.borrow_mut().settle_reel(motion.reel);
            if let Some(px) = snapped {
                host.snap(motion.reel, px);
            }
        }
    });
    let all_settled = future::join_all(reels);
    let deadline = host.delay(plan.reveal_delay_ms());

    futures::pin_mut!(all_settled);
    futures::pin_mut!(deadline);
    match future::select(all_settled, deadline).await {
        Either::Left((_, deadline)) => deadline.await,
        Either::Right(_) => {
            debug!(spin = plan.spin_id, "reveal deadline before all reels settled")
        }
    }

    let outcome = wheel.borrow_mut().finish_spin();
    if let Some(outcome) = &outcome {
        for &(reel, px) in &outcome.forced {
            host.snap(reel, px);
        }
    }
    host.refresh();
    outcome
}
