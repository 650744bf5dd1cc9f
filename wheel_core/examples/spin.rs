use wheel_core::{parse_items, SeededRng, Wheel, WheelConfig};

fn main() {
    // Headless end-to-end spin: every reel settles, then the result is revealed.
    let csv = "title,description,author\nLamp,A desk lamp,Ana\nMug,\"Big, blue mug\",Ben\nPen,Fountain pen,Cy";
    let mut wheel = match Wheel::new(WheelConfig::default(), parse_items(csv)) {
        Ok(wheel) => wheel,
        Err(err) => {
            eprintln!("cannot build wheel: {err}");
            return;
        }
    };
    let mut rng = SeededRng::new("example-seed", 1);

    let Some(plan) = wheel.begin_spin(&mut rng) else {
        return;
    };
    for motion in &plan.motions {
        wheel.settle_reel(motion.reel);
    }
    if let Some(outcome) = wheel.finish_spin() {
        println!(
            "seed_hash={} target={} title={:?} reveal_after={}ms",
            rng.seed_hash_hex(),
            outcome.target_index,
            outcome.item.title,
            plan.reveal_delay_ms()
        );
    }
}
