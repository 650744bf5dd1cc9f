use crate::config::WheelConfig;

/// One animated column. Positions are indices into the repeated item
/// sequence of the track; `translate_px` turns them into CSS offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Reel {
    pub cell_height: f64,
    pub item_count: usize,
    pub base_index: usize,
    /// Index shown while the reel is at rest.
    pub resting_index: usize,
    /// Half-cell centering offset once the reel has spun at least once.
    pub centered: bool,
}

impl Reel {
    pub fn new(item_count: usize, config: &WheelConfig) -> Self {
        let base_index = item_count.saturating_mul(config.base_block);
        Self {
            cell_height: config.fallback_cell_height,
            item_count,
            base_index,
            resting_index: base_index,
            centered: false,
        }
    }

    /// Sets the measured cell height, falling back to `fallback` when the
    /// measurement is missing or not a positive finite number.
    pub fn measure(&mut self, measured: Option<f64>, fallback: f64) {
        self.cell_height = match measured {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => fallback,
        };
    }

    pub fn center_offset(&self) -> f64 {
        self.cell_height / 2.0
    }

    /// translateY for `index`, with the half-cell offset when `centered`.
    pub fn translate_px(&self, index: usize, centered: bool) -> f64 {
        let offset = if centered { self.center_offset() } else { 0.0 };
        -(index as f64 * self.cell_height) + offset
    }

    pub fn resting_px(&self) -> f64 {
        self.translate_px(self.resting_index, self.centered)
    }

    /// Far index a spin animates to: several full cycles past the base.
    pub fn end_index(&self, cycles: usize, target_index: usize) -> usize {
        self.base_index
            .saturating_add(cycles.saturating_mul(self.item_count))
            .saturating_add(target_index)
    }

    /// Equivalent index inside the base block.
    pub fn normalized_index(&self, target_index: usize) -> usize {
        self.base_index
            .saturating_add(target_index % self.item_count.max(1))
    }

    /// Moves the reel to its normalized rest position after a spin.
    pub fn settle(&mut self, target_index: usize) {
        self.resting_index = self.normalized_index(target_index);
        self.centered = true;
    }

    /// Item shown at the reel's rest position.
    pub fn displayed_item(&self) -> usize {
        self.resting_index % self.item_count.max(1)
    }
}

/// Builds `config.reels` reels over `item_count` items.
pub fn build_reels(item_count: usize, config: &WheelConfig) -> Vec<Reel> {
    if item_count == 0 {
        return Vec::new();
    }
    (0..config.reels.max(1))
        .map(|_| Reel::new(item_count, config))
        .collect()
}

/// Item index of every cell in a track, across all repetitions.
pub fn track_cells(item_count: usize, config: &WheelConfig) -> impl Iterator<Item = usize> {
    let total = item_count.saturating_mul(config.repeat_factor());
    (0..total).map(move |pos| pos % item_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_index_sits_in_third_block() {
        let reel = Reel::new(5, &WheelConfig::default());
        assert_eq!(reel.base_index, 15);
        assert_eq!(reel.resting_index, 15);
        assert_eq!(reel.resting_px(), -(15.0 * 28.0));
    }

    #[test]
    fn measure_falls_back_on_hidden_container() {
        let mut reel = Reel::new(3, &WheelConfig::default());
        reel.measure(Some(0.0), 28.0);
        assert_eq!(reel.cell_height, 28.0);
        reel.measure(Some(f64::NAN), 28.0);
        assert_eq!(reel.cell_height, 28.0);
        reel.measure(None, 28.0);
        assert_eq!(reel.cell_height, 28.0);
        reel.measure(Some(40.0), 28.0);
        assert_eq!(reel.cell_height, 40.0);
    }

    #[test]
    fn end_index_travels_full_cycles() {
        let reel = Reel::new(5, &WheelConfig::default());
        assert_eq!(reel.end_index(8, 2), 15 + 40 + 2);
        assert_eq!(reel.end_index(8, 2) % 5, 2);
    }

    #[test]
    fn settle_normalizes_into_base_block() {
        let mut reel = Reel::new(5, &WheelConfig::default());
        reel.settle(4);
        assert_eq!(reel.resting_index, 19);
        assert_eq!(reel.displayed_item(), 4);
        assert!(reel.centered);
        assert_eq!(reel.resting_px(), -(19.0 * 28.0) + 14.0);
    }

    #[test]
    fn track_fits_the_furthest_spin() {
        let config = WheelConfig::default();
        let cells: Vec<usize> = track_cells(5, &config).collect();
        assert_eq!(cells.len(), 5 * 16);
        let reel = Reel::new(5, &config);
        assert!(reel.end_index(config.cycles, 4) < cells.len());
        assert_eq!(cells[reel.end_index(config.cycles, 3)], 3);
    }

    #[test]
    fn end_index_saturates_for_huge_cycles() {
        let reel = Reel::new(5, &WheelConfig::default());
        assert_eq!(reel.end_index(usize::MAX, 4), usize::MAX);
    }

    #[test]
    fn no_reels_without_items() {
        assert!(build_reels(0, &WheelConfig::default()).is_empty());
        assert_eq!(build_reels(2, &WheelConfig::default()).len(), 3);
    }
}
