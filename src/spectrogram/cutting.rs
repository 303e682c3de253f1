use crate::concurrency::Coordinator;
use crate::spectrogram::bank::SpectrogramBank;
use crate::spectrogram::cost::{cell_cost, cell_value, normalized_cost};
use crate::spectrogram::partition::{CutKind, Cutting};

/// Recursive partitioner over a filled [`SpectrogramBank`].
///
/// A region is addressed by `(resolution, x, y, height)`: frame `x` of the grid
/// at `resolution`, bins `y..y + height` of that grid. Each step evaluates two
/// candidate halvings of the region and keeps the one with the lower
/// normalised cost:
///
/// - vertical: top `(res, x, y + h/2, h/2)` and bottom `(res, x, y, h/2)`;
/// - horizontal: left `(res/2, 2x, y/2, h/2)` and right `(res/2, 2x + 1, y/2, h/2)`.
///
/// Recursion stops at `height <= 1` or at the minimum resolution, where the
/// region becomes a leaf backed by grid cell `(x, y)`. With
/// [`with_finest_refinement`](Self::with_finest_refinement) a region at the
/// minimum resolution is instead halved vertically down to single cells.
///
/// The result depends only on the bank; the coordinator decides where the four
/// sub-cuts of a step run.
#[derive(Debug, Clone, Copy)]
pub struct CuttingEngine<'a> {
    bank: &'a SpectrogramBank,
    coordinator: &'a Coordinator,
    refine_finest: bool,
}

impl<'a> CuttingEngine<'a> {
    pub fn new(bank: &'a SpectrogramBank, coordinator: &'a Coordinator) -> Self {
        Self {
            bank,
            coordinator,
            refine_finest: false,
        }
    }

    /// Keeps halving minimum-resolution regions vertically until every leaf is one cell.
    pub fn with_finest_refinement(mut self, refine_finest: bool) -> Self {
        self.refine_finest = refine_finest;
        self
    }

    /// Partitions the whole bank, starting from the single frame of the coarsest grid.
    pub fn cut_all(&self) -> Cutting {
        let max_resolution = self.bank.max_resolution();
        log::debug!(
            "Cutting {} resolutions from {} to {} bins",
            self.bank.len(),
            self.bank.min_resolution(),
            max_resolution
        );
        let cutting = self.cut(max_resolution, 0, 0, max_resolution);
        log::debug!(
            "Partition: top split {:?}, {} leaves, depth {}",
            cutting.kind(),
            cutting.leaf_count(),
            cutting.depth()
        );
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Partition tree:\n{}", cutting);
        }
        cutting
    }

    /// Partitions the region `(resolution, x, y, height)`.
    pub fn cut(&self, resolution: usize, x: usize, y: usize, height: usize) -> Cutting {
        self.cut_at(resolution, x, y, height, 0)
    }

    fn cut_at(&self, resolution: usize, x: usize, y: usize, height: usize, depth: usize) -> Cutting {
        let half = height / 2;

        if height > 1 && resolution > self.bank.min_resolution() {
            let (top, bottom, left, right) = self.coordinator.join4(
                depth,
                || self.cut_at(resolution, x, y + half, half, depth + 1),
                || self.cut_at(resolution, x, y, half, depth + 1),
                || self.cut_at(resolution / 2, 2 * x, y / 2, half, depth + 1),
                || self.cut_at(resolution / 2, 2 * x + 1, y / 2, half, depth + 1),
            );
            return select_split(top, bottom, left, right);
        }

        if height > 1 && self.refine_finest {
            let (top, bottom) = self.coordinator.join(
                depth,
                || self.cut_at(resolution, x, y + half, half, depth + 1),
                || self.cut_at(resolution, x, y, half, depth + 1),
            );
            return vertical_only(top, bottom);
        }

        let grid = self.bank.grid_for(resolution);
        Cutting::Leaf {
            cost: cell_cost(grid, x, y),
            value: cell_value(grid, x, y),
        }
    }
}

/// Keeps the cheaper of the vertical (`top`, `bottom`) and horizontal
/// (`left`, `right`) candidates.
///
/// Costs are normalised by each candidate's energy. The horizontal candidate
/// wins only when it is strictly cheaper, so ties go to the vertical split.
pub fn select_split(top: Cutting, bottom: Cutting, left: Cutting, right: Cutting) -> Cutting {
    let vertical_energy = top.value() + bottom.value();
    let vertical_cost = normalized_cost(top.cost() + bottom.cost(), vertical_energy);

    let horizontal_energy = left.value() + right.value();
    let horizontal_cost = normalized_cost(left.cost() + right.cost(), horizontal_energy);

    if vertical_cost > horizontal_cost {
        Cutting::Split {
            kind: CutKind::Horizontal,
            cost: horizontal_cost,
            value: horizontal_energy,
            rejected_cost: Some(vertical_cost),
            first: Box::new(left),
            second: Box::new(right),
        }
    } else {
        Cutting::Split {
            kind: CutKind::Vertical,
            cost: vertical_cost,
            value: vertical_energy,
            rejected_cost: Some(horizontal_cost),
            first: Box::new(top),
            second: Box::new(bottom),
        }
    }
}

fn vertical_only(top: Cutting, bottom: Cutting) -> Cutting {
    let energy = top.value() + bottom.value();
    Cutting::Split {
        kind: CutKind::Vertical,
        cost: normalized_cost(top.cost() + bottom.cost(), energy),
        value: energy,
        rejected_cost: None,
        first: Box::new(top),
        second: Box::new(bottom),
    }
}
