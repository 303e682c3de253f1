use ndarray::{Array2, s};

use crate::spectrogram::partition::{CutKind, Cutting};

/// Rectangle of output cells: rows `x..x + width` (time), columns `y..y + height` (bins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Calls `f` with every leaf of `cutting` and the output tile it covers.
///
/// A vertical split sends its first child (top) to the upper half of the bin
/// range and its second (bottom) to the lower half. A horizontal split sends
/// its first child (left) to the earlier half of the time range.
pub fn visit_tiles<F>(cutting: &Cutting, tile: Tile, f: &mut F)
where
    F: FnMut(Tile, &Cutting),
{
    match cutting {
        Cutting::Leaf { .. } => f(tile, cutting),
        Cutting::Split { kind, first, second, .. } => {
            let Tile { x, y, width, height } = tile;
            match kind {
                CutKind::Vertical => {
                    let half = height / 2;
                    visit_tiles(first, Tile { x, y: y + half, width, height: half }, f);
                    visit_tiles(second, Tile { x, y, width, height: half }, f);
                }
                CutKind::Horizontal => {
                    let half = width / 2;
                    visit_tiles(first, Tile { x, y, width: half, height }, f);
                    visit_tiles(second, Tile { x: x + half, y, width: half, height }, f);
                }
            }
        }
    }
}

/// Paints the leaves of `cutting` into `out[x..x + width, y..y + height]`.
pub fn assemble_into(cutting: &Cutting, tile: Tile, out: &mut Array2<f32>) {
    visit_tiles(cutting, tile, &mut |leaf_tile: Tile, leaf: &Cutting| {
        let Tile { x, y, width, height } = leaf_tile;
        out.slice_mut(s![x..x + width, y..y + height])
            .fill(leaf.value() as f32);
    });
}

/// Renders a partition of the whole output into a fresh `rows × bins` matrix.
///
/// # Examples
/// ```
/// use adaptive_spectrogram::spectrogram::{assemble, Cutting, CutKind};
/// let cutting = Cutting::Split {
///     kind: CutKind::Horizontal,
///     cost: 0.0,
///     value: 3.0,
///     rejected_cost: None,
///     first: Box::new(Cutting::Leaf { cost: 0.0, value: 1.0 }),
///     second: Box::new(Cutting::Leaf { cost: 0.0, value: 2.0 }),
/// };
/// let out = assemble(&cutting, 2, 4);
/// assert_eq!(out.row(0).to_vec(), vec![1.0; 4]);
/// assert_eq!(out.row(1).to_vec(), vec![2.0; 4]);
/// ```
pub fn assemble(cutting: &Cutting, rows: usize, bins: usize) -> Array2<f32> {
    let mut out = Array2::zeros((rows, bins));
    assemble_into(
        cutting,
        Tile {
            x: 0,
            y: 0,
            width: rows,
            height: bins,
        },
        &mut out,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: f64) -> Box<Cutting> {
        Box::new(Cutting::Leaf { cost: 0.0, value })
    }

    fn split(kind: CutKind, first: Box<Cutting>, second: Box<Cutting>) -> Box<Cutting> {
        let value = first.value() + second.value();
        Box::new(Cutting::Split {
            kind,
            cost: 0.0,
            value,
            rejected_cost: None,
            first,
            second,
        })
    }

    #[test]
    fn test_vertical_puts_first_child_on_top() {
        let tree = split(CutKind::Vertical, leaf(1.0), leaf(2.0));
        let out = assemble(&tree, 1, 4);
        assert_eq!(out.row(0).to_vec(), vec![2.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_mixed_tree_covers_each_cell_once() {
        let tree = split(
            CutKind::Vertical,
            split(CutKind::Horizontal, leaf(1.0), leaf(2.0)),
            split(
                CutKind::Horizontal,
                leaf(3.0),
                split(CutKind::Vertical, leaf(4.0), leaf(5.0)),
            ),
        );
        let mut hits = Array2::<u32>::zeros((2, 4));
        visit_tiles(
            &tree,
            Tile { x: 0, y: 0, width: 2, height: 4 },
            &mut |tile: Tile, _: &Cutting| {
                hits.slice_mut(s![tile.x..tile.x + tile.width, tile.y..tile.y + tile.height])
                    .mapv_inplace(|h| h + 1);
            },
        );
        assert!(hits.iter().all(|&h| h == 1));

        let out = assemble(&tree, 2, 4);
        let expected = ndarray::arr2(&[[3.0, 3.0, 1.0, 1.0], [5.0, 4.0, 2.0, 2.0]]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_tile_area() {
        assert_eq!(Tile { x: 1, y: 2, width: 3, height: 4 }.area(), 12);
    }
}
