use adaptive_spectrogram::concurrency::Coordinator;
use adaptive_spectrogram::spectrogram::{
    assemble, normalized_cost, select_split, xlogx, CutKind, Cutting, CuttingEngine,
    SpectrogramBank,
};
use approx::assert_abs_diff_eq;

fn filled_bank(min_resolution: usize, max_resolution: usize, cell: impl Fn(usize, usize, usize) -> f64) -> SpectrogramBank {
    let mut bank = SpectrogramBank::new(min_resolution, max_resolution).unwrap();
    for (level, grid) in bank.grids_mut().iter_mut().enumerate() {
        for ((x, y), v) in grid.data_mut().indexed_iter_mut() {
            *v = cell(level, x, y);
        }
    }
    bank
}

#[test]
fn test_cost_function() {
    assert_eq!(xlogx(0.0), 0.0);
    assert_abs_diff_eq!(xlogx(std::f64::consts::E), std::f64::consts::E, epsilon = 1e-12);
    assert_eq!(normalized_cost(-1.0, 0.0), 0.0);
    // a single cell of energy E normalises to 2 ln E
    let e = 3.0f64;
    assert_abs_diff_eq!(normalized_cost(xlogx(e), e), 2.0 * e.ln(), epsilon = 1e-12);
}

#[test]
fn test_uniform_bank_assembles_uniformly() {
    let bank = filled_bank(2, 8, |_, _, _| 0.25);
    let coordinator = Coordinator::sequential();
    let cutting = CuttingEngine::new(&bank, &coordinator).cut_all();
    assert!(!cutting.is_leaf());
    let out = assemble(&cutting, 4, 8);
    assert!(out.iter().all(|&v| v == 0.25));
}

#[test]
fn test_time_localised_energy_cuts_horizontally() {
    // level 0 (res 2) holds all its energy in frame 0; level 1 is flat
    let bank = filled_bank(2, 4, |level, x, _| match (level, x) {
        (0, 0) => 1.0,
        (0, _) => 0.0,
        _ => 1.0,
    });
    let coordinator = Coordinator::sequential();
    let cutting = CuttingEngine::new(&bank, &coordinator).cut_all();
    assert_eq!(cutting.kind(), Some(CutKind::Horizontal));

    let out = assemble(&cutting, 2, 4);
    assert_eq!(out.row(0).to_vec(), vec![1.0; 4]);
    assert_eq!(out.row(1).to_vec(), vec![0.0; 4]);
}

#[test]
fn test_select_split_keeps_both_children() {
    let leaf = |value: f64| Cutting::Leaf { cost: xlogx(value), value };
    let chosen = select_split(leaf(0.2), leaf(0.3), leaf(0.9), leaf(0.1));
    let (first, second) = chosen.children().unwrap();
    assert_abs_diff_eq!(first.value() + second.value(), chosen.value(), epsilon = 1e-12);
}

#[test]
fn test_threaded_cut_matches_sequential() {
    let bank = filled_bank(4, 64, |level, x, y| ((level * 13 + x * 7 + y * 3) % 17) as f64 / 17.0);
    let sequential = Coordinator::sequential();
    let threaded = Coordinator::threaded(4).unwrap();
    assert_eq!(
        CuttingEngine::new(&bank, &sequential).cut_all(),
        CuttingEngine::new(&bank, &threaded).cut_all()
    );
}

#[test]
fn test_display_outline() {
    let bank = filled_bank(2, 4, |level, x, _| if level == 0 && x > 0 { 0.0 } else { 1.0 });
    let coordinator = Coordinator::sequential();
    let text = CuttingEngine::new(&bank, &coordinator).cut_all().to_string();
    assert_eq!(text, "H\n  * 1\n  * 0\n");
}
