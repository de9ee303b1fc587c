//! Agreement between the naive, blocked and parallel dense kernels

use ndarray::{array, Array2};
use strata::{
    multiply_blocked, multiply_dense, multiply_naive, multiply_parallel,
    multiply_parallel_with_threshold, DenseMultiplier, KernelConfig, MatrixError, Strategy,
};

/// Deterministic matrix with non-trivial fractional entries
fn create_test_matrix(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    Array2::from_shape_simple_fn((rows, cols), || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 2000) as f64 / 100.0 - 10.0
    })
}

fn assert_close(actual: &Array2<f64>, expected: &Array2<f64>) {
    assert_eq!(actual.dim(), expected.dim());
    for (x, y) in actual.iter().zip(expected.iter()) {
        let scale = x.abs().max(y.abs()).max(1.0);
        assert!(
            (x - y).abs() <= 1e-9 * scale,
            "Value mismatch: {} vs {}",
            x,
            y
        );
    }
}

#[test]
fn test_two_by_two_all_kernels() {
    let a = array![[1.0, 2.0], [3.0, 4.0]];
    let b = array![[5.0, 6.0], [7.0, 8.0]];
    let expected = array![[19.0, 22.0], [43.0, 50.0]];

    assert_eq!(multiply_naive(a.view(), b.view()).unwrap(), expected);
    assert_eq!(multiply_blocked(a.view(), b.view(), 1).unwrap(), expected);
    assert_eq!(multiply_parallel(a.view(), b.view()).unwrap(), expected);
}

#[test]
fn test_blocked_agrees_for_every_tile_size() {
    let n = 17;
    let a = create_test_matrix(n, n, 1);
    let b = create_test_matrix(n, n, 2);
    let expected = multiply_naive(a.view(), b.view()).unwrap();

    for tile in 1..=n {
        let c = multiply_blocked(a.view(), b.view(), tile).unwrap();
        assert_close(&c, &expected);
    }
}

#[test]
fn test_parallel_agrees_above_threshold() {
    // Tall enough that the default 64-row threshold forces several splits
    let n = 200;
    let a = create_test_matrix(n, n, 3);
    let b = create_test_matrix(n, n, 4);
    let expected = multiply_naive(a.view(), b.view()).unwrap();

    assert_close(&multiply_parallel(a.view(), b.view()).unwrap(), &expected);
    assert_close(
        &multiply_parallel_with_threshold(a.view(), b.view(), 7).unwrap(),
        &expected,
    );
}

#[test]
fn test_parallel_rectangular() {
    let a = create_test_matrix(150, 40, 5);
    let b = create_test_matrix(40, 13, 6);
    let expected = multiply_naive(a.view(), b.view()).unwrap();

    let c = multiply_parallel(a.view(), b.view()).unwrap();
    assert_eq!(c.dim(), (150, 13));
    assert_close(&c, &expected);
}

#[test]
fn test_shape_errors() {
    let a = create_test_matrix(3, 4, 7);
    let b = create_test_matrix(5, 3, 8);

    assert!(matches!(
        multiply_naive(a.view(), b.view()),
        Err(MatrixError::DimensionMismatch { expected: 4, got: 5, .. })
    ));
    assert!(matches!(
        multiply_parallel(a.view(), b.view()),
        Err(MatrixError::DimensionMismatch { expected: 4, got: 5, .. })
    ));
    assert!(matches!(
        multiply_blocked(a.view(), b.view(), 2),
        Err(MatrixError::InvalidShape { .. })
    ));
}

#[test]
fn test_dispatch_every_strategy() {
    let n = 90;
    let a = create_test_matrix(n, n, 9);
    let b = create_test_matrix(n, n, 10);
    let expected = multiply_naive(a.view(), b.view()).unwrap();

    for strategy in [
        Strategy::Naive,
        Strategy::Blocked,
        Strategy::Parallel,
        Strategy::Auto,
    ] {
        let config = KernelConfig::for_strategy(strategy).with_tile_size(16);
        let c = multiply_dense(a.view(), b.view(), &config).unwrap();
        assert_close(&c, &expected);
    }
}

#[test]
fn test_multiplier_with_bounded_pool() {
    let config = KernelConfig::default()
        .with_threads(2)
        .with_parallel_threshold(8)
        .with_tile_size(4);
    let multiplier = DenseMultiplier::new(config).unwrap();

    let a = create_test_matrix(70, 70, 11);
    let b = create_test_matrix(70, 70, 12);
    let expected = multiply_naive(a.view(), b.view()).unwrap();

    assert_close(&multiplier.multiply(a.view(), b.view()).unwrap(), &expected);

    // Non-square operands fall through to a kernel that accepts them
    let tall = create_test_matrix(70, 5, 13);
    let wide = create_test_matrix(5, 3, 14);
    let expected = multiply_naive(tall.view(), wide.view()).unwrap();
    assert_close(&multiplier.multiply(tall.view(), wide.view()).unwrap(), &expected);
}

#[test]
fn test_multiplier_rejects_zero_threads() {
    let err = DenseMultiplier::new(KernelConfig::default().with_threads(0)).unwrap_err();
    assert!(matches!(err, MatrixError::InvalidParameter { name: "n_threads", .. }));
}
