//! Behavior-driven tests for the valuation engine
//!
//! These tests verify WHAT a caller gets back for a given set of inputs,
//! including every validation failure the engine promises to report.

use dcfx_core::{
    discounted_cash_flow, intrinsic_value_per_share, BalanceSheetSnapshot, FreeCashFlowHistory,
    ValuationError, ValuationParameters, MAX_FORWARD_PERIODS,
};

fn history(values: &[f64]) -> FreeCashFlowHistory {
    FreeCashFlowHistory::new(values.to_vec())
}

fn default_params() -> ValuationParameters {
    ValuationParameters::new(4, 0.15, 0.025, 0.08)
}

fn balance(cash: f64, debt: f64, shares: f64) -> BalanceSheetSnapshot {
    BalanceSheetSnapshot::new(cash, debt, shares)
}

// =============================================================================
// Valuation: Known Answers
// =============================================================================

#[test]
fn single_year_history_with_flat_growth_matches_hand_calculation() {
    // Given: one year of FCF = 100, one explicit year, no growth
    let params = ValuationParameters::new(1, 0.0, 0.02, 0.08);

    // When: the company is valued with 10 shares and no net cash
    let valuation = discounted_cash_flow(&history(&[100.0]), &params, &balance(0.0, 0.0, 10.0))
        .expect("valid inputs");

    // Then: every intermediate figure matches the worked example
    assert!((valuation.projections[0].free_cash_flow - 100.0).abs() < 1e-9);
    assert!((valuation.terminal_value - 1700.0).abs() < 1e-6);
    assert!((valuation.projections[0].present_value - 92.592_592_6).abs() < 1e-6);
    assert!((valuation.terminal_present_value - 1_457.475_994).abs() < 1e-5);
    assert!((valuation.equity_value - 1_550.068_587).abs() < 1e-5);
    assert!((valuation.per_share_value - 155.006_858_7).abs() < 1e-6);
}

#[test]
fn default_cli_assumptions_produce_expected_value() {
    // Given: the CLI defaults (4 years, 15% growth, 2.5% perpetual, 8% discount)
    let fcf = history(&[60.0, 70.0, 80.0]);

    // When: valued against a modest balance sheet
    let per_share = intrinsic_value_per_share(&fcf, &default_params(), &balance(50.0, 20.0, 5.0))
        .expect("valid inputs");

    // Then: the result matches an independent computation
    let mut flow: f64 = 80.0;
    let mut pv = 0.0;
    for year in 1..=4 {
        flow *= 1.15;
        pv += flow / 1.08_f64.powi(year);
    }
    let terminal = flow * 1.025 / (0.08 - 0.025);
    pv += terminal / 1.08_f64.powi(5);
    let expected = (pv + 50.0 - 20.0) / 5.0;

    assert!((per_share - expected).abs() < 1e-9);
}

#[test]
fn only_the_most_recent_year_drives_the_projection() {
    // Given: two histories that share only their latest value
    let params = default_params();
    let snapshot = balance(0.0, 0.0, 1.0);

    // When: both are valued
    let short = intrinsic_value_per_share(&history(&[42.0]), &params, &snapshot).expect("valid");
    let long = intrinsic_value_per_share(&history(&[-900.0, 7.0, 1e6, 42.0]), &params, &snapshot)
        .expect("valid");

    // Then: the older years make no difference
    assert_eq!(short, long);
}

#[test]
fn zero_growth_projects_a_flat_cash_flow() {
    // Given: zero explicit growth over five years
    let params = ValuationParameters::new(5, 0.0, 0.01, 0.09);

    // When: the projection is built
    let valuation = discounted_cash_flow(&history(&[10.0, 250.0]), &params, &balance(0.0, 0.0, 1.0))
        .expect("valid inputs");

    // Then: every explicit year equals the latest actual
    assert_eq!(valuation.projections.len(), 5);
    for projection in &valuation.projections {
        assert_eq!(projection.free_cash_flow, 250.0);
    }
}

#[test]
fn terminal_value_is_discounted_one_year_after_the_last_projection() {
    // Given: a three-year explicit window
    let params = ValuationParameters::new(3, 0.05, 0.02, 0.1);

    // When: the company is valued
    let valuation = discounted_cash_flow(&history(&[100.0]), &params, &balance(0.0, 0.0, 1.0))
        .expect("valid inputs");

    // Then: the terminal value uses year 4, not year 3
    assert_eq!(valuation.terminal_year, 4);
    let last = valuation.projections.last().expect("three projections");
    assert_eq!(last.year, 3);
    assert!(
        (valuation.terminal_present_value - valuation.terminal_value / 1.1_f64.powi(4)).abs()
            < 1e-9
    );

    // And: the present value is the sum of all four discounted flows
    let explicit: f64 = valuation.projections.iter().map(|p| p.present_value).sum();
    assert!(
        (valuation.present_value_sum - (explicit + valuation.terminal_present_value)).abs() < 1e-9
    );
}

#[test]
fn heavy_debt_yields_a_negative_value_instead_of_an_error() {
    // Given: debt far above the discounted cash flows
    let snapshot = balance(0.0, 1e12, 1_000.0);

    // When: the company is valued
    let per_share = intrinsic_value_per_share(&history(&[1_000.0]), &default_params(), &snapshot)
        .expect("negative equity is valid");

    // Then: the caller sees the negative number
    assert!(per_share < 0.0);
}

#[test]
fn negative_latest_cash_flow_is_accepted() {
    // Given: a company that burned cash last year
    let per_share = intrinsic_value_per_share(
        &history(&[50.0, -30.0]),
        &default_params(),
        &balance(500.0, 0.0, 10.0),
    );

    // Then: the engine still values it
    assert!(per_share.is_ok());
}

// =============================================================================
// Valuation: Validation Failures
// =============================================================================

#[test]
fn discount_rate_equal_to_perpetual_growth_is_rejected() {
    for rate in [0.0, 0.02, 0.08, 0.5] {
        let params = ValuationParameters::new(4, 0.1, rate, rate);
        let err = intrinsic_value_per_share(&history(&[100.0]), &params, &balance(0.0, 0.0, 1.0))
            .expect_err("equal rates must fail");
        assert!(
            matches!(err, ValuationError::InvalidModelParameters { .. }),
            "rate {rate}: {err}"
        );
    }
}

#[test]
fn discount_rate_below_perpetual_growth_is_rejected() {
    let params = ValuationParameters::new(4, 0.1, 0.09, 0.08);

    let err = intrinsic_value_per_share(&history(&[100.0]), &params, &balance(0.0, 0.0, 1.0))
        .expect_err("misordered rates must fail");

    assert!(matches!(err, ValuationError::InvalidModelParameters { .. }));
    assert_eq!(err.code(), "valuation.invalid_model_parameters");
}

#[test]
fn non_positive_share_counts_are_rejected() {
    for shares in [0.0, -1.0, -1e9] {
        let err = intrinsic_value_per_share(
            &history(&[100.0]),
            &default_params(),
            &balance(10.0, 5.0, shares),
        )
        .expect_err("non-positive shares must fail");
        assert!(matches!(err, ValuationError::InvalidModelParameters { .. }));
    }
}

#[test]
fn zero_year_horizon_is_rejected() {
    let params = ValuationParameters::new(0, 0.15, 0.025, 0.08);

    let err = intrinsic_value_per_share(&history(&[100.0]), &params, &balance(0.0, 0.0, 1.0))
        .expect_err("zero horizon must fail");

    assert!(matches!(err, ValuationError::InvalidModelParameters { .. }));
}

#[test]
fn empty_history_is_insufficient_data() {
    let err = intrinsic_value_per_share(&history(&[]), &default_params(), &balance(0.0, 0.0, 1.0))
        .expect_err("empty history must fail");

    assert!(matches!(err, ValuationError::InsufficientData { .. }));
    assert_eq!(err.code(), "valuation.insufficient_data");
}

#[test]
fn non_finite_rates_are_rejected_before_computing() {
    let params = ValuationParameters::new(4, f64::NAN, 0.025, 0.08);

    let err = intrinsic_value_per_share(&history(&[100.0]), &params, &balance(0.0, 0.0, 1.0))
        .expect_err("NaN growth must fail");

    assert!(matches!(err, ValuationError::InvalidModelParameters { .. }));
}

#[test]
fn horizon_beyond_the_cap_is_rejected_before_computing() {
    // Given: the default rates with a ten-thousand-year projection
    let params = ValuationParameters::new(10_000, 0.15, 0.025, 0.08);

    // When: the company is valued
    let err = intrinsic_value_per_share(&history(&[100.0]), &params, &balance(0.0, 0.0, 10.0))
        .expect_err("horizon above the cap must fail");

    // Then: the caller gets a parameter error, never a NaN price
    assert!(matches!(err, ValuationError::InvalidModelParameters { .. }));

    // And: the cap itself is still accepted
    let capped = ValuationParameters::new(MAX_FORWARD_PERIODS, 0.15, 0.025, 0.08);
    assert!(intrinsic_value_per_share(&history(&[100.0]), &capped, &balance(0.0, 0.0, 10.0))
        .is_ok_and(f64::is_finite));
}
