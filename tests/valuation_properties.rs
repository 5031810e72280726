//! Property tests for the valuation engine: monotonicity in the balance
//! sheet, rejection of misordered rates, and determinism.

use dcfx_core::{
    intrinsic_value_per_share, BalanceSheetSnapshot, FreeCashFlowHistory, ValuationError,
    ValuationParameters,
};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = ValuationParameters> {
    (1u32..=10, -0.2f64..0.4, -0.05f64..0.05, 0.01f64..0.3)
        .prop_filter("discount rate must exceed perpetual growth", |(_, _, pg, r)| {
            r - pg > 1e-3
        })
        .prop_map(|(periods, g, pg, r)| ValuationParameters::new(periods, g, pg, r))
}

fn history_strategy() -> impl Strategy<Value = FreeCashFlowHistory> {
    prop::collection::vec(1.0f64..1e9, 1..=4).prop_map(FreeCashFlowHistory::new)
}

proptest! {
    #[test]
    fn more_debt_lowers_the_value(
        history in history_strategy(),
        params in params_strategy(),
        cash in 0.0f64..1e9,
        debt in 0.0f64..1e9,
        extra in 1.0f64..1e9,
        shares in 1.0f64..1e9,
    ) {
        let base = intrinsic_value_per_share(
            &history, &params, &BalanceSheetSnapshot::new(cash, debt, shares),
        ).expect("valid inputs");
        let indebted = intrinsic_value_per_share(
            &history, &params, &BalanceSheetSnapshot::new(cash, debt + extra, shares),
        ).expect("valid inputs");

        prop_assert!(indebted < base);
    }

    #[test]
    fn more_cash_raises_the_value(
        history in history_strategy(),
        params in params_strategy(),
        cash in 0.0f64..1e9,
        extra in 1.0f64..1e9,
        shares in 1.0f64..1e9,
    ) {
        let base = intrinsic_value_per_share(
            &history, &params, &BalanceSheetSnapshot::new(cash, 0.0, shares),
        ).expect("valid inputs");
        let richer = intrinsic_value_per_share(
            &history, &params, &BalanceSheetSnapshot::new(cash + extra, 0.0, shares),
        ).expect("valid inputs");

        prop_assert!(richer > base);
    }

    #[test]
    fn more_shares_dilute_a_positive_equity_value(
        history in history_strategy(),
        params in params_strategy(),
        cash in 0.0f64..1e9,
        shares in 1.0f64..1e9,
        factor in 1.01f64..100.0,
    ) {
        let snapshot = BalanceSheetSnapshot::new(cash, 0.0, shares);
        let base = intrinsic_value_per_share(&history, &params, &snapshot).expect("valid inputs");
        prop_assume!(base > 0.0);

        let diluted = intrinsic_value_per_share(
            &history, &params, &BalanceSheetSnapshot::new(cash, 0.0, shares * factor),
        ).expect("valid inputs");

        prop_assert!(diluted < base);
    }

    #[test]
    fn misordered_rates_are_always_rejected(
        history in history_strategy(),
        periods in 1u32..=10,
        growth in -0.2f64..0.4,
        discount in -0.5f64..0.5,
        gap in 0.0f64..0.5,
    ) {
        let params = ValuationParameters::new(periods, growth, discount + gap, discount);
        let result = intrinsic_value_per_share(
            &history, &params, &BalanceSheetSnapshot::new(0.0, 0.0, 1.0),
        );

        let is_invalid_parameters =
            matches!(result, Err(ValuationError::InvalidModelParameters { .. }));
        prop_assert!(is_invalid_parameters);
    }

    #[test]
    fn repeated_valuations_are_bit_identical(
        history in history_strategy(),
        params in params_strategy(),
        cash in 0.0f64..1e9,
        debt in 0.0f64..1e9,
        shares in 1.0f64..1e9,
    ) {
        let snapshot = BalanceSheetSnapshot::new(cash, debt, shares);
        let first = intrinsic_value_per_share(&history, &params, &snapshot).expect("valid inputs");
        let second = intrinsic_value_per_share(&history, &params, &snapshot).expect("valid inputs");

        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}
