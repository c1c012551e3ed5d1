// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::budget::{compare, scenario, BudgetStatus};
use rust_decimal::Decimal;

#[test]
fn strictly_over_budget_alerts() {
    let check = compare(Decimal::from(1000), Decimal::from(900));
    assert_eq!(check.status, BudgetStatus::Over);
    assert_eq!(check.delta, Decimal::from(100));
}

#[test]
fn under_budget_reports_headroom() {
    let check = compare(Decimal::from(700), Decimal::from(900));
    assert_eq!(check.status, BudgetStatus::Under);
    assert_eq!(check.delta, Decimal::from(200));
}

#[test]
fn exactly_on_budget_is_under_with_zero_delta() {
    let check = compare(Decimal::from(900), Decimal::from(900));
    assert_eq!(check.status, BudgetStatus::Under);
    assert_eq!(check.delta, Decimal::ZERO);
}

#[test]
fn scenario_applies_percentage_increase() {
    let adjusted = scenario(Decimal::from(1000), Decimal::from(10));
    assert_eq!(adjusted, Decimal::from(1100));
}

#[test]
fn scenario_percentage_can_be_negative() {
    let adjusted = scenario(Decimal::from(1000), Decimal::from(-50));
    assert_eq!(adjusted, Decimal::from(500));
}

#[test]
fn scenario_flips_an_under_forecast_over() {
    // 1000 predicted vs 900 budget is already over; start under instead.
    let predicted = Decimal::from(850);
    let budget = Decimal::from(900);
    assert_eq!(compare(predicted, budget).status, BudgetStatus::Under);

    let adjusted = scenario(predicted, Decimal::from(10));
    assert_eq!(adjusted, Decimal::from(935));
    let check = compare(adjusted, budget);
    assert_eq!(check.status, BudgetStatus::Over);
    assert_eq!(check.delta, Decimal::from(35));
}

#[test]
fn scenario_then_compare_reports_the_adjusted_delta() {
    let predicted = Decimal::from(1000);
    let budget = Decimal::from(900);
    let adjusted = scenario(predicted, Decimal::from(10));
    assert_eq!(adjusted, Decimal::from(1100));

    let check = compare(adjusted, budget);
    assert_eq!(check.status, BudgetStatus::Over);
    assert_eq!(check.delta, Decimal::from(200));
}

#[test]
fn fractional_percentages_keep_decimal_precision() {
    let adjusted = scenario(Decimal::from(200), "2.5".parse::<Decimal>().unwrap());
    assert_eq!(adjusted, Decimal::from(205));
}
