//! Unit tests for time budgets.

use crate::task::domain::{TaskDomainError, TimeBudget, TimeType};
use rstest::rstest;

#[rstest]
#[case(TimeType::Misc, 30, 1_800)]
#[case(TimeType::Misc, 5, 300)]
#[case(TimeType::Daily, 2, 7_200)]
#[case(TimeType::Long, 1, 28_800)]
#[case(TimeType::Long, 3, 86_400)]
fn budget_converts_to_seconds(
    #[case] time_type: TimeType,
    #[case] value: u32,
    #[case] expected: u64,
) {
    let budget = TimeBudget::new(time_type, value).expect("non-empty budget");
    assert_eq!(budget.as_seconds(), expected);
}

#[rstest]
#[case(1_800, false)]
#[case(1_801, true)]
#[case(0, false)]
fn misc_thirty_overruns_only_past_budget(#[case] elapsed: u64, #[case] overrun: bool) {
    let budget = TimeBudget::minutes(30).expect("non-empty budget");
    assert_eq!(budget.is_overrun(elapsed), overrun);
}

#[rstest]
fn zero_budget_is_rejected() {
    assert_eq!(
        TimeBudget::new(TimeType::Daily, 0),
        Err(TaskDomainError::EmptyBudget)
    );
}

#[rstest]
#[case(TimeBudget::minutes(45), 45)]
#[case(TimeBudget::hours(3), 180)]
#[case(TimeBudget::days(2), 960)]
fn budget_converts_to_minutes(
    #[case] budget: Result<TimeBudget, TaskDomainError>,
    #[case] expected: u64,
) {
    assert_eq!(budget.expect("non-empty budget").as_minutes(), expected);
}

#[rstest]
#[case("misc", TimeType::Misc)]
#[case(" Daily ", TimeType::Daily)]
#[case("LONG", TimeType::Long)]
fn time_type_parses_case_insensitively(#[case] raw: &str, #[case] expected: TimeType) {
    assert_eq!(TimeType::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_time_type_is_rejected() {
    assert!(TimeType::try_from("weekly").is_err());
}

#[rstest]
fn budget_displays_with_unit_suffix() {
    let budget = TimeBudget::hours(2).expect("non-empty budget");
    assert_eq!(budget.to_string(), "2h");
}
