use chrono::NaiveDate;
use hr_portal::{
    AppraisalKind, AppraisalPlan, FiscalYear, classify_appraisals, fiscal_year_window,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn fy(start_year: i32) -> FiscalYear {
    FiscalYear::new(start_year)
}

#[test]
fn window_is_current_year_and_three_before_newest_first() {
    assert_eq!(
        fiscal_year_window(d(2025, 1, 15)),
        vec![fy(2024), fy(2023), fy(2022), fy(2021)]
    );
    assert_eq!(
        fiscal_year_window(d(2025, 4, 1)),
        vec![fy(2025), fy(2024), fy(2023), fy(2022)]
    );
}

#[test]
fn window_labels() {
    let labels: Vec<String> = fiscal_year_window(d(2025, 1, 15))
        .iter()
        .map(FiscalYear::label)
        .collect();
    assert_eq!(
        labels,
        vec!["FY (24 - 25)", "FY (23 - 24)", "FY (22 - 23)", "FY (21 - 22)"]
    );
}

#[test]
fn missing_join_date_offers_nothing() {
    let buckets = classify_appraisals(None, &fiscal_year_window(d(2025, 1, 15)));
    assert!(buckets.project_end.is_empty());
    assert!(buckets.year_end.is_empty());
}

#[test]
fn april_joiner_only_gets_year_end_appraisals() {
    let join = Some(d(2024, 4, 15));
    for today in [d(2024, 5, 1), d(2025, 1, 15), d(2026, 10, 19)] {
        let window = fiscal_year_window(today);
        let buckets = classify_appraisals(join, &window);
        assert!(buckets.project_end.is_empty());
        assert_eq!(buckets.year_end, window);
    }
}

#[test]
fn join_year_is_the_project_end_appraisal() {
    let window = vec![fy(2024), fy(2023), fy(2022), fy(2021)];
    let buckets = classify_appraisals(Some(d(2024, 6, 1)), &window);
    assert_eq!(buckets.project_end, vec![fy(2024)]);
    assert_eq!(buckets.year_end, vec![fy(2023), fy(2022), fy(2021)]);
}

#[test]
fn january_joiner_belongs_to_the_previous_fiscal_year() {
    let window = vec![fy(2024), fy(2023), fy(2022), fy(2021)];
    let buckets = classify_appraisals(Some(d(2024, 1, 10)), &window);
    assert_eq!(buckets.project_end, vec![fy(2023)]);
    assert_eq!(buckets.year_end, vec![fy(2024), fy(2022), fy(2021)]);
}

#[test]
fn join_outside_window_is_all_year_end() {
    let window = vec![fy(2024), fy(2023), fy(2022), fy(2021)];
    let buckets = classify_appraisals(Some(d(2015, 8, 1)), &window);
    assert!(buckets.project_end.is_empty());
    assert_eq!(buckets.year_end, window);
}

#[test]
fn plan_defaults_to_project_end_when_available() {
    let plan = AppraisalPlan::new(Some(d(2025, 6, 1)), d(2025, 11, 3));
    assert_eq!(plan.current, fy(2025));
    assert_eq!(
        plan.available_kinds(),
        vec![AppraisalKind::ProjectEnd, AppraisalKind::YearEnd]
    );

    let selection = plan.default_selection();
    assert_eq!(selection.kind, AppraisalKind::ProjectEnd);
    assert_eq!(selection.year, Some(fy(2025)));
    assert!(plan.can_add_tasks(fy(2025)));

    let switched = plan.select_kind(AppraisalKind::YearEnd);
    assert_eq!(switched.year, Some(fy(2024)));
    assert!(!plan.can_add_tasks(fy(2024)));
}

#[test]
fn plan_without_project_end_defaults_to_year_end() {
    let plan = AppraisalPlan::new(Some(d(2020, 4, 1)), d(2025, 1, 15));
    let selection = plan.default_selection();
    assert_eq!(selection.kind, AppraisalKind::YearEnd);
    assert_eq!(selection.year, Some(fy(2024)));
    assert_eq!(plan.available_kinds(), vec![AppraisalKind::YearEnd]);
}

#[test]
fn plan_without_join_date_has_no_selection() {
    let plan = AppraisalPlan::new(None, d(2025, 1, 15));
    assert_eq!(plan.default_selection().year, None);
    assert!(plan.available_kinds().is_empty());
}

#[test]
fn appraisal_kind_codes_round_trip() {
    assert_eq!("PEA".parse::<AppraisalKind>().unwrap(), AppraisalKind::ProjectEnd);
    assert_eq!("yea".parse::<AppraisalKind>().unwrap(), AppraisalKind::YearEnd);
    assert!("XYZ".parse::<AppraisalKind>().is_err());
    assert_eq!(
        serde_json::to_string(&AppraisalKind::ProjectEnd).unwrap(),
        "\"PEA\""
    );
    assert_eq!(AppraisalKind::YearEnd.description(), "Year End Appraisal");
}
