use portfolio_insights::{
    format_compact, format_currency, format_percent, DashboardData, GrowthAggregator,
    InsightsError, InsightsEngine, ParseMode, SeriesParser,
};

fn derive(raw: &str) -> DashboardData {
    InsightsEngine::new().derive(raw).unwrap()
}

#[test]
fn test_basic_two_month_dashboard() {
    let data = derive("Date,Value\n2024/01/01,1000\n2024/01/31,1100\n2024/02/29,1210\n");

    let dates: Vec<&str> = data.points.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2024/01/01", "2024/01/31", "2024/02/29"]);
    let values: Vec<i64> = data.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1000, 1100, 1210]);

    assert_eq!(data.monthly_growth.len(), 2);

    let january = &data.monthly_growth[0];
    assert_eq!(january.month, "2024-01");
    assert_eq!(january.start_value, 1000);
    assert_eq!(january.end_value, 1100);
    assert_eq!(january.growth, 100);
    assert_eq!(january.growth_percent, 10.0);

    let february = &data.monthly_growth[1];
    assert_eq!(february.month, "2024-02");
    assert_eq!(february.start_value, 1100);
    assert_eq!(february.end_value, 1210);
    assert_eq!(february.growth, 110);
    assert_eq!(february.growth_percent, 10.0);
}

#[test]
fn test_garbage_line_does_not_abort_processing() {
    let data = derive("Date,Value\n2024/01/01,1000\ngarbage\n2024/01/31,1100\n");

    assert_eq!(data.points.len(), 2);
    assert!(data.points.iter().all(|p| p.date != "garbage"));
    assert_eq!(data.monthly_growth[0].end_value, 1100);
}

#[test]
fn test_quoted_thousands_grouped_value() {
    let data = derive("Date,Value\n2024/06/30,\"35,000,000\"\n");
    assert_eq!(data.points[0].value, 35_000_000);
}

#[test]
fn test_optional_index_column_per_row() {
    let data = derive(
        "Date,Value,Index\n2024/01/01,1000,\"4,500.25\"\n2024/01/02,1010\n2024/01/03,1020,oops\n",
    );

    assert_eq!(data.points.len(), 3);
    assert_eq!(data.points[0].index, Some(4500.25));
    assert_eq!(data.points[1].index, None);
    assert_eq!(data.points[2].index, None);
}

#[test]
fn test_single_row_input() {
    let data = derive("Date,Value\n2024/07/15,5000\n");

    assert_eq!(data.points.len(), 1);
    assert_eq!(data.monthly_growth.len(), 1);

    let only = &data.monthly_growth[0];
    assert_eq!(only.start_value, only.end_value);
    assert_eq!(only.growth, 0);
}

#[test]
fn test_points_sorted_ascending_by_calendar_date() {
    let data = derive("Date,Value\n2024/03/01,3000\n2023/11/15,900\n2024/01/01,1000\n");

    for pair in data.points.windows(2) {
        assert!(pair[0].calendar_date <= pair[1].calendar_date);
    }
}

#[test]
fn test_rederivation_is_idempotent() {
    let raw = "Date,Value,Index\n2024/02/01,2000,300.5\n2024/01/01,1000\nbroken line\n2024/03/01,\"3,000\"\n";

    let engine = InsightsEngine::new();
    let first = engine.derive(raw).unwrap();
    let second = engine.derive(raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_month_coverage_matches_input_months() {
    let raw = "Date,Value\n2024/01/05,100\n2024/01/20,110\n2024/04/01,200\n2024/04/30,210\n2023/12/31,90\n";
    let data = derive(raw);

    let months: Vec<&str> = data
        .monthly_growth
        .iter()
        .map(|r| r.month.as_str())
        .collect();
    assert_eq!(months, vec!["2023-12", "2024-01", "2024-04"]);
}

#[test]
fn test_chain_continuity_across_gap() {
    let raw = "Date,Value\n2024/01/31,1000\n2024/04/30,1600\n";
    let data = derive(raw);

    for pair in data.monthly_growth.windows(2) {
        assert_eq!(pair[1].start_value, pair[0].end_value);
    }

    let april = &data.monthly_growth[1];
    assert_eq!(april.month, "2024-04");
    assert_eq!(april.start_value, 1000);
    assert_eq!(april.growth, 600);
    assert_eq!(april.growth_percent, 60.0);
}

#[test]
fn test_growth_percent_always_finite() {
    let raw = "Date,Value\n2024/01/01,0\n2024/02/01,500\n2024/03/01,0\n2024/04/01,250\n";
    let data = derive(raw);

    for record in &data.monthly_growth {
        assert!(record.growth_percent.is_finite());
        if record.start_value == 0 {
            assert_eq!(record.growth_percent, 0.0);
        }
    }
}

#[test]
fn test_strict_mode_surfaces_malformed_rows() {
    let engine = InsightsEngine::with_mode(ParseMode::Strict);
    let err = engine
        .derive("Date,Value\n2024/01/01,1000\n2024/13/01,1100\n")
        .unwrap_err();

    match err {
        InsightsError::MalformedLine { line, details } => {
            assert_eq!(line, 3);
            assert!(details.contains("2024/13/01"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parser_and_aggregator_compose_manually() {
    let parser = SeriesParser::new();
    let aggregator = GrowthAggregator::new();

    let points = parser
        .parse("Date,Value\n2024/01/01,1000\n2024/02/01,1200\n")
        .unwrap();
    let records = aggregator.aggregate(&points);

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].growth, 200);
}

#[test]
fn test_presentation_of_derived_values() {
    let data = derive("Date,Value\n2024/01/01,\"35,000,000\"\n2024/02/01,\"38,500,000\"\n");

    let february = &data.monthly_growth[1];
    assert_eq!(format_currency(february.end_value), "$38,500,000");
    assert_eq!(format_compact(february.end_value as f64), "38.5M");
    assert_eq!(format_percent(february.growth_percent), "+10.0%");
}
