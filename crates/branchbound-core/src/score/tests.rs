use super::*;

#[test]
fn simple_score_ordering() {
    assert!(SimpleScore::of(-3) > SimpleScore::of(-5));
    assert!(SimpleScore::of(0) > SimpleScore::of(-1));
    assert_eq!(SimpleScore::of(7), SimpleScore::of(7));
}

#[test]
fn simple_score_arithmetic() {
    let a = SimpleScore::of(3);
    let b = SimpleScore::of(-5);
    assert_eq!(a + b, SimpleScore::of(-2));
    assert_eq!(a - b, SimpleScore::of(8));
    assert_eq!(-a, SimpleScore::of(-3));
}

#[test]
fn simple_score_feasibility() {
    assert!(SimpleScore::of(0).is_feasible());
    assert!(SimpleScore::of(10).is_feasible());
    assert!(!SimpleScore::of(-1).is_feasible());
}

#[test]
fn simple_score_level_numbers_round_trip() {
    let s = SimpleScore::of(-42);
    assert_eq!(s.to_level_numbers(), vec![-42]);
    assert_eq!(SimpleScore::from_level_numbers(&[-42]), s);
}

#[test]
fn hard_soft_lexicographic_ordering() {
    // Hard dominates
    assert!(HardSoftScore::of(0, -200) > HardSoftScore::of(-1, 0));
    // Soft breaks ties
    assert!(HardSoftScore::of(0, -50) > HardSoftScore::of(0, -200));
    assert_eq!(HardSoftScore::of(-1, -1), HardSoftScore::of(-1, -1));
}

#[test]
fn hard_soft_arithmetic() {
    let a = HardSoftScore::of(-1, -10);
    let b = HardSoftScore::of(-2, 5);
    assert_eq!(a + b, HardSoftScore::of(-3, -5));
    assert_eq!(a - b, HardSoftScore::of(1, -15));
    assert_eq!(-a, HardSoftScore::of(1, 10));
}

#[test]
fn hard_soft_feasibility_ignores_soft() {
    assert!(HardSoftScore::of(0, -1000).is_feasible());
    assert!(!HardSoftScore::of(-1, 1000).is_feasible());
}

#[test]
fn hard_soft_display() {
    assert_eq!(format!("{}", HardSoftScore::of(-1, -20)), "-1hard/-20soft");
}

#[test]
fn hard_soft_level_numbers_round_trip() {
    let s = HardSoftScore::of(-1, -20);
    assert_eq!(s.to_level_numbers(), vec![-1, -20]);
    assert_eq!(HardSoftScore::from_level_numbers(&[-1, -20]), s);
}

#[test]
fn trend_uniform_and_accessors() {
    let trend = InitializingScoreTrend::uniform(ScoreTrendLevel::OnlyDown, 2);
    assert_eq!(trend.levels_count(), 2);
    assert!(trend.is_only_down(0));
    assert!(trend.is_only_down(1));
    assert!(trend.is_only_down_everywhere());
}

#[test]
fn trend_mixed_levels() {
    let trend = InitializingScoreTrend::new(vec![ScoreTrendLevel::OnlyDown, ScoreTrendLevel::Any]);
    assert!(trend.is_only_down(0));
    assert!(!trend.is_only_down(1));
    assert!(!trend.is_only_down_everywhere());
    assert_eq!(trend.level(1), ScoreTrendLevel::Any);
}

#[test]
fn trend_level_count_validation() {
    let trend = InitializingScoreTrend::any(1);
    assert!(trend.check_levels(1).is_ok());
    assert!(trend.check_levels(2).is_err());
}
