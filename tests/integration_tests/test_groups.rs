// integration tests for group chains and quorum evaluation

use formgate::conditions::Check;
use formgate::target::{Field, FieldGroup};
use formgate::Error;

fn interests() -> FieldGroup {
    FieldGroup::checkboxes(&[
        ("music", true),
        ("sports", false),
        ("travel", true),
        ("books", false),
        ("games", true),
    ])
}

#[test]
fn test_quorum_thresholds() {
    let mut group = interests();

    for (quorum, expected) in [(1, true), (2, true), (3, true), (4, false), (5, false)] {
        let result = group.when().set_pass_option(quorum).is_checked().result();
        assert_eq!(result, expected, "quorum {}", quorum);
    }
}

#[test]
fn test_quorum_does_not_leak_into_next_chain() {
    let mut group = interests();

    group.when().set_pass_option(2).is_checked().then().unwrap();
    assert!(group.enabled);

    // no quorum set: unanimity again
    group.when().is_checked().then().unwrap();
    assert!(!group.enabled);
}

#[test]
fn test_unanimity_over_inputs() {
    let mut names = FieldGroup::inputs(vec![
        Field::text("abc"),
        Field::text("abcd"),
        Field::text(""),
    ]);
    assert!(!names.when().is_not_empty().then().unwrap().enabled);

    // the group was disabled by the failed chain; members keep their own flag
    names.enable();
    names.items[2].set_value("ab");
    assert!(names
        .when()
        .is_not_empty()
        .and()
        .is_length_between(2, 4)
        .then()
        .unwrap()
        .enabled);
}

#[test]
fn test_radio_group_workflow() {
    let mut plan = FieldGroup::radios(&[("free", true), ("pro", false), ("team", false)]);

    plan.check_by_value("team", true);
    assert_eq!(plan.checked_value(), Some("team"));
    assert_eq!(plan.checked_count(), 1);

    let enabled = plan
        .when()
        .is_checked_by_value("team")
        .or()
        .is_checked_by_value("pro")
        .then()
        .unwrap()
        .enabled;
    assert!(enabled);

    plan.check(0, true).unwrap();
    assert!(!plan.when().is_checked_by_value("team").result());
}

#[test]
fn test_checked_sum_and_values() {
    let mut tips = FieldGroup::checkboxes(&[("10", true), ("abc", true), ("5", true), ("20", false)]);
    assert_eq!(tips.sum_of_checked_values(), 15.0);
    assert_eq!(tips.checked_values(), vec!["10", "abc", "5"]);

    tips.check_by_value("20", true);
    assert_eq!(tips.sum_of_checked_values(), 35.0);
    assert!(tips.when().is_checked_at_least(4).result());
}

#[test]
fn test_index_out_of_range() {
    let mut group = interests();
    let err = group.check(10, true).unwrap_err();
    assert_eq!(err, Error::IndexOutOfRange { index: 10, len: 5 });
    assert!(matches!(group.get(5), Err(Error::IndexOutOfRange { .. })));
}

#[test]
fn test_dynamic_checks_over_group() {
    let mut group = interests();

    let cond = group.when().set_pass_option(3).each(&Check::Checked).unwrap();
    assert!(cond.result());

    let cond = group
        .when()
        .each(&Check::Not(Box::new(Check::AnyChecked)))
        .unwrap();
    assert!(!cond.result());

    let cond = group
        .when()
        .each(&Check::CheckedValue("books".to_string()))
        .unwrap();
    assert!(!cond.result());
}
