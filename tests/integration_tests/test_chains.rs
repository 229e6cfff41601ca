// integration tests for single-field condition chains

use formgate::conditions::{Filter, Token};
use formgate::target::{Field, FieldKind, SelectOption};
use formgate::Error;
use regex::Regex;

use crate::common::fixed_clock;

#[test]
fn test_signup_email_gate() {
    let mut email = Field::new(FieldKind::Email);

    email.when().is_not_empty().and().is_email().then().unwrap();
    assert!(!email.enabled);

    // disabled fields ignore writes until a chain re-enables them
    email.set_value("user@example.com");
    assert_eq!(email.value.as_deref(), None);

    email.enable().set_value("user@example.com");
    email.when().is_not_empty().and().is_email().then().unwrap();
    assert!(email.enabled);
}

#[test]
fn test_and_binds_tighter_than_or() {
    // false && true || true  ->  true
    let mut field = Field::text("5");
    let enabled = field
        .when()
        .is_empty()
        .and()
        .is_number()
        .or()
        .is_number()
        .then()
        .unwrap()
        .enabled;
    assert!(enabled);

    // true || false && false  ->  true
    let enabled = field
        .when()
        .is_number()
        .or()
        .is_empty()
        .and()
        .is_empty()
        .then()
        .unwrap()
        .enabled;
    assert!(enabled);

    // false || true && false  ->  false
    let enabled = field
        .when()
        .is_empty()
        .or()
        .is_number()
        .and()
        .is_empty()
        .then()
        .unwrap()
        .enabled;
    assert!(!enabled);
}

#[test]
fn test_else_is_negated_then() {
    let values = ["", "abc", "42", "user@example.com"];
    for value in values {
        let mut a = Field::text(value);
        let mut b = Field::text(value);
        let then = a.when().is_number().or().is_email().then().unwrap().enabled;
        let otherwise = b
            .when()
            .is_number()
            .or()
            .is_email()
            .otherwise()
            .unwrap()
            .enabled;
        assert_eq!(then, !otherwise, "value {:?}", value);
    }
}

#[test]
fn test_failed_resolution_is_atomic() {
    let mut field = Field::text("abc");
    field.disable();

    let err = field
        .when()
        .is_not_empty()
        .token(Token::And)
        .token(Token::And)
        .then()
        .unwrap_err();
    assert!(matches!(err, Error::ConditionEvaluation(_)));
    assert!(!field.enabled);

    // the next chain starts fresh and resolves normally
    assert!(field.when().is_not_empty().then().unwrap().enabled);
}

#[test]
fn test_password_confirmation_flow() {
    let mut password = Field::new(FieldKind::Password).with_value("Sup3r$ecret");
    assert!(password.when().is_password().result());
    assert!(!password.when().is_strong_password().result());

    password.set_value("Sup3r$ecret!Long");
    assert!(password.when().is_strong_password().result());

    let mut confirm = Field::new(FieldKind::Password).with_value("Sup3r$ecret!Long");
    let expected = password.value.clone().unwrap();
    confirm.when().is_equal(&expected).then().unwrap();
    assert!(confirm.enabled);
}

#[test]
fn test_filter_then_validate_phone() {
    let mut phone = Field::text("(010) 1234-5678");
    phone.filter_input(Filter::Number);
    assert_eq!(phone.value.as_deref(), Some("01012345678"));
    let enabled = phone
        .when()
        .is_length_between(10, 11)
        .and()
        .is_number()
        .then()
        .unwrap()
        .enabled;
    assert!(enabled);
}

#[test]
fn test_custom_regex_and_selection() {
    let sku = Regex::new(r"^[A-Z]{3}-\d{4}$").unwrap();
    let mut code = Field::text("ABC-1234");
    assert!(code.when().matches(&sku).result());
    assert!(code.when().not_matches(&sku).or().is_empty().otherwise().unwrap().enabled);

    let mut country = Field::select(vec![
        SelectOption::new("kr", false),
        SelectOption::new("jp", false),
    ]);
    assert!(!country.when().is_selected().then().unwrap().enabled);

    // selection is gated: re-enable first
    country.enable().select_value("jp", true);
    assert!(country
        .when()
        .is_selected_by_value("jp")
        .and()
        .is_not_selected_by_value("kr")
        .then()
        .unwrap()
        .enabled);
}

#[test]
fn test_date_window() {
    let clock = fixed_clock();

    let mut birthday = Field::date("2006-06-15");
    // exactly 18 years ago counts as "at least 18 years ago"
    assert!(birthday.when().with_clock(clock).is_months_ago(216).result());

    birthday.add_days(1);
    assert!(!birthday.when().with_clock(clock).is_months_ago(216).result());

    let mut reservation = Field::date("2024-06-20");
    assert!(reservation
        .when()
        .with_clock(clock)
        .is_days_later(5)
        .and()
        .is_date_ago("2024-12-31")
        .then()
        .unwrap()
        .enabled);
}

#[test]
fn test_time_window() {
    let clock = fixed_clock();
    let mut pickup = Field::time("14:30");

    assert!(pickup.when().with_clock(clock).is_hours_later(2).result());
    assert!(!pickup.when().with_clock(clock).is_hours_later(3).result());
    assert!(pickup.when().is_time_later("09:00").and().is_time_ago("18:00").result());

    pickup.add_hours(10);
    assert_eq!(pickup.value.as_deref(), Some("00:30"));
}

#[test]
fn test_files_chain() {
    let mut upload = Field::file(&["a.pdf", "b.pdf", "c.pdf"]);
    assert!(!upload.when().is_less_files_count(3).then().unwrap().enabled);
    assert!(upload
        .when()
        .is_files_count_between(1, 3)
        .then()
        .unwrap()
        .enabled);
}
