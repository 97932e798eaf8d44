mod common;
use common::*;
use kbasic::mach::Runtime;

fn eval(s: &str) -> String {
    let mut r = Runtime::default();
    r.enter(&format!("PRINT {}", s));
    exec(&mut r)
}

#[test]
fn test_precedence() {
    assert_eq!(eval("2 + 3 * 4"), "14\n");
    assert_eq!(eval("(2 + 3) * 4"), "20\n");
    assert_eq!(eval("2 ^ 3 * 2"), "16\n");
    assert_eq!(eval("-2 ^ 2"), "-4\n");
    assert_eq!(eval("10 - 4 - 3"), "3\n");
}

#[test]
fn test_division_is_real() {
    assert_eq!(eval("7 / 2"), "3.5\n");
    assert_eq!(eval("6 / 2"), "3\n");
    assert_eq!(eval("1 / 0"), "?DIVISION BY ZERO\n");
}

#[test]
fn test_integer_overflow() {
    assert_eq!(eval("2147483647 + 1"), "?OVERFLOW\n");
    assert_eq!(eval("2147483648"), "2147483648\n");
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(eval("1 < 2; 2 < 1"), "10\n");
    assert_eq!(eval("NOT 0; NOT 1"), "10\n");
    assert_eq!(eval("1 = 1 AND 2 = 3"), "0\n");
    assert_eq!(eval("1 = 1 OR 2 = 3"), "1\n");
    assert_eq!(eval("\"ABC\" <> \"ABD\""), "1\n");
}

#[test]
fn test_strings() {
    assert_eq!(eval("\"A\" + \"B\""), "AB\n");
    assert_eq!(eval("\"A\" + 1"), "?TYPE MISMATCH\n");
    assert_eq!(eval("\"A\" < 1"), "?TYPE MISMATCH\n");
}

#[test]
fn test_mixed_arithmetic() {
    assert_eq!(eval("1 + 0.5"), "1.5\n");
    assert_eq!(eval("0.5 * 4"), "2\n");
}

#[test]
fn test_syntax_error_on_entry() {
    let mut r = Runtime::default();
    assert!(!r.enter("PRINT (1"));
    assert!(exec(&mut r).starts_with("?SYNTAX ERROR"));
    assert!(!r.enter("10 PRINT (1"));
    assert!(exec(&mut r).starts_with("?SYNTAX ERROR IN 10"));
}

#[test]
fn test_whole_real_results_are_integers() {
    let mut r = program(&["10 A = 0.5 * 60", "20 GOTO A", "30 PRINT \"OK\"", "RUN"]);
    assert_eq!(exec(&mut r), "OK\n");
    r.enter("A = 0.5 + 0.5: B = ABS(-2.5) - 0.5");
    exec(&mut r);
    r.enter("STAT");
    assert_eq!(
        exec(&mut r),
        "PROGRAM LINES: 3\na = 1 (INTEGER)\nb = 2 (INTEGER)\n"
    );
}
