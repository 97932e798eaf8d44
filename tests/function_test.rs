mod common;
use common::*;
use kbasic::mach::Runtime;

fn eval(s: &str) -> String {
    let mut r = Runtime::default();
    r.enter(&format!("PRINT {}", s));
    exec(&mut r)
}

#[test]
fn test_string_functions() {
    assert_eq!(eval("LEN(\"HELLO\")"), "5\n");
    assert_eq!(eval("LEFT$(\"HELLO\", 2)"), "HE\n");
    assert_eq!(eval("RIGHT$(\"HELLO\", 3)"), "LLO\n");
    assert_eq!(eval("MID$(\"HELLO\", 2, 3)"), "ELL\n");
    assert_eq!(eval("MID$(\"HELLO\", 4)"), "LO\n");
    assert_eq!(eval("CHR$(65); ASC(\"B\")"), "A66\n");
    assert_eq!(eval("STR$(42) + \"!\""), "42!\n");
    assert_eq!(eval("VAL(\"12\") + 1"), "13\n");
}

#[test]
fn test_numeric_functions() {
    assert_eq!(eval("ABS(-3)"), "3\n");
    assert_eq!(eval("INT(3.7)"), "3\n");
    assert_eq!(eval("INT(-3.7)"), "-3\n");
    assert_eq!(eval("SQR(16)"), "4\n");
    assert_eq!(eval("SQR(-1)"), "?ILLEGAL FUNCTION CALL\n");
}

#[test]
fn test_rnd() {
    let mut r = program(&[
        "10 FOR I = 1 TO 50",
        "20 X = RND(6): IF X < 1 OR X > 6 THEN PRINT X",
        "30 NEXT I",
        "40 X = RND(0): IF X >= 0 AND X < 1 THEN PRINT \"OK\"",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "OK\n");
}

#[test]
fn test_inkey() {
    let mut r = Runtime::default();
    r.enter("K$ = INKEY$: PRINT \"[\"; K$; \"]\"");
    assert_eq!(exec(&mut r), "[]\n");
}

#[test]
fn test_function_type_mismatch() {
    assert_eq!(eval("LEN(5)"), "?TYPE MISMATCH\n");
    assert_eq!(eval("ABS(\"X\")"), "?TYPE MISMATCH\n");
}
