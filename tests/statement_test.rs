mod common;
use common::*;
use kbasic::mach::Runtime;

#[test]
fn test_for_loop() {
    let mut r = program(&["10 FOR I = 1 TO 3", "20 PRINT I", "30 NEXT I", "RUN"]);
    assert_eq!(exec(&mut r), "1\n2\n3\n");
}

#[test]
fn test_for_step() {
    let mut r = Runtime::default();
    r.enter("FOR I = 3 TO 1 STEP -1: PRINT I;: NEXT");
    assert_eq!(exec(&mut r), "321");
    r.enter("FOR X = 0 TO 1 STEP 0.5: PRINT X: NEXT X");
    assert_eq!(exec(&mut r), "0\n0.5\n1\n");
}

#[test]
fn test_for_runs_once() {
    let mut r = Runtime::default();
    r.enter("FOR I = 1 TO 0: PRINT I: NEXT: PRINT I");
    assert_eq!(exec(&mut r), "1\n2\n");
}

#[test]
fn test_nested_for() {
    let mut r = program(&[
        "10 FOR Y = 1 TO 2",
        "20 FOR X = 1 TO 2",
        "30 PRINT Y * 10 + X;",
        "40 NEXT X",
        "50 NEXT Y",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "11122122");
}

#[test]
fn test_breaking_out_of_for_loop_with_goto() {
    let mut r = program(&[
        "10 FOR Y = 1 TO 2",
        "20 FOR X = 1 TO 9",
        "30 PRINT X;",
        "40 GOTO 60",
        "50 NEXT X",
        "60 NEXT Y",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "11");
}

#[test]
fn test_next_without_for() {
    let mut r = program(&["10 NEXT", "RUN"]);
    assert_eq!(exec(&mut r), "?NEXT WITHOUT FOR IN 10\n");
    let mut r = program(&["10 FOR I = 1 TO 2", "20 NEXT J", "RUN"]);
    assert_eq!(exec(&mut r), "?NEXT WITHOUT FOR IN 20; J\n");
}

#[test]
fn test_gosub_return() {
    let mut r = program(&[
        "10 GOSUB 100",
        "20 PRINT \"BACK\"",
        "30 END",
        "100 PRINT \"SUB\"",
        "110 RETURN",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "SUB\nBACK\n");
}

#[test]
fn test_gosub_resumes_mid_line() {
    let mut r = program(&["10 GOSUB 100: PRINT \"B\"", "20 END", "100 PRINT \"A\";: RETURN", "RUN"]);
    assert_eq!(exec(&mut r), "AB\n");
}

#[test]
fn test_return_without_gosub() {
    let mut r = Runtime::default();
    r.enter("RETURN");
    assert_eq!(exec(&mut r), "?RETURN WITHOUT GOSUB\n");
}

#[test]
fn test_goto_undefined_line() {
    let mut r = program(&["10 GOTO 100", "RUN"]);
    assert_eq!(exec(&mut r), "?UNDEFINED LINE IN 10; BRANCH TO 100\n");
}

#[test]
fn test_end_stops() {
    let mut r = program(&["10 PRINT 1", "20 END", "30 PRINT 2", "RUN"]);
    assert_eq!(exec(&mut r), "1\n");
}

#[test]
fn test_data_read() {
    let mut r = program(&[
        "10 DATA 1, 2, 3",
        "20 READ A, B, C",
        "30 PRINT A + B + C",
        "40 READ D",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "6\n?OUT OF DATA IN 40\n");
}

#[test]
fn test_data_kinds() {
    let mut r = program(&[
        "10 READ A$, B$, C",
        "20 PRINT A$; B$; C",
        "30 DATA HELLO, \"WORLD\", -2",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "HELLOWORLD-2\n");
}

#[test]
fn test_restore() {
    let mut r = program(&["10 DATA 5", "20 READ A", "30 RESTORE", "40 READ B", "50 PRINT A + B", "RUN"]);
    assert_eq!(exec(&mut r), "10\n");
}

#[test]
fn test_read_type_mismatch() {
    let mut r = program(&["10 DATA \"X\"", "20 READ A", "RUN"]);
    assert_eq!(exec(&mut r), "?TYPE MISMATCH IN 20\n");
}

#[test]
fn test_type_mismatch_keeps_value() {
    let mut r = program(&["10 A$ = \"OK\"", "20 LET A$ = 5", "RUN"]);
    assert_eq!(exec(&mut r), "?TYPE MISMATCH IN 20\n");
    r.enter("PRINT A$");
    assert_eq!(exec(&mut r), "OK\n");
}

#[test]
fn test_if_then() {
    let mut r = Runtime::default();
    r.enter("if 1 then ? \"one\"");
    assert_eq!(exec(&mut r), "one\n");
}

#[test]
fn test_if_then_else() {
    let mut r = Runtime::default();
    r.enter("if 0 then ? \"one\" else ? \"two\";:?2");
    assert_eq!(exec(&mut r), "two2\n");
    r.enter("if 1 then ? \"one\" else ? \"two\":?2");
    assert_eq!(exec(&mut r), "one\n");
}

#[test]
fn test_if_false_skips_chain() {
    let mut r = Runtime::default();
    r.enter("if 0 then ? \"one\";:?2");
    assert_eq!(exec(&mut r), "");
    r.enter("A = 1: if A = 2 then A = 3: A = 4");
    assert_eq!(exec(&mut r), "");
    r.enter("? A");
    assert_eq!(exec(&mut r), "1\n");
}

#[test]
fn test_return_keeps_if_state() {
    let mut r = program(&[
        "10 IF 1 THEN GOSUB 100: ELSE PRINT \"E\": PRINT \"C\"",
        "20 IF 0 THEN PRINT \"X\" ELSE GOSUB 100: PRINT \"F\"",
        "30 END",
        "100 PRINT \"S\"",
        "110 RETURN",
        "RUN",
    ]);
    assert_eq!(exec(&mut r), "S\nS\nF\n");
}

#[test]
fn test_next_keeps_if_state() {
    let mut r = Runtime::default();
    r.enter("IF 1 THEN FOR I = 1 TO 2: PRINT I: NEXT: ELSE PRINT \"E\": PRINT \"C\"");
    assert_eq!(exec(&mut r), "1\n2\n");
}

#[test]
fn test_if_state_resets_per_line() {
    let mut r = program(&["10 IF 0 THEN PRINT \"A\"", "20 PRINT \"B\"", "RUN"]);
    assert_eq!(exec(&mut r), "B\n");
}

#[test]
fn test_if_then_line_number() {
    let mut r = program(&["10 IF 1 THEN 30", "20 PRINT \"NO\"", "30 PRINT \"YES\"", "RUN"]);
    assert_eq!(exec(&mut r), "YES\n");
    let mut r = program(&["10 IF 0 GOTO 30 ELSE 40", "30 PRINT \"NO\"", "40 PRINT \"YES\"", "RUN"]);
    assert_eq!(exec(&mut r), "YES\n");
}

#[test]
fn test_if_strings() {
    let mut r = Runtime::default();
    r.enter("IF \"A\" < \"B\" AND \"C\" = \"C\" THEN PRINT \"LESS\"");
    assert_eq!(exec(&mut r), "LESS\n");
}

#[test]
fn test_print_separators() {
    let mut r = Runtime::default();
    r.enter("PRINT 1;2");
    assert_eq!(exec(&mut r), "12\n");
    r.enter("PRINT \"A\",\"B\"");
    assert_eq!(exec(&mut r), "A         B\n");
    r.enter("PRINT \"A\";");
    assert_eq!(exec(&mut r), "A");
    r.enter("PRINT");
    assert_eq!(exec(&mut r), "\n");
}

#[test]
fn test_print_using() {
    let mut r = Runtime::default();
    r.enter("PRINT USING \"$###.##\"; 12.5");
    assert_eq!(exec(&mut r), "$ 12.50\n");
    r.enter("F$ = \"#,###\": PRINT USING F$; 1234");
    assert_eq!(exec(&mut r), "1,234\n");
}

#[test]
fn test_print_at() {
    let mut r = Runtime::default();
    r.enter("PRINT @ 70, \"HI\"");
    assert_eq!(exec(&mut r), "\n      HI\n");
}

#[test]
fn test_tab() {
    let mut r = Runtime::default();
    r.enter("PRINT \"A\"; TAB(5); \"B\"");
    assert_eq!(exec(&mut r), "A    B\n");
}

#[test]
fn test_arrays() {
    let mut r = Runtime::default();
    r.enter("DIM A(10): A(1) = 5: A(2) = 7: PRINT A(1) + A(2); A(3)");
    assert_eq!(exec(&mut r), "120\n");
    r.enter("N$(1, 2) = \"X\": PRINT N$(1, 2); N$(2, 1); \"!\"");
    assert_eq!(exec(&mut r), "X!\n");
}

#[test]
fn test_clear() {
    let mut r = Runtime::default();
    r.enter("A = 5: CLEAR: PRINT A");
    assert_eq!(exec(&mut r), "0\n");
}

#[test]
fn test_variables_survive_run() {
    let mut r = program(&["10 PRINT A", "A = 9"]);
    assert_eq!(exec(&mut r), "");
    r.enter("RUN");
    assert_eq!(exec(&mut r), "9\n");
}

#[test]
fn test_cls() {
    let mut r = Runtime::default();
    r.enter("PRINT \"GONE\": CLS: PRINT \"HERE\"");
    assert_eq!(exec(&mut r), "HERE\n");
}
