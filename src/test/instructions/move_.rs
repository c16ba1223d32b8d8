use super::*;
use matches::assert_matches;

#[test]
fn literal_into_variable() {
    program_writes!(
        [
            inst!(DEFVAR, gf("x")),
            inst!(MOVE, gf("x"), Operand::int(42)),
            inst!(WRITE, gf("x"))
        ],
        "42"
    );
}

#[test]
fn variable_into_variable() {
    program_writes!(
        [
            inst!(DEFVAR, gf("a")),
            inst!(MOVE, gf("a"), Operand::boolean(true)),
            inst!(DEFVAR, gf("b")),
            inst!(MOVE, gf("b"), gf("a")),
            inst!(WRITE, gf("b"))
        ],
        "true"
    );
}

#[test]
fn unset_source_is_value_missing() {
    program_faults!(
        [
            inst!(DEFVAR, gf("a")),
            inst!(DEFVAR, gf("b")),
            inst!(MOVE, gf("b"), gf("a"))
        ],
        56
    );
}

#[test]
fn undeclared_target_is_variable_missing() {
    program_faults!([inst!(MOVE, gf("x"), Operand::int(1))], 54);
}

#[test]
fn undeclared_source_is_variable_missing() {
    program_faults!(
        [inst!(DEFVAR, gf("x")), inst!(MOVE, gf("x"), gf("missing"))],
        54
    );
}

#[test]
fn target_in_absent_temporary_frame_is_frame_missing() {
    program_faults!([inst!(MOVE, tf("x"), Operand::int(1))], 55);
}

#[test]
fn first_argument_must_be_a_variable() {
    program_faults!([inst!(MOVE, Operand::int(1), Operand::int(2))], 53);
}

#[test]
fn malformed_int_literal_faults_at_resolution() {
    let (result, _) = run(
        vec![
            inst!(DEFVAR, gf("x")),
            inst!(MOVE, gf("x"), Operand::Literal {
                kind: LiteralKind::Int,
                text: "abc".to_string(),
            }),
        ],
        "",
    );
    assert_matches!(result, Err(Fault::BadLiteral { .. }));
}

#[test]
fn unexecuted_malformed_literal_never_faults() {
    program_exits!(
        [
            inst!(EXIT, Operand::int(0)),
            inst!(MOVE, gf("x"), Operand::Literal {
                kind: LiteralKind::Int,
                text: "abc".to_string(),
            })
        ],
        0,
        ""
    );
}
