use super::*;

#[test]
fn orders_integers() {
    program_writes!(
        [
            inst!(DEFVAR, gf("r")),
            inst!(LT, gf("r"), Operand::int(-3), Operand::int(2)),
            inst!(WRITE, gf("r")),
            inst!(LT, gf("r"), Operand::int(2), Operand::int(2)),
            inst!(WRITE, gf("r"))
        ],
        "truefalse"
    );
}

#[test]
fn orders_strings_by_codepoint() {
    program_writes!(
        [
            inst!(DEFVAR, gf("r")),
            inst!(LT, gf("r"), Operand::string("abc"), Operand::string("abd")),
            inst!(WRITE, gf("r")),
            inst!(LT, gf("r"), Operand::string("b"), Operand::string("aaa")),
            inst!(WRITE, gf("r"))
        ],
        "truefalse"
    );
}

#[test]
fn escapes_are_decoded_before_comparison() {
    // \065 is "A", which precedes "B".
    program_writes!(
        [
            inst!(DEFVAR, gf("r")),
            inst!(LT, gf("r"), Operand::string("\\065"), Operand::string("B")),
            inst!(WRITE, gf("r"))
        ],
        "true"
    );
}

#[test]
fn false_is_less_than_true() {
    program_writes!(
        [
            inst!(DEFVAR, gf("r")),
            inst!(LT, gf("r"), Operand::boolean(false), Operand::boolean(true)),
            inst!(WRITE, gf("r"))
        ],
        "true"
    );
}

#[test]
fn nil_operand_is_bad_type() {
    program_faults!(
        [
            inst!(DEFVAR, gf("r")),
            inst!(LT, gf("r"), Operand::nil(), Operand::nil())
        ],
        53
    );
}

#[test]
fn mixed_types_are_bad_type() {
    program_faults!(
        [
            inst!(DEFVAR, gf("r")),
            inst!(LT, gf("r"), Operand::int(1), Operand::string("1"))
        ],
        53
    );
}
