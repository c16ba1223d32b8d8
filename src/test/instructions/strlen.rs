use super::*;

#[test]
fn counts_codepoints() {
    program_writes!(
        [
            inst!(DEFVAR, gf("n")),
            inst!(STRLEN, gf("n"), Operand::string("hello")),
            inst!(WRITE, gf("n")),
            inst!(STRLEN, gf("n"), Operand::string("čau")),
            inst!(WRITE, gf("n"))
        ],
        "53"
    );
}

#[test]
fn empty_string_has_length_zero() {
    program_writes!(
        [
            inst!(DEFVAR, gf("n")),
            inst!(STRLEN, gf("n"), Operand::string("")),
            inst!(WRITE, gf("n"))
        ],
        "0"
    );
}

#[test]
fn escapes_count_as_one_codepoint() {
    program_writes!(
        [
            inst!(DEFVAR, gf("n")),
            inst!(STRLEN, gf("n"), Operand::string("a\\032b")),
            inst!(WRITE, gf("n"))
        ],
        "3"
    );
}

#[test]
fn non_string_operand_is_bad_type() {
    program_faults!([inst!(DEFVAR, gf("n")), inst!(STRLEN, gf("n"), Operand::int(5))], 53);
}
