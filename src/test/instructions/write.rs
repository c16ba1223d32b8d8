use super::*;

#[test]
fn appends_payloads_without_separators() {
    program_writes!(
        [
            inst!(WRITE, Operand::int(1)),
            inst!(WRITE, Operand::string("x")),
            inst!(WRITE, Operand::int(-2))
        ],
        "1x-2"
    );
}

#[test]
fn booleans_print_lowercase() {
    program_writes!(
        [
            inst!(WRITE, Operand::boolean(true)),
            inst!(WRITE, Operand::boolean(false))
        ],
        "truefalse"
    );
}

#[test]
fn nil_prints_as_the_empty_string() {
    program_writes!(
        [
            inst!(WRITE, Operand::string("[")),
            inst!(WRITE, Operand::nil()),
            inst!(WRITE, Operand::string("]"))
        ],
        "[]"
    );
}

#[test]
fn the_string_nil_still_prints() {
    program_writes!([inst!(WRITE, Operand::string("nil"))], "nil");
}

#[test]
fn escapes_are_decoded() {
    program_writes!(
        [inst!(WRITE, Operand::string("a\\010b\\035c"))],
        "a\nb#c"
    );
}

#[test]
fn malformed_escape_is_a_string_fault() {
    program_faults!([inst!(WRITE, Operand::string("bad\\1x"))], 58);
}

#[test]
fn floats_print_in_hex_notation() {
    program_writes!([inst!(WRITE, Operand::float("1.5"))], "0x1.8000000000000p+0");
}

#[test]
fn unset_operand_is_value_missing() {
    program_faults!([inst!(DEFVAR, gf("x")), inst!(WRITE, gf("x"))], 56);
}
