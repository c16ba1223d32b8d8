use super::*;

#[test]
fn reads_one_line_per_call() {
    program_writes!(
        [
            inst!(DEFVAR, gf("a")),
            inst!(DEFVAR, gf("b")),
            inst!(READ, gf("a"), Operand::type_name("string")),
            inst!(READ, gf("b"), Operand::type_name("string")),
            inst!(WRITE, gf("b")),
            inst!(WRITE, gf("a"))
        ],
        "first\nsecond\n",
        "secondfirst"
    );
}

#[test]
fn parses_ints_with_surrounding_whitespace() {
    program_writes!(
        [
            inst!(DEFVAR, gf("n")),
            inst!(READ, gf("n"), Operand::type_name("int")),
            inst!(WRITE, gf("n"))
        ],
        "  -42  \n",
        "-42"
    );
}

#[test]
fn unparsable_int_becomes_nil() {
    program_writes!(
        [
            inst!(DEFVAR, gf("n")),
            inst!(DEFVAR, gf("t")),
            inst!(READ, gf("n"), Operand::type_name("int")),
            inst!(TYPE, gf("t"), gf("n")),
            inst!(WRITE, gf("t"))
        ],
        "not a number\n",
        "nil"
    );
}

#[test]
fn bool_parsing_is_case_insensitive_and_total() {
    program_writes!(
        [
            inst!(DEFVAR, gf("b")),
            inst!(READ, gf("b"), Operand::type_name("bool")),
            inst!(WRITE, gf("b")),
            inst!(READ, gf("b"), Operand::type_name("bool")),
            inst!(WRITE, gf("b")),
            inst!(READ, gf("b"), Operand::type_name("bool")),
            inst!(WRITE, gf("b"))
        ],
        "TRUE\ntrue\nanything\n",
        "truetruefalse"
    );
}

#[test]
fn past_end_of_stream_yields_nil() {
    program_writes!(
        [
            inst!(DEFVAR, gf("x")),
            inst!(DEFVAR, gf("t")),
            inst!(READ, gf("x"), Operand::type_name("string")),
            inst!(READ, gf("x"), Operand::type_name("string")),
            inst!(READ, gf("x"), Operand::type_name("int")),
            inst!(TYPE, gf("t"), gf("x")),
            inst!(WRITE, gf("t"))
        ],
        "only",
        "nil"
    );
}

#[test]
fn trailing_newline_frames_a_final_empty_line() {
    // "x\n" holds the line "x" and one empty line; the empty line is a
    // string, only the third read runs off the stream.
    program_writes!(
        [
            inst!(DEFVAR, gf("x")),
            inst!(DEFVAR, gf("t")),
            inst!(READ, gf("x"), Operand::type_name("string")),
            inst!(READ, gf("x"), Operand::type_name("string")),
            inst!(TYPE, gf("t"), gf("x")),
            inst!(WRITE, gf("t")),
            inst!(READ, gf("x"), Operand::type_name("string")),
            inst!(TYPE, gf("t"), gf("x")),
            inst!(WRITE, gf("t"))
        ],
        "x\n",
        "stringnil"
    );
}

#[test]
fn unknown_requested_type_yields_nil() {
    program_writes!(
        [
            inst!(DEFVAR, gf("x")),
            inst!(DEFVAR, gf("t")),
            inst!(READ, gf("x"), Operand::type_name("float")),
            inst!(TYPE, gf("t"), gf("x")),
            inst!(WRITE, gf("t"))
        ],
        "1.5\n",
        "nil"
    );
}

#[test]
fn second_argument_must_be_a_type_operand() {
    program_faults!(
        [inst!(DEFVAR, gf("x")), inst!(READ, gf("x"), Operand::string("int"))],
        "1\n",
        53
    );
}
