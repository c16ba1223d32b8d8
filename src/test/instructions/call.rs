use super::*;

#[test]
fn return_resumes_after_the_call() {
    program_exits!(
        [
            inst!(CALL, Operand::label("sub")),
            inst!(WRITE, Operand::string("2")),
            inst!(EXIT, Operand::int(0)),
            inst!(LABEL, Operand::label("sub")),
            inst!(WRITE, Operand::string("1")),
            inst!(RETURN)
        ],
        0,
        "12"
    );
}

#[test]
fn calls_nest() {
    program_exits!(
        [
            inst!(CALL, Operand::label("outer")),
            inst!(WRITE, Operand::string("c")),
            inst!(EXIT, Operand::int(0)),
            inst!(LABEL, Operand::label("outer")),
            inst!(CALL, Operand::label("inner")),
            inst!(WRITE, Operand::string("b")),
            inst!(RETURN),
            inst!(LABEL, Operand::label("inner")),
            inst!(WRITE, Operand::string("a")),
            inst!(RETURN)
        ],
        0,
        "abc"
    );
}

#[test]
fn call_to_undefined_label_is_semantic() {
    program_faults!([inst!(CALL, Operand::label("nowhere"))], 52);
}

#[test]
fn return_without_call_is_value_missing() {
    program_faults!([inst!(RETURN)], 56);
}

#[test]
fn call_argument_must_be_a_label() {
    program_faults!([inst!(CALL, Operand::int(3))], 53);
}
