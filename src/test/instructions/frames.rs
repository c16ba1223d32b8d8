use super::*;

#[test]
fn pushframe_moves_tf_to_lf() {
    program_writes!(
        [
            inst!(CREATEFRAME),
            inst!(DEFVAR, tf("x")),
            inst!(MOVE, tf("x"), Operand::int(7)),
            inst!(PUSHFRAME),
            inst!(WRITE, lf("x"))
        ],
        "7"
    );
}

#[test]
fn pushframe_without_createframe_is_frame_missing() {
    program_faults!([inst!(PUSHFRAME)], 55);
}

#[test]
fn pushframe_consumes_the_temporary_frame() {
    program_faults!(
        [inst!(CREATEFRAME), inst!(PUSHFRAME), inst!(PUSHFRAME)],
        55
    );
}

#[test]
fn popframe_restores_the_frame_into_tf() {
    program_writes!(
        [
            inst!(CREATEFRAME),
            inst!(DEFVAR, tf("x")),
            inst!(MOVE, tf("x"), Operand::string("back")),
            inst!(PUSHFRAME),
            inst!(POPFRAME),
            inst!(WRITE, tf("x"))
        ],
        "back"
    );
}

#[test]
fn popframe_with_empty_stack_is_frame_missing() {
    program_faults!([inst!(POPFRAME)], 55);
}

#[test]
fn createframe_discards_the_previous_temporary_frame() {
    program_faults!(
        [
            inst!(CREATEFRAME),
            inst!(DEFVAR, tf("x")),
            inst!(CREATEFRAME),
            inst!(WRITE, tf("x"))
        ],
        54
    );
}

#[test]
fn lf_is_the_topmost_local_frame() {
    program_writes!(
        [
            inst!(CREATEFRAME),
            inst!(DEFVAR, tf("x")),
            inst!(MOVE, tf("x"), Operand::string("outer")),
            inst!(PUSHFRAME),
            inst!(CREATEFRAME),
            inst!(DEFVAR, tf("x")),
            inst!(MOVE, tf("x"), Operand::string("inner")),
            inst!(PUSHFRAME),
            inst!(WRITE, lf("x")),
            inst!(POPFRAME),
            inst!(WRITE, lf("x"))
        ],
        "innerouter"
    );
}
