use crate::{
    ast::types::{Type, ALL_TYPES},
    errors::errors::{Error, Stage},
    lexer::lexer::Scanner,
    parser::parser::parse,
};

use super::{
    type_checker::check,
    typed_ast::{CheckedProgram, TypedExpr, TypedExprKind, TypedStatement},
};

fn check_source(source: &str) -> Result<CheckedProgram, Error> {
    let program = parse(Scanner::new(source)).unwrap_or_else(|e| panic!("parse failed: {e}"));
    check(&program)
}

fn check_ok(source: &str) -> CheckedProgram {
    check_source(source).unwrap_or_else(|e| panic!("check failed: {e}"))
}

fn error_name(source: &str) -> String {
    let error = check_source(source).unwrap_err();
    assert_eq!(error.stage(), Stage::Semantic);
    error.error_name().to_string()
}

/// The type of the expression in the program's final return statement.
fn returned(program: &CheckedProgram) -> &TypedExpr {
    match program.block.statements.last().unwrap() {
        TypedStatement::Return { value } => value,
        other => panic!("expected a return statement, got {other:?}"),
    }
}

#[test]
fn assignment_compatibility_is_the_pinned_table() {
    use Type::*;
    let allowed = |target: Type, rhs: Type| match target {
        Image => matches!(rhs, Image | Pixel | String),
        Pixel => matches!(rhs, Pixel | Int),
        Int => matches!(rhs, Int | Pixel),
        String => matches!(rhs, String | Int | Pixel | Image),
        Void => false,
    };
    for target in ALL_TYPES {
        for rhs in ALL_TYPES {
            assert_eq!(
                Type::assignment_compatible(target, rhs),
                allowed(target, rhs),
                "mismatch for {target} <- {rhs}"
            );
        }
    }
}

#[test]
fn checks_minimal_program() {
    let program = check_ok("int f() { : 1. }");
    assert_eq!(program.return_type, Type::Int);
    assert_eq!(returned(&program).ty, Type::Int);
}

#[test]
fn image_parameter_returned_unchanged() {
    let program = check_ok("image f(image im) { : im. }");
    assert_eq!(returned(&program).ty, Type::Image);
    assert_eq!(program.params[0].java_name, "im");
}

#[test]
fn int_flows_into_pixel_and_back() {
    check_ok("int f(pixel pp) { pixel qq = 3. int nn = pp. : nn. }");
}

#[test]
fn string_accepts_cross_typed_initializers() {
    check_ok("string f(image im, pixel pp) { string ss = 7. ss = im. ss = pp. : ss. }");
}

#[test]
fn image_needs_size() {
    assert_eq!(error_name("void f() { image im. }"), "ImageWithoutSize");
    check_ok("void f() { image[8, 8] im. }");
    check_ok("void f() { image im = \"u\". }");
    check_ok("void f(image src) { image im = src. }");
}

#[test]
fn pixel_initializer_still_needs_dimension() {
    assert_eq!(
        error_name("void f(pixel pp) { image im = pp. }"),
        "ImageWithoutSize"
    );
    check_ok("void f(pixel pp) { image[4, 4] im = pp. }");
}

#[test]
fn dimension_only_on_images() {
    assert_eq!(
        error_name("void f() { pixel[2, 2] pp. }"),
        "DimensionOnNonImage"
    );
}

#[test]
fn rejects_redeclaration_in_same_scope() {
    assert_eq!(error_name("void f() { int nn. int nn. }"), "AlreadyDeclared");
    assert_eq!(error_name("void f(int nn, int nn) { }"), "AlreadyDeclared");
}

#[test]
fn rejects_undeclared_and_void_variables() {
    assert_eq!(error_name("int f() { : nn. }"), "UndeclaredIdentifier");
    assert_eq!(error_name("void f() { nn = 1. }"), "UndeclaredIdentifier");
    assert_eq!(error_name("void f() { void vv. }"), "VoidVariable");
    assert_eq!(error_name("void f(void vv) { }"), "VoidVariable");
}

#[test]
fn shadowed_locals_get_serial_suffixed_names() {
    let program = check_ok("int f() { int nn = 1. while nn { int nn = 2. nn = 3. }. : nn. }");

    let TypedStatement::While { body, .. } = &program.block.statements[0] else {
        panic!("expected while");
    };
    assert_eq!(body.declarations[0].name_def.java_name, "nn_1");
    let TypedStatement::Assign { lvalue, .. } = &body.statements[0] else {
        panic!("expected assignment");
    };
    assert_eq!(lvalue.java_name, "nn_1");

    // The outer name is untouched.
    match &returned(&program).kind {
        TypedExprKind::Ident { java_name } => assert_eq!(java_name, "nn"),
        other => panic!("expected ident, got {other:?}"),
    }
}

#[test]
fn sibling_loop_scopes_get_distinct_serials() {
    let program = check_ok(
        "void f() { while 1 { int nn = 1. }. while 1 { int nn = 2. }. }",
    );
    let serial = |stmt: &TypedStatement| match stmt {
        TypedStatement::While { body, .. } => body.declarations[0].name_def.java_name.clone(),
        other => panic!("expected while, got {other:?}"),
    };
    assert_eq!(serial(&program.block.statements[0]), "nn_1");
    assert_eq!(serial(&program.block.statements[1]), "nn_2");
}

#[test]
fn loop_body_cannot_leak_declarations() {
    assert_eq!(
        error_name("int f() { while 1 { int nn = 1. }. : nn. }"),
        "UndeclaredIdentifier"
    );
}

#[test]
fn guard_is_checked_before_the_body() {
    // The body would fail with an undeclared identifier, but the non-int
    // guard is reported first.
    assert_eq!(
        error_name("void f(string ss) { while ss { zz = 1. }. }"),
        "GuardNotInt"
    );
}

#[test]
fn conditional_typing() {
    let program = check_ok("int f() { : if 1 ? 2 ? 3. }");
    assert_eq!(returned(&program).ty, Type::Int);
    assert_eq!(
        error_name("int f(string ss) { : if ss ? 1 ? 2. }"),
        "GuardNotInt"
    );
    assert_eq!(
        error_name("int f(string ss) { : if 1 ? 2 ? ss. }"),
        "ConditionalArmMismatch"
    );
}

#[test]
fn unary_operator_typing() {
    let program = check_ok("pixel f(pixel pp) { : !pp. }");
    assert_eq!(returned(&program).ty, Type::Pixel);
    let program = check_ok("int f() { : - sin 3. }");
    assert_eq!(returned(&program).ty, Type::Int);
    assert_eq!(
        error_name("void f(string ss) { : -ss. }"),
        "InvalidUnaryOperand"
    );
    assert_eq!(
        error_name("image f(image im) { : sin im. }"),
        "InvalidUnaryOperand"
    );
}

#[test]
fn postfix_selector_typing() {
    assert_eq!(
        returned(&check_ok("pixel f(image im) { : im[1, 2]. }")).ty,
        Type::Pixel
    );
    assert_eq!(
        returned(&check_ok("image f(image im) { : im:red. }")).ty,
        Type::Image
    );
    assert_eq!(
        returned(&check_ok("int f(image im) { : im[1, 2]:grn. }")).ty,
        Type::Int
    );
    assert_eq!(
        returned(&check_ok("int f(pixel pp) { : pp:blu. }")).ty,
        Type::Int
    );
    assert_eq!(
        error_name("int f(int nn) { : nn:red. }"),
        "InvalidSelector"
    );
    assert_eq!(
        error_name("int f(pixel pp) { : pp[1, 2]. }"),
        "InvalidSelector"
    );
}

#[test]
fn selector_components_must_be_int() {
    assert_eq!(
        error_name("pixel f(image im, string ss) { : im[ss, 2]. }"),
        "ComponentNotInt"
    );
    assert_eq!(
        error_name("void f(string ss) { image[ss, 4] im. }"),
        "ComponentNotInt"
    );
    assert_eq!(
        error_name("pixel f(string ss) { : [1, ss, 3]. }"),
        "ComponentNotInt"
    );
}

#[test]
fn lvalue_selector_components_are_coordinate_binders() {
    check_ok("void f(image im, int ww) { image[ww, ww] oo. oo[x, y] = im[x, y]. }");
    assert_eq!(
        error_name("void f(image im) { im[1, 2] = 0. }"),
        "SelectorComponentNotVar"
    );
}

#[test]
fn lvalue_selector_binders_must_be_distinct() {
    assert_eq!(
        error_name("void f(image im) { im[x, x] = 0. }"),
        "SelectorComponentNotVar"
    );
    assert_eq!(
        error_name("void f(image im) { im[y, y]:red = 0. }"),
        "SelectorComponentNotVar"
    );
}

#[test]
fn channel_only_image_target_takes_only_images() {
    check_ok("void f(image im, image src) { im:red = src. }");
    assert_eq!(
        error_name("void f(image im, pixel pp) { im:red = pp. }"),
        "NotAssignmentCompatible"
    );
    assert_eq!(
        error_name("void f(image im, string ss) { im:grn = ss. }"),
        "NotAssignmentCompatible"
    );
}

#[test]
fn lvalue_selector_combinations() {
    check_ok("void f(image im) { im[x, y]:red = Z. }");
    check_ok("void f(pixel pp) { pp:grn = 7. }");
    assert_eq!(
        error_name("void f(int nn) { nn:red = 1. }"),
        "InvalidSelector"
    );
}

#[test]
fn binary_operator_table() {
    assert_eq!(
        returned(&check_ok("pixel f(pixel pp, pixel qq) { : pp & qq. }")).ty,
        Type::Pixel
    );
    assert_eq!(
        returned(&check_ok("image f(image im) { : im * 2. }")).ty,
        Type::Image
    );
    assert_eq!(
        returned(&check_ok("string f(string ss) { : ss + ss. }")).ty,
        Type::String
    );
    assert_eq!(
        returned(&check_ok("pixel f(pixel pp) { : pp ** 2. }")).ty,
        Type::Pixel
    );
    assert_eq!(
        returned(&check_ok("int f(string ss) { : ss == ss. }")).ty,
        Type::Int
    );
    assert_eq!(error_name("int f() { : 1 & 2. }"), "IncompatibleOperands");
    assert_eq!(
        error_name("int f(string ss) { : ss - ss. }"),
        "IncompatibleOperands"
    );
    assert_eq!(
        error_name("int f(pixel pp) { : 1 + pp. }"),
        "IncompatibleOperands"
    );
    assert_eq!(
        error_name("int f(pixel pp) { : pp < pp. }"),
        "IncompatibleOperands"
    );
}

#[test]
fn pixel_functions_and_coordinates_are_int() {
    let program = check_ok("int f() { : x_cart[a, r] + r_polar[x, y]. }");
    assert_eq!(returned(&program).ty, Type::Int);
}

#[test]
fn return_type_uses_assignment_compatibility() {
    check_ok("string f() { : 3. }");
    check_ok("pixel f() { : 3. }");
    assert_eq!(
        error_name("int f(string ss) { : ss. }"),
        "ReturnTypeMismatch"
    );
    assert_eq!(error_name("void f() { : 1. }"), "ReturnTypeMismatch");
}

#[test]
fn declaration_cannot_reference_itself() {
    assert_eq!(
        error_name("void f() { int nn = nn. }"),
        "UndeclaredIdentifier"
    );
}
