use crate::{
    ast::{
        ast::{Channel, Program, Statement},
        expressions::{BinaryOp, Expr, ExprKind, PixelFunc, PredeclaredVar, UnaryOp},
        types::Type,
    },
    errors::errors::{Error, Stage},
    lexer::lexer::Scanner,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    parse(Scanner::new(source))
}

fn parse_ok(source: &str) -> Program {
    parse_source(source).unwrap_or_else(|e| panic!("parse failed: {e}"))
}

/// Wraps the expression in a minimal program and pulls it back out of the
/// return statement.
fn parse_expression(source: &str) -> Expr {
    let program = parse_ok(&format!("int f() {{ : {source}. }}"));
    match program.block.statements.into_iter().next().unwrap() {
        Statement::Return(ret) => ret.value,
        other => panic!("expected a return statement, got {other:?}"),
    }
}

fn binary_parts(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => (*op, left, right),
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

fn assert_num(expr: &Expr, value: i32) {
    match &expr.kind {
        ExprKind::NumLit(n) => assert_eq!(*n, value),
        other => panic!("expected NumLit({value}), got {other:?}"),
    }
}

#[test]
fn parses_minimal_program() {
    let program = parse_ok("int f() { : 1. }");
    assert_eq!(program.return_type, Type::Int);
    assert_eq!(program.name, "f");
    assert!(program.params.is_empty());
    assert!(program.block.declarations.is_empty());
    assert_eq!(program.block.statements.len(), 1);
    assert!(matches!(program.block.statements[0], Statement::Return(_)));
}

#[test]
fn parses_parameter_list() {
    let program = parse_ok("image f(int aa, string ss, image im) { : im. }");
    assert_eq!(program.params.len(), 3);
    assert_eq!(program.params[0].ty, Type::Int);
    assert_eq!(program.params[0].name, "aa");
    assert_eq!(program.params[1].ty, Type::String);
    assert_eq!(program.params[2].ty, Type::Image);
    assert!(program.params.iter().all(|p| p.dimension.is_none()));
}

#[test]
fn parses_declaration_with_dimension_and_initializer() {
    let program = parse_ok("void f() { image[640, 480] im. int n = 3 + 4. }");
    let decls = &program.block.declarations;
    assert_eq!(decls.len(), 2);

    assert_eq!(decls[0].name_def.ty, Type::Image);
    assert_eq!(decls[0].name_def.name, "im");
    let dim = decls[0].name_def.dimension.as_ref().unwrap();
    assert_num(&dim.width, 640);
    assert_num(&dim.height, 480);
    assert!(decls[0].initializer.is_none());

    assert_eq!(decls[1].name_def.name, "n");
    assert!(decls[1].name_def.dimension.is_none());
    assert!(decls[1].initializer.is_some());
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = parse_expression("1 + 2 * 3");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Plus);
    assert_num(left, 1);
    let (op, left, right) = binary_parts(right);
    assert_eq!(op, BinaryOp::Times);
    assert_num(left, 2);
    assert_num(right, 3);
}

#[test]
fn additive_chain_left_associates() {
    let expr = parse_expression("1 - 2 - 3");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Minus);
    assert_num(right, 3);
    let (op, left, right) = binary_parts(left);
    assert_eq!(op, BinaryOp::Minus);
    assert_num(left, 1);
    assert_num(right, 2);
}

#[test]
fn power_right_associates() {
    let expr = parse_expression("2 ** 3 ** 4");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Exp);
    assert_num(left, 2);
    let (op, left, right) = binary_parts(right);
    assert_eq!(op, BinaryOp::Exp);
    assert_num(left, 3);
    assert_num(right, 4);
}

#[test]
fn comparison_is_looser_than_power() {
    let expr = parse_expression("1 < 2 ** 3");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Lt);
    assert_num(left, 1);
    let (op, _, _) = binary_parts(right);
    assert_eq!(op, BinaryOp::Exp);
}

#[test]
fn parentheses_override_precedence() {
    let expr = parse_expression("(1 + 2) * 3");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Times);
    assert_num(right, 3);
    let (op, _, _) = binary_parts(left);
    assert_eq!(op, BinaryOp::Plus);
}

#[test]
fn unary_operators_nest() {
    let expr = parse_expression("- ! 5");
    match expr.kind {
        ExprKind::Unary { op, operand } => {
            assert_eq!(op, UnaryOp::Minus);
            match operand.kind {
                ExprKind::Unary { op, operand } => {
                    assert_eq!(op, UnaryOp::Bang);
                    assert_num(&operand, 5);
                }
                other => panic!("expected inner unary, got {other:?}"),
            }
        }
        other => panic!("expected unary, got {other:?}"),
    }
}

#[test]
fn parses_conditional() {
    let expr = parse_expression("if gg ? 1 ? 0");
    match expr.kind {
        ExprKind::Conditional {
            guard,
            true_case,
            false_case,
        } => {
            assert!(matches!(guard.kind, ExprKind::Ident(ref n) if n == "gg"));
            assert_num(&true_case, 1);
            assert_num(&false_case, 0);
        }
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn parses_postfix_selectors() {
    let expr = parse_expression("im[1, 2]:red");
    match expr.kind {
        ExprKind::Postfix {
            primary,
            pixel,
            channel,
        } => {
            assert!(matches!(primary.kind, ExprKind::Ident(ref n) if n == "im"));
            let pixel = pixel.unwrap();
            assert_num(&pixel.x, 1);
            assert_num(&pixel.y, 2);
            assert_eq!(channel, Some(Channel::Red));
        }
        other => panic!("expected postfix, got {other:?}"),
    }
}

#[test]
fn bare_primary_is_not_wrapped() {
    let expr = parse_expression("nn");
    assert!(matches!(expr.kind, ExprKind::Ident(ref n) if n == "nn"));
}

#[test]
fn parses_expanded_pixel() {
    let expr = parse_expression("[1, 2, 3]");
    match expr.kind {
        ExprKind::ExpandedPixel { red, grn, blu } => {
            assert_num(&red, 1);
            assert_num(&grn, 2);
            assert_num(&blu, 3);
        }
        other => panic!("expected expanded pixel, got {other:?}"),
    }
}

#[test]
fn parses_pixel_function() {
    let expr = parse_expression("x_cart[aa, rr]");
    match expr.kind {
        ExprKind::PixelFunc { func, selector } => {
            assert_eq!(func, PixelFunc::XCart);
            assert!(matches!(selector.x.kind, ExprKind::Ident(ref n) if n == "aa"));
            assert!(matches!(selector.y.kind, ExprKind::Ident(ref n) if n == "rr"));
        }
        other => panic!("expected pixel function, got {other:?}"),
    }
}

#[test]
fn parses_predeclared_variables_and_constants() {
    assert!(matches!(
        parse_expression("x").kind,
        ExprKind::PredeclaredVar(PredeclaredVar::X)
    ));
    assert!(matches!(
        parse_expression("r").kind,
        ExprKind::PredeclaredVar(PredeclaredVar::R)
    ));
    assert!(matches!(parse_expression("Z").kind, ExprKind::Z));
    assert!(matches!(parse_expression("rand").kind, ExprKind::Rand));
}

#[test]
fn parses_string_literal_value() {
    let expr = parse_expression("\"he said \\\"hi\\\"\\n\"");
    match expr.kind {
        ExprKind::StringLit(s) => assert_eq!(s, "he said \"hi\"\n"),
        other => panic!("expected string literal, got {other:?}"),
    }
}

#[test]
fn parses_all_statement_forms() {
    let program = parse_ok(
        "void f() {\
           int nn = 0.\
           nn = nn + 1.\
           write nn.\
           while nn < 10 { nn = nn + 1. }.\
           : nn.\
         }",
    );
    let stmts = &program.block.statements;
    assert_eq!(stmts.len(), 4);
    assert!(matches!(stmts[0], Statement::Assign(_)));
    assert!(matches!(stmts[1], Statement::Write(_)));
    assert!(matches!(stmts[2], Statement::While(_)));
    assert!(matches!(stmts[3], Statement::Return(_)));
}

#[test]
fn parses_lvalue_with_selectors() {
    let program = parse_ok("void f() { im[3, 4]:blu = 255. }");
    match &program.block.statements[0] {
        Statement::Assign(assign) => {
            assert_eq!(assign.lvalue.name, "im");
            assert!(assign.lvalue.pixel.is_some());
            assert_eq!(assign.lvalue.channel, Some(Channel::Blu));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn while_body_nests_blocks() {
    let program = parse_ok("void f() { while 1 { while 0 { nn = 1. }. }. }");
    match &program.block.statements[0] {
        Statement::While(outer) => {
            assert!(matches!(outer.body.statements[0], Statement::While(_)));
        }
        other => panic!("expected while, got {other:?}"),
    }
}

#[test]
fn rejects_missing_statement_terminator() {
    let error = parse_source("int f() { : 1 }").unwrap_err();
    assert_eq!(error.stage(), Stage::Syntax);
    assert_eq!(error.error_name(), "UnexpectedToken");
}

#[test]
fn rejects_trailing_input_after_program() {
    let error = parse_source("int f() { : 1. } int").unwrap_err();
    assert_eq!(error.error_name(), "UnexpectedToken");
}

#[test]
fn rejects_program_without_leading_type() {
    let error = parse_source("f() { : 1. }").unwrap_err();
    assert_eq!(error.error_name(), "ExpectedType");
}

#[test]
fn rejects_declaration_after_statement() {
    // Declarations must all precede the first statement of a block.
    let error = parse_source("int f() { nn = 1. int mm. : 1. }").unwrap_err();
    assert_eq!(error.error_name(), "ExpectedStatement");
}

#[test]
fn rejects_empty_return_expression() {
    let error = parse_source("int f() { : . }").unwrap_err();
    assert_eq!(error.error_name(), "ExpectedExpression");
    assert_eq!((error.loc().line, error.loc().column), (1, 13));
}

#[test]
fn rejects_bad_channel_selector() {
    let error = parse_source("int f() { : pp:alpha. }").unwrap_err();
    assert_eq!(error.error_name(), "UnexpectedToken");
}

#[test]
fn reports_lexical_errors_through_the_parser() {
    let error = parse_source("int f() { : @. }").unwrap_err();
    assert_eq!(error.stage(), Stage::Lexical);
}
