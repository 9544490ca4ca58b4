use pixl::{
    ast::{BinaryOp, Expr, LiteralKind, Program, Stmt, UnaryOp},
    error::ParseError,
    lexer::Lexer,
    parser,
};

fn parse(source: &str) -> Program {
    let tokens = Lexer::new(source).tokenize();
    parser::parse(&tokens).unwrap_or_else(|err| panic!("parse failed: {err}\n{source}"))
}

fn parse_err(source: &str) -> ParseError {
    let tokens = Lexer::new(source).tokenize();
    match parser::parse(&tokens) {
        Ok(_) => panic!("expected parse error:\n{source}"),
        Err(err) => err,
    }
}

fn body_of(program: &Program, index: usize) -> &[Stmt] {
    match &program.functions[index].body {
        Stmt::Block { statements } => statements,
        other => panic!("function body is not a block: {other:?}"),
    }
}

#[test]
fn function_with_explicit_return_type() {
    let program = parse("int main() { return 0; }");
    let func = &program.functions[0];
    assert_eq!(func.return_type, "int");
    assert_eq!(func.name, "main");
    assert!(func.params.is_empty());
}

#[test]
fn function_without_return_type_defaults_to_void() {
    let program = parse("main() { }");
    let func = &program.functions[0];
    assert_eq!(func.return_type, "void");
    assert_eq!(func.name, "main");
}

#[test]
fn parameters_are_type_name_pairs() {
    let program = parse("int add(int a, float b) { return a; }");
    let params = &program.functions[0].params;
    assert_eq!(params.len(), 2);
    assert_eq!((params[0].ty.as_str(), params[0].name.as_str()), ("int", "a"));
    assert_eq!((params[1].ty.as_str(), params[1].name.as_str()), ("float", "b"));
}

#[test]
fn multiple_functions_and_blank_lines() {
    let program = parse("\n\nint one() { return 1; }\n\nint two() { return 2; }\n");
    assert_eq!(program.functions.len(), 2);
    assert_eq!(program.functions[0].name, "one");
    assert_eq!(program.functions[1].name, "two");
}

#[test]
fn both_declaration_forms_produce_the_same_node() {
    let program = parse("main() { let x: int = 5; int y = 5; int z; }");
    let body = body_of(&program, 0);
    assert_eq!(
        body[0],
        Stmt::VarDecl {
            name: "x".to_string(),
            ty: "int".to_string(),
            init: Some(Expr::Literal { kind: LiteralKind::Int, text: "5".to_string() }),
        }
    );
    assert!(matches!(
        &body[1],
        Stmt::VarDecl { name, ty, init: Some(_) } if name == "y" && ty == "int"
    ));
    assert!(matches!(
        &body[2],
        Stmt::VarDecl { name, ty, init: None } if name == "z" && ty == "int"
    ));
}

#[test]
fn user_named_types_need_identifier_identifier() {
    let program = parse("main() { Sprite s; s = 1; }");
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::VarDecl { name, ty, init: None } if name == "s" && ty == "Sprite"
    ));
    // `s = 1;` is an assignment, not a declaration.
    assert!(matches!(
        &body[1],
        Stmt::Expression { expr: Expr::Assign { name, .. } } if name == "s"
    ));
}

#[test]
fn precedence_multiplication_binds_tighter() {
    let program = parse("main() { int x = 2 + 3 * 4; }");
    let body = body_of(&program, 0);
    let Stmt::VarDecl { init: Some(Expr::Binary { op, right, .. }), .. } = &body[0] else {
        panic!("expected initialized declaration");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert!(matches!(
        right.as_ref(),
        Expr::Binary { op: BinaryOp::Mul, .. }
    ));
}

#[test]
fn comparison_binds_looser_than_additive() {
    let program = parse("main() { int x = 1 + 2 < 4; }");
    let body = body_of(&program, 0);
    let Stmt::VarDecl { init: Some(Expr::Binary { op, .. }), .. } = &body[0] else {
        panic!("expected initialized declaration");
    };
    assert_eq!(*op, BinaryOp::Lt);
}

#[test]
fn assignment_is_right_associative() {
    let program = parse("main() { int a; int b; a = b = 1; }");
    let body = body_of(&program, 0);
    let Stmt::Expression { expr: Expr::Assign { name, value } } = &body[2] else {
        panic!("expected assignment expression");
    };
    assert_eq!(name, "a");
    assert!(matches!(value.as_ref(), Expr::Assign { name, .. } if name == "b"));
}

#[test]
fn assignment_to_non_identifier_is_rejected() {
    let err = parse_err("main() { 1 = 2; }");
    assert!(matches!(err, ParseError::InvalidAssignmentTarget { .. }));
}

#[test]
fn unary_operators_nest() {
    let program = parse("main() { int x = -5; int y = !0; int z = --1; }");
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::VarDecl { init: Some(Expr::Unary { op: UnaryOp::Neg, .. }), .. }
    ));
    assert!(matches!(
        &body[1],
        Stmt::VarDecl { init: Some(Expr::Unary { op: UnaryOp::Not, .. }), .. }
    ));
    let Stmt::VarDecl { init: Some(Expr::Unary { operand, .. }), .. } = &body[2] else {
        panic!("expected unary declaration");
    };
    assert!(matches!(operand.as_ref(), Expr::Unary { op: UnaryOp::Neg, .. }));
}

#[test]
fn boolean_literals_materialize_as_one_and_zero() {
    let program = parse("main() { bool t = true; bool f = false; }");
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::VarDecl { init: Some(Expr::Literal { kind: LiteralKind::True, text }), .. }
            if text == "1"
    ));
    assert!(matches!(
        &body[1],
        Stmt::VarDecl { init: Some(Expr::Literal { kind: LiteralKind::False, text }), .. }
            if text == "0"
    ));
}

#[test]
fn elif_chains_nest_as_if_nodes() {
    let program = parse(
        "main() { if (1) { } elif (2) { } elif (3) { } else { } }",
    );
    let body = body_of(&program, 0);
    let Stmt::If { else_branch: Some(first_else), .. } = &body[0] else {
        panic!("expected if statement");
    };
    let Stmt::If { else_branch: Some(second_else), .. } = first_else.as_ref() else {
        panic!("expected nested elif");
    };
    let Stmt::If { else_branch: Some(last_else), .. } = second_else.as_ref() else {
        panic!("expected second nested elif");
    };
    assert!(matches!(last_else.as_ref(), Stmt::Block { .. }));
}

#[test]
fn while_and_bodies_may_be_single_statements() {
    let program = parse("main() { while (1) print(1); }");
    let body = body_of(&program, 0);
    let Stmt::While { body: loop_body, .. } = &body[0] else {
        panic!("expected while");
    };
    assert!(matches!(loop_body.as_ref(), Stmt::Print { .. }));
}

#[test]
fn for_header_components_are_optional() {
    let program = parse("main() { for (;;) { } }");
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::For { init: None, condition: None, increment: None, .. }
    ));
}

#[test]
fn full_for_header_parses_all_three_components() {
    let program = parse("main() { for (int i = 0; i < 10; i = i + 1) { } }");
    let body = body_of(&program, 0);
    let Stmt::For { init: Some(init), condition: Some(_), increment: Some(_), .. } = &body[0]
    else {
        panic!("expected full for header");
    };
    assert!(matches!(
        init.as_ref(),
        Stmt::VarDecl { name, init: Some(_), .. } if name == "i"
    ));
}

#[test]
fn for_init_accepts_the_let_form() {
    let program = parse("main() { for (let i: int = 0; i < 3; i = i + 1) { } }");
    let body = body_of(&program, 0);
    assert!(matches!(&body[0], Stmt::For { init: Some(_), .. }));
}

#[test]
fn calls_and_index_reads_chain_postfix() {
    let program = parse("main() { int x = f(1, 2)[0]; }");
    let body = body_of(&program, 0);
    let Stmt::VarDecl { init: Some(Expr::Index { array, .. }), .. } = &body[0] else {
        panic!("expected index expression");
    };
    assert!(matches!(
        array.as_ref(),
        Expr::Call { name, args } if name == "f" && args.len() == 2
    ));
}

#[test]
fn calling_a_non_identifier_is_rejected() {
    let err = parse_err("main() { 1(2); }");
    assert!(matches!(err, ParseError::InvalidCallTarget { .. }));
}

#[test]
fn builtins_parse_with_and_without_arguments() {
    let program = parse(
        "main() { screen(640, 480, \"t\"); display(); quit; updateInput(); isKeyDown(\"a\"); }",
    );
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::Expression { expr: Expr::Call { name, args } } if name == "screen" && args.len() == 3
    ));
    assert!(matches!(
        &body[1],
        Stmt::Expression { expr: Expr::Call { name, args } } if name == "display" && args.is_empty()
    ));
    assert!(matches!(
        &body[2],
        Stmt::Expression { expr: Expr::Call { name, args } } if name == "quit" && args.is_empty()
    ));
    assert!(matches!(
        &body[3],
        Stmt::Expression { expr: Expr::Call { name, .. } } if name == "updateInput"
    ));
    assert!(matches!(
        &body[4],
        Stmt::Expression { expr: Expr::Call { name, args } } if name == "isKeyDown" && args.len() == 1
    ));
}

#[test]
fn input_forms_produce_dedicated_nodes() {
    let program = parse(
        "main() { string a = input; string b = input(); string c = input(\"name? \"); }",
    );
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::VarDecl { init: Some(Expr::Input { prompt: None }), .. }
    ));
    assert!(matches!(
        &body[1],
        Stmt::VarDecl { init: Some(Expr::Input { prompt: None }), .. }
    ));
    assert!(matches!(
        &body[2],
        Stmt::VarDecl { init: Some(Expr::Input { prompt: Some(_) }), .. }
    ));
}

#[test]
fn key_pressed_produces_its_own_node() {
    let program = parse("main() { string k = key_pressed(); }");
    let body = body_of(&program, 0);
    assert!(matches!(
        &body[0],
        Stmt::VarDecl { init: Some(Expr::KeyPressed { .. }), .. }
    ));
}

#[test]
fn comma_expressions_fold_left() {
    let program = parse("main() { print(\"x = \", 1, 2); }");
    let body = body_of(&program, 0);
    let Stmt::Print { expr: Expr::Binary { op, left, .. } } = &body[0] else {
        panic!("expected print of comma chain");
    };
    assert_eq!(*op, BinaryOp::Comma);
    assert!(matches!(
        left.as_ref(),
        Expr::Binary { op: BinaryOp::Comma, .. }
    ));
}

#[test]
fn missing_semicolon_is_a_syntax_error() {
    let err = parse_err("main() { int x = 1 }");
    assert!(err.to_string().contains("Expected ';'"), "got: {err}");
}

#[test]
fn missing_closing_brace_is_a_syntax_error() {
    let err = parse_err("main() { int x = 1;");
    assert!(err.to_string().contains("Expected '}'"), "got: {err}");
}

#[test]
fn stray_token_in_expression_is_reported_with_its_text() {
    let err = parse_err("main() { int x = ; }");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "got: {err}");
}

#[test]
fn every_control_node_keeps_required_children() {
    let program = parse(
        "int main() {
            if (1) { print(1); } else { print(2); }
            while (1) { }
            for (int i = 0; i < 1; i = i + 1) { }
            return 0;
        }",
    );
    let body = body_of(&program, 0);
    assert!(matches!(&body[0], Stmt::If { .. }));
    assert!(matches!(&body[1], Stmt::While { .. }));
    assert!(matches!(&body[2], Stmt::For { .. }));
    assert!(matches!(&body[3], Stmt::Return { value: Some(_) }));
}
