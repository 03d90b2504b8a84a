use arith_parser::{Context, Expr, Op, ParseError, Token, parse, tokenize};

fn check_expression(expression: &str, expected: f64) {
    let tokens = tokenize(expression).unwrap();
    let ast = parse(&tokens).unwrap();

    assert_eq!(ast.to_string(), expression);
    assert_eq!(ast.evaluate(&Context::default()).unwrap(), Some(expected));
}

#[test]
fn two_plus_two() {
    check_expression("2+2", 4.0);
}

#[test]
fn flat_addition_chain() {
    check_expression("2+2+2", 6.0);
}

#[test]
fn multiplication_binds_first() {
    check_expression("1+2*3", 7.0);
}

#[test]
fn mixed_tiers() {
    check_expression("1+2*3-4+5*6", 33.0);
}

#[test]
fn mixed_tiers_with_low_tail() {
    check_expression("1+2*3-4+5*6-7", 26.0);
}

#[test]
fn single_number() {
    check_expression("42", 42.0);
}

#[test]
fn division_keeps_fractions() {
    check_expression("10/4", 2.5);
}

#[test]
fn fractional_literals_render_as_written() {
    check_expression("1.5+1.5", 3.0);
}

#[test]
fn precedence_shapes_the_tree() {
    let tokens = tokenize("1+2*3").unwrap();

    assert_eq!(
        parse(&tokens).unwrap(),
        Expr::Binary(
            Op::Plus,
            Box::new(Expr::Number(1.0)),
            Box::new(Expr::Binary(
                Op::Star,
                Box::new(Expr::Number(2.0)),
                Box::new(Expr::Number(3.0)),
            )),
        )
    );
}

#[test]
fn same_tier_groups_left() {
    let tokens = tokenize("8-2-3").unwrap();

    assert_eq!(
        parse(&tokens).unwrap(),
        Expr::Binary(
            Op::Minus,
            Box::new(Expr::Binary(
                Op::Minus,
                Box::new(Expr::Number(8.0)),
                Box::new(Expr::Number(2.0)),
            )),
            Box::new(Expr::Number(3.0)),
        )
    );
}

#[test]
fn consecutive_numbers_are_rejected() {
    let tokens = [
        Token::Number(2.0),
        Token::Operation('+'),
        Token::Number(2.0),
        Token::Number(2.0),
    ];

    assert!(matches!(
        parse(&tokens),
        Err(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn leading_operator_is_rejected() {
    let tokens = tokenize("+2").unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::DanglingOperator { op: '+' })
    ));
}

#[test]
fn trailing_operator_is_rejected() {
    let tokens = tokenize("2*").unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::DanglingOperator { op: '*' })
    ));
}

#[test]
fn doubled_operator_is_rejected() {
    let tokens = tokenize("2+*3").unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::DanglingOperator { op: '*' })
    ));
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(parse(&[]), Err(ParseError::UnexpectedEnd)));
}

#[test]
fn brackets_are_lexed_but_not_parsed() {
    let tokens = tokenize("(2+2)").unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn names_are_not_operands_yet() {
    let tokens = tokenize("x+1").unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn unknown_tokens_fail_at_parse_time() {
    let tokens = tokenize("2$2").unwrap();
    assert!(parse(&tokens).is_err());
}

#[test]
fn division_by_zero_yields_infinity() {
    let tokens = tokenize("1/0").unwrap();
    let value = parse(&tokens)
        .unwrap()
        .evaluate(&Context::default())
        .unwrap();

    assert_eq!(value, Some(f64::INFINITY));
}

#[test]
fn context_is_reusable_across_evaluations() {
    let context = Context::default();

    for (expression, expected) in [("1+1", 2.0), ("3*3", 9.0), ("7-2*3", 1.0)] {
        let ast = parse(&tokenize(expression).unwrap()).unwrap();
        assert_eq!(ast.evaluate(&context).unwrap(), Some(expected));
    }
}
