// Integration tests for the Linen parser

use linen::parser::ast::{CodeBlock, ExprKind, ExprNode, Statement};
use linen::parser::constants::MAX_NESTING_DEPTH;
use linen::parser::tables::Operator;
use linen::parser::{parse_source_code, parse_source_code_with_limit, SourceError};

fn parse_ok(source: &str) -> CodeBlock {
    parse_source_code(source).expect("Parsing failed")
}

fn single_expression(source: &str) -> ExprNode {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);
    match program.statements.into_iter().next() {
        Some(Statement::Expression { expr, .. }) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn operands(node: &ExprNode) -> (&ExprNode, &ExprNode) {
    match &node.kind {
        ExprKind::Operator {
            left: Some(left),
            right,
            ..
        } => (left, right),
        other => panic!("expected binary operator, got {:?}", other),
    }
}

#[test]
fn test_if_round_trip() {
    let program = parse_ok("if a == 0 then end");
    assert_eq!(program.len(), 1);

    let Statement::If {
        condition,
        on_true,
        on_false,
        ..
    } = &program.statements[0]
    else {
        panic!("expected if statement");
    };

    assert_eq!(condition.operator(), Some(Operator::Equality));
    let (left, right) = operands(condition);
    assert_eq!(left.kind, ExprKind::Variable("a".to_string()));
    assert_eq!(right.kind, ExprKind::Number(0.0));
    assert!(on_true.is_empty());
    assert!(on_false.is_none());
}

#[test]
fn test_empty_else_is_distinct_from_no_else() {
    let program = parse_ok("if a == 0 then else end");
    let Statement::If { on_false, .. } = &program.statements[0] else {
        panic!("expected if statement");
    };
    let on_false = on_false.as_ref().expect("else block should be present");
    assert!(on_false.is_empty());
}

#[test]
fn test_multiplication_binds_tighter() {
    let expr = single_expression("1 + 2 * 3");
    assert_eq!(expr.operator(), Some(Operator::Add));
    let (left, right) = operands(&expr);
    assert_eq!(left.kind, ExprKind::Number(1.0));
    assert_eq!(right.operator(), Some(Operator::Mul));
    let (two, three) = operands(right);
    assert_eq!(two.kind, ExprKind::Number(2.0));
    assert_eq!(three.kind, ExprKind::Number(3.0));
}

#[test]
fn test_lowest_precedence_is_root() {
    let expr = single_expression("1 * 2 + 3 * 4");
    assert_eq!(expr.operator(), Some(Operator::Add));
    let (left, right) = operands(&expr);
    assert_eq!(left.operator(), Some(Operator::Mul));
    assert_eq!(right.operator(), Some(Operator::Mul));
}

#[test]
fn test_missing_end_reports_one_syntax_error() {
    match parse_source_code("if a == 0 then") {
        Err(SourceError::Syntax(err)) => {
            assert_eq!(err.location.line, 1);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }

    let err = parse_source_code("if a == 0 then").unwrap_err();
    assert_eq!(err.error_count(), 1);
    assert_eq!(err.diagnostics().len(), 1);
}

#[test]
fn test_lexical_errors_are_all_reported() {
    let err = parse_source_code("a = 1 => 2\nb = \"open\nc = 3 @").unwrap_err();
    let SourceError::Lexical(errors) = &err else {
        panic!("expected lexical errors, got {}", err);
    };
    assert_eq!(errors.len(), 3);
    let lines: Vec<usize> = err.diagnostics().iter().map(|d| d.location.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_empty_sources() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("\n\n  \t\n").is_empty());
    assert!(parse_ok("# nothing here\n").is_empty());
}

#[test]
fn test_statement_lines() {
    let program = parse_ok("x = 1\n\ny = 2\nif x then\n  z = 3\nend");
    let lines: Vec<usize> = program
        .statements
        .iter()
        .map(|s| s.location().line)
        .collect();
    assert_eq!(lines, vec![1, 3, 4]);
}

#[test]
fn test_line_continuation_joins_statements() {
    let program = parse_ok("total = 1 +\n\\ 2\nnext = 3");
    assert_eq!(program.len(), 2);
}

#[test]
fn test_semicolon_splits_statements() {
    let program = parse_ok("a = 1; b = 2; c = 3");
    assert_eq!(program.len(), 3);
}

#[test]
fn test_source_length_limit() {
    let source = "x = 1\n".repeat(50);
    assert!(parse_source_code(&source).is_err());
    let program = parse_source_code_with_limit(&source, 1024).expect("Parsing failed");
    assert_eq!(program.len(), 50);

    match parse_source_code(&source) {
        Err(SourceError::Lexical(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].is_fatal());
        }
        other => panic!("expected the length limit to trip, got {:?}", other),
    }
}

#[test]
fn test_error_messages_name_the_token() {
    let err = parse_source_code("x = 1\ny = * 2").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 2"), "{}", message);
    assert!(message.contains("'*'"), "{}", message);
}

#[test]
fn test_parent_links_point_to_owner() {
    fn check(node: &ExprNode) {
        for child in node.children() {
            assert_eq!(child.parent, Some(node.id));
            check(child);
        }
    }

    let expr = single_expression("r = f(a[1], -b * (c + d)) / !e");
    assert_eq!(expr.parent, None);
    check(&expr);
}

fn expect_too_deep(source: &str) {
    match parse_source_code_with_limit(source, source.len()) {
        Err(SourceError::Syntax(err)) => {
            assert!(err.message.starts_with("Nesting too deep"), "{}", err.message);
        }
        other => panic!("expected a nesting error, got {:?}", other),
    }
}

#[test]
fn test_deep_brackets_are_a_syntax_error() {
    let depth = 15_000;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    expect_too_deep(&source);

    let source = format!("y = {}0{}", "f(".repeat(depth), ")".repeat(depth));
    expect_too_deep(&source);
}

#[test]
fn test_deep_blocks_are_a_syntax_error() {
    let depth = 4_500;
    let source = format!("{}{}", "if a then\n".repeat(depth), "end\n".repeat(depth));
    expect_too_deep(&source);

    let source = format!("{}{}", "while a do\n".repeat(depth), "end\n".repeat(depth));
    expect_too_deep(&source);
}

#[test]
fn test_nesting_limit_counts_blocks_and_brackets_together() {
    let depth = MAX_NESTING_DEPTH / 2 + 1;
    let source = format!(
        "{}x = {}1{}\n{}",
        "do\n".repeat(depth),
        "[".repeat(depth),
        "]".repeat(depth),
        "end\n".repeat(depth)
    );
    expect_too_deep(&source);

    let depth = MAX_NESTING_DEPTH / 2;
    let source = format!(
        "{}x = {}1{}\n{}",
        "do\n".repeat(depth),
        "[".repeat(depth),
        "]".repeat(depth),
        "end\n".repeat(depth)
    );
    let program = parse_source_code_with_limit(&source, source.len()).expect("Parsing failed");
    assert_eq!(program.len(), 1);
}
