// Every bundled demo program must lex and parse cleanly

use std::fs;
use std::path::Path;

use linen::parser::constants::DEMO_SOURCE_LENGTH;
use linen::parser::printer::format_tree;
use linen::parser::parse_source_code_with_limit;

fn demo_sources() -> Vec<(String, String)> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut demos: Vec<(String, String)> = fs::read_dir(&dir)
        .expect("demos directory should exist")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "lnn"))
        .map(|path| {
            let source = fs::read_to_string(&path).expect("demo should be readable");
            (path.display().to_string(), source)
        })
        .collect();
    demos.sort();
    demos
}

#[test]
fn test_demos_parse() {
    let demos = demo_sources();
    assert!(demos.len() >= 3);
    for (name, source) in &demos {
        let result = parse_source_code_with_limit(source, DEMO_SOURCE_LENGTH);
        assert!(result.is_ok(), "{} failed: {:?}", name, result.err());
        assert!(!result.unwrap_or_default().is_empty(), "{} is empty", name);
    }
}

#[test]
fn test_nested_demo_tree() {
    let source = include_str!("../demos/nested.lnn");
    let program = parse_source_code_with_limit(source, DEMO_SOURCE_LENGTH).expect("Parsing failed");
    let expected = "\
Block (2 statements)
  For @2:1
    init:
      Operator(=)
        Variable(row)
        Number(0)
    condition:
      Operator(<)
        Variable(row)
        Variable(height)
    step:
      Operator(+=)
        Variable(row)
        Number(1)
    body: (1 statements)
      For @3:5
        init:
          Operator(=)
            Variable(col)
            Number(0)
        condition:
          Operator(<)
            Variable(col)
            Variable(width)
        step:
          Operator(+=)
            Variable(col)
            Number(1)
        body: (2 statements)
          Expression @4:9
            Operator(=)
              Variable(cell)
              Operator([])
                Operator([])
                  Variable(board)
                  Variable(row)
                Variable(col)
          If @5:9
            condition:
              Operator(==)
                Variable(cell)
                Number(0)
            then: (1 statements)
              Expression @6:13
                Operator(+=)
                  Variable(empty)
                  Number(1)
            else: (1 statements)
              If @8:13
                condition:
                  Operator(>)
                    Variable(cell)
                    Number(0)
                then: (1 statements)
                  Expression @9:17
                    Operator(+=)
                      Variable(mine)
                      Number(1)
                else: (1 statements)
                  Expression @11:17
                    Operator(+=)
                      Variable(theirs)
                      Number(1)
  Expression @16:1
    Operator(=)
      Variable(score)
      Operator(-)
        Variable(mine)
        Variable(theirs)
";
    assert_eq!(format_tree(&program), expected);
}

#[test]
fn test_control_flow_demo_shape() {
    let source = include_str!("../demos/control_flow.lnn");
    let program = parse_source_code_with_limit(source, DEMO_SOURCE_LENGTH).expect("Parsing failed");
    let kinds: Vec<&str> = program.statements.iter().map(|s| s.kind_name()).collect();
    assert_eq!(
        kinds,
        vec![
            "Expression",
            "Expression",
            "If",
            "While",
            "For",
            "DoWhile",
            "Scope",
            "If",
            "Return"
        ]
    );
}
