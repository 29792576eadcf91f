//! End-to-end highlighting scenarios

use metta_syntax::metta::formats::{FormatRegistry, HtmlFormatter};
use metta_syntax::metta::token::leaves;
use metta_syntax::{Category, DepthClass, Highlighter};

fn labels(source: &str) -> Vec<(Category, String)> {
    Highlighter::default()
        .highlight(source)
        .into_iter()
        .map(|t| (t.category, t.text))
        .collect()
}

fn open(depth: usize) -> Category {
    Category::BracketOpen(DepthClass::new(depth, 6))
}

fn close(depth: usize) -> Category {
    Category::BracketClose(DepthClass::new(depth, 6))
}

#[test]
fn test_definition() {
    let got = labels("(= (add $x) (+ $x 1))");
    let expected = vec![
        (open(0), "("),
        (Category::Operator, "="),
        (Category::PlainText, " "),
        (open(1), "("),
        (Category::FunctionName, "add"),
        (Category::PlainText, " "),
        (Category::Variable, "$x"),
        (close(1), ")"),
        (Category::PlainText, " "),
        (open(1), "("),
        (Category::Operator, "+"),
        (Category::PlainText, " "),
        (Category::Variable, "$x"),
        (Category::PlainText, " "),
        (Category::Number, "1"),
        (close(1), ")"),
        (close(0), ")"),
    ];
    let expected: Vec<(Category, String)> = expected
        .into_iter()
        .map(|(c, t)| (c, t.to_string()))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn test_type_declaration() {
    let got = labels("(: Nat Type!)");
    assert_eq!(got[1], (Category::Operator, ":".to_string()));
    assert_eq!(got[3], (Category::FunctionName, "Nat".to_string()));
    assert_eq!(got[5], (Category::Keyword, "Type!".to_string()));
}

#[test]
fn test_lone_closer_is_unmatched() {
    assert_eq!(labels(")"), vec![(Category::BracketUnmatched, ")".to_string())]);
}

#[test]
fn test_arrow_is_single_operator() {
    assert_eq!(
        labels("-> "),
        vec![
            (Category::Operator, "->".to_string()),
            (Category::PlainText, " ".to_string()),
        ]
    );
}

#[test]
fn test_other_brackets_are_not_counted() {
    let got = labels("([)]");
    assert_eq!(got[0].0, open(0));
    assert_eq!(got[1].0, Category::Bracket);
    assert_eq!(got[2].0, close(0));
    assert_eq!(got[3].0, Category::Bracket);
}

#[test]
fn test_parens_inside_strings_and_comments() {
    let got = labels("(\"(\" ; )\n)");
    assert_eq!(got[0].0, open(0));
    assert_eq!(got[1], (Category::String, "\"(\"".to_string()));
    assert_eq!(got[3], (Category::Comment, "; )".to_string()));
    assert_eq!(got[5].0, close(0));
}

#[test]
fn test_empty_input() {
    assert!(labels("").is_empty());
}

#[test]
fn test_registry_renders_every_format() {
    let registry = FormatRegistry::with_defaults();
    let nodes = leaves(Highlighter::default().highlight("(f $x)"));
    for name in registry.list_formats() {
        let out = registry.format(&nodes, name).unwrap();
        assert!(out.contains("$x"), "{name} output lost text: {out}");
    }
}

#[test]
fn test_html_lines() {
    let nodes = Highlighter::default().highlight_lines("; doc\n(f)");
    assert_eq!(
        HtmlFormatter::with_line_numbers(true).render(&nodes),
        "<span class=\"line\" data-line=\"1\"><span class=\"token comment\">; doc</span>\n</span>\
         <span class=\"line\" data-line=\"2\">\
         <span class=\"token bracket-open paren-level-0\">(</span>\
         <span class=\"token function-name\">f</span>\
         <span class=\"token bracket-close paren-level-0\">)</span></span>"
    );
}
