//! Property tests over generated block-structured programs.

use proptest::prelude::*;
use vbs_fmt::{format, FormatOptions};
use vbs_scanner::ScanMode;

#[derive(Debug, Clone)]
enum Node {
    Assign(String, i64),
    Call(String),
    InlineIf(String),
    If(Vec<Node>, Vec<Node>),
    For(Vec<Node>),
    DoWhile(Vec<Node>),
    While(Vec<Node>),
    Sub(Vec<Node>),
    With(Vec<Node>),
    Select(Vec<Vec<Node>>),
}

fn code_options() -> FormatOptions {
    FormatOptions {
        initial_mode: ScanMode::Code,
        ..Default::default()
    }
}

fn ident() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "total", "count1"]).prop_map(String::from)
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (ident(), 0i64..1000).prop_map(|(name, value)| Node::Assign(name, value)),
        ident().prop_map(Node::Call),
        ident().prop_map(Node::InlineIf),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4);
        prop_oneof![
            (body.clone(), body.clone()).prop_map(|(then, other)| Node::If(then, other)),
            body.clone().prop_map(Node::For),
            body.clone().prop_map(Node::DoWhile),
            body.clone().prop_map(Node::While),
            body.clone().prop_map(Node::Sub),
            body.clone().prop_map(Node::With),
            prop::collection::vec(body, 1..3).prop_map(Node::Select),
        ]
    })
}

fn program() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(node(), 1..5)
}

/// Render nodes as untidy source: two spaces per level, keywords in
/// upper case when `shout` is set.
fn render(nodes: &[Node], shout: bool) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, 0, shout, &mut out);
    }
    out
}

fn render_node(node: &Node, level: usize, shout: bool, out: &mut String) {
    let kw = |word: &str| {
        if shout {
            word.to_uppercase()
        } else {
            word.to_lowercase()
        }
    };
    let mut line = |text: String| {
        out.push_str(&"  ".repeat(level));
        out.push_str(&text);
        out.push('\n');
    };

    match node {
        Node::Assign(name, value) => line(format!("{name}={value}")),
        Node::Call(name) => line(format!("{} {name}(1,\"s\")", kw("call"))),
        Node::InlineIf(name) => line(format!(
            "{} {name}>1 {} {name}=0",
            kw("if"),
            kw("then")
        )),
        Node::If(then, other) => {
            line(format!("{} a {}", kw("if"), kw("then")));
            render_body(then, level, shout, out);
            if !other.is_empty() {
                out.push_str(&format!("{}{}\n", "  ".repeat(level), kw("else")));
                render_body(other, level, shout, out);
            }
            out.push_str(&format!("{}{}\n", "  ".repeat(level), kw("end if")));
        }
        Node::For(body) => block(
            &format!("{} i = 1 {} 10", kw("for"), kw("to")),
            body,
            &kw("next"),
            level,
            shout,
            out,
        ),
        Node::DoWhile(body) => block(
            &format!("{} a < 5", kw("do while")),
            body,
            &kw("loop"),
            level,
            shout,
            out,
        ),
        Node::While(body) => block(&format!("{} b", kw("while")), body, &kw("wend"), level, shout, out),
        Node::Sub(body) => block(
            &format!("{} Work(x)", kw("sub")),
            body,
            &kw("end sub"),
            level,
            shout,
            out,
        ),
        Node::With(body) => block(
            &format!("{} total", kw("with")),
            body,
            &kw("end with"),
            level,
            shout,
            out,
        ),
        Node::Select(cases) => {
            line(format!("{} a", kw("select case")));
            for (i, body) in cases.iter().enumerate() {
                out.push_str(&format!("{}{} {i}\n", "  ".repeat(level + 1), kw("case")));
                render_body(body, level + 1, shout, out);
            }
            out.push_str(&format!("{}{}\n", "  ".repeat(level), kw("end select")));
        }
    }
}

fn block(open: &str, body: &[Node], close: &str, level: usize, shout: bool, out: &mut String) {
    out.push_str(&format!("{}{open}\n", "  ".repeat(level)));
    render_body(body, level, shout, out);
    out.push_str(&format!("{}{close}\n", "  ".repeat(level)));
}

fn render_body(body: &[Node], level: usize, shout: bool, out: &mut String) {
    for node in body {
        render_node(node, level + 1, shout, out);
    }
}

proptest! {
    #[test]
    fn formatting_is_idempotent(nodes in program()) {
        let once = format(&render(&nodes, false), &code_options()).unwrap();
        let twice = format(&once, &code_options()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn balanced_blocks_return_to_depth_zero(nodes in program()) {
        let source = format!("{}z = 1", render(&nodes, false));
        let out = format(&source, &code_options()).unwrap();
        prop_assert!(out.ends_with("\nz = 1"), "last line indented:\n{}", out);
    }

    #[test]
    fn keyword_case_does_not_matter(nodes in program()) {
        let lower = format(&render(&nodes, false), &code_options()).unwrap();
        let upper = format(&render(&nodes, true), &code_options()).unwrap();
        prop_assert_eq!(lower, upper);
    }
}
