//! Integration tests for the public mathdown API.
//!
//! Everything here is pure and offline; file tests write into a
//! `tempfile::tempdir()` that is removed on drop.
//!
//! Run with:
//!   cargo test --test pipeline
//!
//! Logs from the library are captured per test; show them with:
//!   RUST_LOG=mathdown=debug cargo test --test pipeline -- --nocapture

use mathdown::{
    convert, convert_file, convert_to_file, derive_title, latex_to_plain_text, natural_to_latex,
    natural_to_latex_with, parse_document, sanitize, AnswerDisplay, Block, ConversionOutput,
    Inline, MathdownError, NormalizeConfig, OutputMode,
};
use tracing_subscriber::EnvFilter;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Inputs that exercise every sanitizer rule, alone and in combination.
const SANITIZE_CORPUS: &[&str] = &[
    "",
    "   ",
    "rac{-4}{2}",
    "\u{0C}rac{1}{2}",
    "frac{a}{b} + sqrt{9}",
    "\\f{1}{2}",
    "\\f\\alpha",
    "\\f\\f(x)",
    "x\\f 2",
    "\\\\f(x)",
    "\\\\\u{0C}rac{1}{2}",
    "rac{1}{rac{2}{3}}",
    "rac{rac{1}{2}}{3}",
    "xfrac{1}{2}",
    "\\dfrac{1}{2}",
    "pi r^2 leq infty",
    "\\ pi",
    "pizza summit integer",
    "\\frac{\\sqrt{16}}{2} \\times \\pi",
    "$x$ and \\(y\\)",
    "{{{}}}\\\\",
    "\u{01}\u{02}\t\n",
];

const NATURAL_CORPUS: &[&str] = &[
    "(3+2)/5",
    "sqrt(16)",
    "x^2",
    "sin(2)/3",
    "|x-1|",
    "x<=3",
    "2πr",
    "α/β",
    "cbrt(27) * 2",
    "log_(2)(8)",
    "dy/dx",
    "e^(x+1) - 1/(x+1)",
    "arcsin(x)",
    "sqrt(sqrt(sqrt(2)))",
    "((((",
    "////",
    "^^^^",
    "****",
];

// ── Sanitizer ────────────────────────────────────────────────────────────────

#[test]
fn test_sanitize_is_idempotent() {
    init_tracing();
    for input in SANITIZE_CORPUS {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_sanitize_repairs() {
    assert_eq!(sanitize("rac{-4}{2}"), "\\frac{-4}{2}");
    assert_eq!(sanitize("sqrt{16}"), "\\sqrt{16}");
}

#[test]
fn test_sanitize_output_has_no_stray_controls() {
    for input in SANITIZE_CORPUS {
        let out = sanitize(input);
        assert!(
            !out.chars().any(|c| (c as u32) < 32 && !matches!(c, '\t' | '\n' | '\r')),
            "input: {input:?} -> {out:?}"
        );
    }
}

// ── Natural translator ───────────────────────────────────────────────────────

#[test]
fn test_natural_examples() {
    assert_eq!(natural_to_latex("(3+2)/5"), "\\frac{3+2}{5}");
    assert_eq!(natural_to_latex("sqrt(16)"), "\\sqrt{16}");
    assert_eq!(natural_to_latex("x^2"), "x^{2}");
    assert_eq!(natural_to_latex("α/β"), "\\frac{\\alpha}{\\beta}");
    assert_eq!(natural_to_latex("2πr"), "2\\pi r");
}

#[test]
fn test_natural_output_is_sanitize_fixed_point() {
    init_tracing();
    for input in NATURAL_CORPUS {
        let latex = natural_to_latex(input);
        assert_eq!(sanitize(&latex), latex, "input: {input:?}");
    }
}

#[test]
fn test_natural_terminates_on_deep_nesting() {
    init_tracing();
    let depth = 200;
    let input = format!("{}1{}", "sqrt(".repeat(depth), ")".repeat(depth));
    let latex = natural_to_latex(&input);
    assert!(!latex.contains("sqrt("), "got: {latex}");
    assert_eq!(latex.matches("\\sqrt{").count(), depth);
}

#[test]
fn test_natural_root_bound_returns_last_state() {
    init_tracing();
    let input = format!("{}1{}", "sqrt(".repeat(50), ")".repeat(50));
    let config = NormalizeConfig::builder().max_root_passes(5).build().unwrap();
    let latex = natural_to_latex_with(&input, &config);
    assert_eq!(latex.matches("\\sqrt{").count(), 5);
    assert!(latex.contains("sqrt("));
}

#[test]
fn test_natural_degenerate_input_does_not_panic() {
    for input in NATURAL_CORPUS {
        let _ = natural_to_latex(input);
    }
    let unclosed = "sqrt(".repeat(500);
    assert_eq!(natural_to_latex(&unclosed), unclosed.trim());
}

// ── Document parser ──────────────────────────────────────────────────────────

#[test]
fn test_document_heading_paragraph_list() {
    let doc = parse_document("### Title\nSome text.\n- item one\n- item two");
    assert_eq!(doc.len(), 3);
    assert!(matches!(doc.blocks[0], Block::Heading { level: 3, .. }));
    assert!(matches!(doc.blocks[1], Block::Paragraph { .. }));
    match &doc.blocks[2] {
        Block::List { items } => assert_eq!(items.len(), 2),
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn test_document_multi_line_block_math() {
    let doc = parse_document("Before\n\\[\nx^2\n+ sqrt{4}\n= 0\n\\]\nAfter");
    let math: Vec<&Block> = doc
        .iter()
        .filter(|b| matches!(b, Block::MathBlock { .. }))
        .collect();
    assert_eq!(math.len(), 1);
    assert_eq!(
        math[0],
        &Block::MathBlock {
            latex: "x^2 + \\sqrt{4} = 0".into()
        }
    );
    assert_eq!(doc.len(), 3);
}

fn block_kinds(input: &str) -> Vec<&'static str> {
    parse_document(input)
        .iter()
        .map(|b| match b {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List { .. } => "list",
            Block::MathBlock { .. } => "math",
        })
        .collect()
}

#[test]
fn test_document_block_order_across_transitions() {
    assert_eq!(block_kinds("- a\nso \\[x\\]"), ["list", "paragraph", "math"]);
    assert_eq!(block_kinds("intro\n- a"), ["paragraph", "list"]);
    assert_eq!(
        block_kinds("\\[x\\] then\n- a"),
        ["math", "paragraph", "list"]
    );
    assert_eq!(
        block_kinds("- a\n$$\ny\n$$\nafter\n### Next"),
        ["list", "math", "paragraph", "heading"]
    );
}

#[test]
fn test_document_inline_spans() {
    let doc = parse_document("Divide **both sides** by $rac{1}{2}$, *then* check.");
    assert_eq!(
        doc.blocks,
        vec![Block::Paragraph {
            inlines: vec![
                Inline::Text("Divide ".into()),
                Inline::Bold(vec![Inline::Text("both sides".into())]),
                Inline::Text(" by ".into()),
                Inline::InlineMath("\\frac{1}{2}".into()),
                Inline::Text(", ".into()),
                Inline::Italic("then".into()),
                Inline::Text(" check.".into()),
            ],
        }]
    );
}

#[test]
fn test_document_degenerate_input() {
    init_tracing();
    for input in ["\\[", "$$", "$$$", "\\[\\]\\]", "- ", "###", "**$", "\n\n\n"] {
        let _ = parse_document(input);
    }
    // A dash with nothing after it is not a bullet.
    assert_eq!(
        parse_document("- ").blocks,
        vec![Block::Paragraph {
            inlines: vec![Inline::Text("-".into())]
        }]
    );
    assert!(parse_document("$$").is_empty());
}

#[test]
fn test_document_json_shape() {
    let doc = parse_document("### Step 1\n$$x = 2$$");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["blocks"][0]["type"], "heading");
    assert_eq!(json["blocks"][0]["level"], 3);
    assert_eq!(json["blocks"][0]["inlines"][0]["type"], "text");
    assert_eq!(json["blocks"][0]["inlines"][0]["value"], "Step 1");
    assert_eq!(json["blocks"][1]["type"], "math_block");
    assert_eq!(json["blocks"][1]["latex"], "x = 2");
}

// ── Plain text and presentation ──────────────────────────────────────────────

#[test]
fn test_plain_text_examples() {
    assert_eq!(latex_to_plain_text("\\frac{-4}{2}"), "(-4) / (2)");
    assert_eq!(latex_to_plain_text("\\sqrt{16}"), "√(16)");
}

#[test]
fn test_plain_text_never_leaves_markup() {
    for input in SANITIZE_CORPUS.iter().chain(NATURAL_CORPUS) {
        let plain = latex_to_plain_text(&natural_to_latex(input));
        assert!(!plain.contains(['\\', '{', '}']), "input: {input:?} -> {plain:?}");
    }
}

#[test]
fn test_answer_and_title() {
    let answer = AnswerDisplay::from_raw("  x = rac{-4}{2}  ");
    assert_eq!(answer.latex, "x = \\frac{-4}{2}");
    assert_eq!(answer.text(), Some("x = (-4) / (2)"));
    assert!(answer.show_latex);

    assert_eq!(derive_title("\\int x \\, dx", 50).as_deref(), Some("∫ x dx"));
    assert_eq!(derive_title("", 50), None);
}

// ── Empty input ──────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_everywhere() {
    assert_eq!(sanitize(""), "");
    assert_eq!(natural_to_latex(""), "");
    assert!(parse_document("").is_empty());
    assert_eq!(latex_to_plain_text(""), "");

    let config = NormalizeConfig::default();
    assert_eq!(
        convert("", OutputMode::Title, &config),
        ConversionOutput::Title { title: None }
    );
}

// ── Files ────────────────────────────────────────────────────────────────────

#[test]
fn test_file_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("answer.md");
    let output = dir.path().join("out/answer.txt");
    std::fs::write(&input, "### Result\n\\[\nrac{-4}{2}\n\\]\n- done").unwrap();

    let out = convert_to_file(&input, &output, OutputMode::Document, &NormalizeConfig::default())
        .unwrap();
    assert_eq!(out.mode(), OutputMode::Document);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Result\n(-4) / (2)\n• done"
    );

    let again = convert_file(&input, OutputMode::Document, &NormalizeConfig::default()).unwrap();
    assert_eq!(again, out);
}

#[test]
fn test_file_errors_are_typed() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(
        dir.path().join("missing.md"),
        OutputMode::Plain,
        &NormalizeConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MathdownError::FileNotFound { .. }), "got: {err}");
}

#[test]
fn test_json_output_shape() {
    let out = convert("sqrt(16)", OutputMode::Natural, &NormalizeConfig::default());
    let value: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
    assert_eq!(value["mode"], "natural");
    assert_eq!(value["latex"], "\\sqrt{16}");
}
