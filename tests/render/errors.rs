use memex::renderer::Boundary;
use memex::{Error, RenderError, convert};

fn unclosed(input: &str) -> RenderError {
    match convert(input, None) {
        Err(Error::Render(err)) => err,
        other => panic!("expected a render error for {input:?}, got {other:?}"),
    }
}

#[test]
fn unclosed_bold_after_heading() {
    let RenderError::Unclosed {
        opened_by,
        opened_at,
        expected_spelling,
        boundary,
        ..
    } = unclosed("# Title\n\n*open");
    assert_eq!(opened_by, "bold");
    assert_eq!(opened_at, 3);
    assert_eq!(expected_spelling, "*");
    assert_eq!(boundary, Boundary::EndOfInput);
}

#[test]
fn emphasis_cannot_cross_paragraphs() {
    let RenderError::Unclosed { boundary, .. } = unclosed("*a\n\nb*");
    assert_eq!(boundary, Boundary::ParagraphBreak { token: 2 });
}

#[test]
fn unclosed_link_names_its_closer() {
    let RenderError::Unclosed {
        opened_by,
        expected,
        expected_spelling,
        ..
    } = unclosed("see [the docs (https://x.org)");
    assert_eq!(opened_by, "external-link");
    assert_eq!(expected, "external-link-end");
    assert_eq!(expected_spelling, "]");
}

#[test]
fn unclosed_code_block() {
    let err = unclosed("```\nlet x = 1;\n");
    assert!(err.to_string().contains("code-block"));
}

#[test]
fn error_display_mentions_boundary() {
    let err = convert("`code", None).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Malformed document:"));
    assert!(message.contains("end of input"));
}

#[test]
fn blocks_cannot_open_inside_inline_constructs() {
    for (input, opener, token) in [
        ("*a ```x``` b*", "bold", 2),
        ("*a\n# b\nc*", "bold", 3),
        ("[a ```x``` (u)]", "external-link", 2),
    ] {
        let RenderError::Unclosed {
            opened_by,
            boundary,
            ..
        } = unclosed(input);
        assert_eq!(opened_by, opener, "opener for {input:?}");
        assert_eq!(boundary, Boundary::Block { token }, "boundary for {input:?}");
    }
}

#[test]
fn code_block_after_closed_emphasis_is_fine() {
    assert_eq!(
        convert("*a* ```x```", None).unwrap(),
        "<p><b>a</b> </p><pre><code>x</code></pre>"
    );
}
