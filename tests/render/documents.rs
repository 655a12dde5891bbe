use memex::{ConfigBuilder, SymbolDef, convert};

#[test]
fn note_with_every_inline_construct() {
    let input = "# Notes\nIntro with *bold* and **italic**.\n\nSee {the guide (guide)} and [docs (https://x.org)].\n\n```\nfn main() {}\n```\n";
    let expected = concat!(
        "<h1> Notes</h1>",
        "<p>Intro with <b>bold</b> and <i>italic</i>.</p>",
        "<p>See <a class=\"internal\" href=\"guide\">the guide</a> and ",
        "<a href=\"https://x.org\">docs</a>.</p>",
        "<pre><code>\nfn main() {}\n</code></pre>",
    );
    similar_asserts::assert_eq!(convert(input, None).unwrap(), expected);
}

#[test]
fn heading_mid_line_stays_text() {
    assert_eq!(convert("a # b", None).unwrap(), "<p>a # b</p>");
}

#[test]
fn heading_interrupts_paragraph() {
    assert_eq!(
        convert("Body text\n### Three\nMore", None).unwrap(),
        "<p>Body text</p><h3> Three</h3><p>More</p>"
    );
}

#[test]
fn citation_at_end_of_input() {
    assert_eq!(
        convert("{{source}}", None).unwrap(),
        "<p><cite>source</cite></p>"
    );
}

#[test]
fn line_break_inside_paragraph() {
    assert_eq!(
        convert("first\\\\\\second", None).unwrap(),
        "<p>first<br />second</p>"
    );
}

#[test]
fn escaped_html_text() {
    let config = ConfigBuilder::default().escape_html(true).build();
    assert_eq!(
        convert("a < b & *\"c\"*", Some(config)).unwrap(),
        "<p>a &lt; b &amp; <b>&quot;c&quot;</b></p>"
    );
}

#[test]
fn custom_dialect_only() {
    let config = ConfigBuilder::default()
        .builtin_symbols(false)
        .symbol(
            SymbolDef::new("strike", "~~")
                .opening_tag("<s>")
                .closing_tag("</s>")
                .closes_with("strike"),
        )
        .build();
    assert_eq!(
        convert("*not bold* ~~gone~~", Some(config)).unwrap(),
        "<p>*not bold* <s>gone</s></p>"
    );
}

#[test]
fn without_paragraph_wrapping() {
    let config = ConfigBuilder::default().paragraphs(false).build();
    assert_eq!(
        convert("one\ntwo *three*", Some(config)).unwrap(),
        "one two <b>three</b>"
    );
}
