//! The built-in memex dialect: which symbols exist and what HTML they map to.

use crate::symbols::{Role, SymbolDef};

/// Name of the single-newline symbol. Headings close on it.
pub const NEWLINE: &str = "newline";
/// Name of the blank-line symbol separating paragraphs.
pub const PARAGRAPH_BREAK: &str = "paragraph-break";

fn heading(level: usize) -> SymbolDef {
    SymbolDef::new(format!("h{level}"), "#".repeat(level))
        .opening_tag(format!("<h{level}>"))
        .closing_tag(format!("</h{level}>"))
        .closes_with(NEWLINE)
        .role(Role::LineBlock)
}

fn pair(name: &str, spelling: &str, open: &str, close: &str) -> SymbolDef {
    SymbolDef::new(name, spelling)
        .opening_tag(open)
        .closing_tag(close)
        .closes_with(name)
}

fn escape(name: &str, spelling: &str, literal: &str) -> SymbolDef {
    SymbolDef::new(name, spelling).opening_tag(literal)
}

/// Symbol definitions for the memex dialect, in table order.
pub fn symbols() -> Vec<SymbolDef> {
    let mut defs: Vec<SymbolDef> = (1..=6).map(heading).collect();

    defs.extend([
        // Emphasis
        pair("bold", "*", "<b>", "</b>"),
        pair("italic", "**", "<i>", "</i>"),
        pair("bold-italic", "***", "<b><i>", "</i></b>"),
        // Breaks
        SymbolDef::new(NEWLINE, "\n")
            .opening_tag(" ")
            .role(Role::SoftBreak),
        SymbolDef::new(PARAGRAPH_BREAK, "\n\n").role(Role::ParagraphBreak),
        SymbolDef::new("line-break", "\\\\\\").opening_tag("<br />"),
        // Escapes
        escape("escaped-backslash", "\\\\", "\\"),
        escape("escaped-octothorpe", "\\#", "#"),
        escape("escaped-asterisk", "\\*", "*"),
        escape("escaped-backtick", "\\`", "`"),
        escape("escaped-quote", "\\\"", "\""),
        escape("escaped-open-brace", "\\{", "{"),
        escape("escaped-close-brace", "\\}", "}"),
        escape("escaped-open-bracket", "\\[", "["),
        escape("escaped-close-bracket", "\\]", "]"),
        // Links, citations and figures
        SymbolDef::new("internal-link", "{")
            .opening_tag("<a class=\"internal\" href=\"$arg\">")
            .closing_tag("</a>")
            .closes_with("internal-link-end")
            .role(Role::Template),
        SymbolDef::new("internal-link-end", "}"),
        SymbolDef::new("external-link", "[")
            .opening_tag("<a href=\"$arg\">")
            .closing_tag("</a>")
            .closes_with("external-link-end")
            .role(Role::Template),
        SymbolDef::new("external-link-end", "]"),
        SymbolDef::new("citation", "{{")
            .opening_tag("<cite>")
            .closing_tag("</cite>")
            .closes_with("citation-end")
            .role(Role::Template),
        SymbolDef::new("citation-end", "}}"),
        SymbolDef::new("figure", "[[")
            .opening_tag("<img src=\"")
            .closing_tag("\" alt=\"$arg\" />")
            .closes_with("figure-end")
            .role(Role::Template),
        SymbolDef::new("figure-end", "]]"),
        pair("quote", "\"\"", "<q cite=\"$arg\">", "</q>").role(Role::Template),
        // Code
        pair("code", "`", "<code>", "</code>").role(Role::Verbatim),
        pair("code-block", "```", "<pre><code>", "</code></pre>").role(Role::VerbatimBlock),
    ]);

    defs
}
