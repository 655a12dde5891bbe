//! Token-to-HTML renderer.
//!
//! Symbols open and close constructs through a matching stack: a symbol
//! that the innermost open construct expects closes it, anything else opens
//! a new construct. Closing tags are therefore always emitted in reverse
//! order of their openers.
//!
//! Every document is validated with the same stack discipline before any
//! output is produced, so an unclosed construct yields an error instead of
//! partial HTML.

use std::borrow::Cow;
use std::fmt;

use crate::symbols::{Role, Symbol, SymbolTable};
use crate::tokenizer::Token;

mod stack;

use stack::MatchingStack;

/// Placeholder in template tags replaced by the parenthesized argument.
pub const TEMPLATE_ARG: &str = "$arg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap inline content outside block constructs in `<p>` elements.
    pub paragraphs: bool,
    /// Escape `&`, `<`, `>` and `"` in text content.
    pub escape_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paragraphs: true,
            escape_html: false,
        }
    }
}

/// Where an unclosed construct was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    EndOfInput,
    ParagraphBreak { token: usize },
    /// A block construct (heading, code block) started at `token`.
    Block { token: usize },
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::EndOfInput => write!(f, "end of input"),
            Boundary::ParagraphBreak { token } => write!(f, "paragraph break (token {token})"),
            Boundary::Block { token } => write!(f, "block construct (token {token})"),
        }
    }
}

/// Structural errors found while matching openers with closers.
///
/// Inline constructs must close within their paragraph: besides the end of
/// input, a paragraph break or the start of a block construct while one is
/// still open is reported as [`RenderError::Unclosed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Unclosed {
        /// Name of the symbol that opened the construct.
        opened_by: String,
        /// Token index of the opener.
        opened_at: usize,
        /// Name of the symbol that would have closed it.
        expected: String,
        /// Spelling of the expected closer.
        expected_spelling: String,
        boundary: Boundary,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Unclosed {
                opened_by,
                opened_at,
                expected,
                expected_spelling,
                boundary,
            } => write!(
                f,
                "unclosed '{opened_by}' opened at token {opened_at}: expected '{expected}' \
                 ({expected_spelling:?}) before {boundary}"
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Renders token sequences produced against `table`.
pub struct Renderer<'t> {
    table: &'t SymbolTable,
    options: RenderOptions,
}

impl<'t> Renderer<'t> {
    pub fn new(table: &'t SymbolTable, options: RenderOptions) -> Self {
        Self { table, options }
    }

    /// Check that every construct is closed, without producing output.
    pub fn validate(&self, tokens: &[Token<'t>]) -> Result<(), RenderError> {
        Pass::new(self, false).run(tokens).map(|_| ())
    }

    pub fn render(&self, tokens: &[Token<'t>]) -> Result<String, RenderError> {
        self.validate(tokens)?;
        let html = Pass::new(self, true).run(tokens)?;
        log::debug!(
            "Rendered {} tokens into {} bytes of HTML",
            tokens.len(),
            html.len()
        );
        Ok(html)
    }
}

/// One left-to-right walk over a token sequence.
struct Pass<'r, 't> {
    renderer: &'r Renderer<'t>,
    /// When false, only the stack discipline runs.
    emit: bool,
    stack: MatchingStack<'t>,
    out: String,
    paragraph_open: bool,
    /// Soft break held back until more content arrives in the same paragraph.
    pending_break: Option<&'t str>,
    at_line_start: bool,
}

impl<'r, 't> Pass<'r, 't> {
    fn new(renderer: &'r Renderer<'t>, emit: bool) -> Self {
        Self {
            renderer,
            emit,
            stack: MatchingStack::new(),
            out: String::new(),
            paragraph_open: false,
            pending_break: None,
            at_line_start: true,
        }
    }

    fn options(&self) -> &RenderOptions {
        &self.renderer.options
    }

    fn run(mut self, tokens: &[Token<'t>]) -> Result<String, RenderError> {
        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Text(text) => self.text(text),
                Token::Symbol(symbol) => self.symbol(index, symbol)?,
            }
        }
        self.finish()
    }

    fn write(&mut self, s: &str) {
        if !self.emit || s.is_empty() {
            return;
        }
        match self.stack.capture_mut() {
            Some(capture) => capture.push_str(s),
            None => self.out.push_str(s),
        }
    }

    fn write_text(&mut self, s: &str) {
        if self.options().escape_html {
            let escaped = escape_html(s);
            self.write(&escaped);
        } else {
            self.write(s);
        }
    }

    fn text(&mut self, text: &str) {
        if self.stack.top_role().is_some_and(Role::is_verbatim) {
            self.write_text(text);
            self.at_line_start = false;
            return;
        }
        if self.options().paragraphs
            && !self.paragraph_open
            && !self.stack.in_block()
            && text.trim().is_empty()
        {
            return;
        }
        self.begin_inline();
        self.write_text(text);
        self.at_line_start = false;
    }

    fn symbol(&mut self, index: usize, symbol: &'t Symbol) -> Result<(), RenderError> {
        if self.stack.expects(&symbol.name) {
            self.close_top();
            if symbol.role == Role::ParagraphBreak {
                self.end_paragraph();
            }
            self.at_line_start = matches!(symbol.role, Role::SoftBreak | Role::ParagraphBreak);
            return Ok(());
        }

        if self.stack.top_role().is_some_and(Role::is_verbatim) {
            self.write_text(&symbol.spelling);
            self.at_line_start = false;
            return Ok(());
        }

        match symbol.role {
            Role::SoftBreak => {
                let tag = symbol.opening_tag.as_deref().unwrap_or("");
                if !self.options().paragraphs {
                    self.write(tag);
                } else if self.paragraph_open || !self.stack.is_empty() {
                    self.pending_break = Some(tag);
                }
                self.at_line_start = true;
            }
            Role::ParagraphBreak => {
                self.close_line_blocks();
                if let Some(frame) = self.stack.top() {
                    return Err(self.unclosed(
                        frame.opener,
                        frame.expects,
                        frame.opened_at,
                        Boundary::ParagraphBreak { token: index },
                    ));
                }
                self.end_paragraph();
                if !self.options().paragraphs {
                    self.write(symbol.opening_tag.as_deref().unwrap_or(""));
                }
                self.at_line_start = true;
            }
            Role::LineBlock if !self.at_line_start => self.literal(symbol),
            Role::LineBlock | Role::VerbatimBlock => {
                // A block cannot start inside an open inline construct.
                if let Some(frame) = self.stack.top()
                    && !frame.role().is_block()
                {
                    return Err(self.unclosed(
                        frame.opener,
                        frame.expects,
                        frame.opened_at,
                        Boundary::Block { token: index },
                    ));
                }
                self.end_paragraph();
                self.write(symbol.opening_tag.as_deref().unwrap_or(""));
                self.stack.open(symbol, index);
                self.at_line_start = false;
            }
            Role::Inline | Role::Verbatim | Role::Template => {
                if symbol.opening_tag.is_none() && !symbol.has_closing_symbol() {
                    self.literal(symbol);
                    return Ok(());
                }
                self.begin_inline();
                // Templates write their opening tag once the argument is known.
                if symbol.role != Role::Template || !symbol.has_closing_symbol() {
                    self.write(symbol.opening_tag.as_deref().unwrap_or(""));
                }
                self.stack.open(symbol, index);
                self.at_line_start = false;
            }
        }
        Ok(())
    }

    /// Render a symbol that has no effect here as its own spelling.
    fn literal(&mut self, symbol: &Symbol) {
        self.begin_inline();
        self.write_text(&symbol.spelling);
        self.at_line_start = false;
    }

    /// Open a paragraph if needed and flush a held-back soft break.
    fn begin_inline(&mut self) {
        if self.options().paragraphs && !self.paragraph_open && !self.stack.in_block() {
            self.write("<p>");
            self.paragraph_open = true;
            self.pending_break = None;
        }
        if let Some(tag) = self.pending_break.take() {
            self.write(tag);
        }
    }

    fn end_paragraph(&mut self) {
        self.pending_break = None;
        if self.paragraph_open {
            self.write("</p>");
            self.paragraph_open = false;
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame.capture {
            Some(captured) => {
                let opening = frame.opener.opening_tag.as_deref().unwrap_or("");
                let html = expand_template(opening, frame.closing, &captured);
                self.write(&html);
            }
            None => self.write(frame.closing),
        }
    }

    fn close_line_blocks(&mut self) {
        while self.stack.top_role() == Some(Role::LineBlock) {
            self.close_top();
        }
    }

    fn finish(mut self) -> Result<String, RenderError> {
        self.close_line_blocks();
        if let Some(frame) = self.stack.top() {
            return Err(self.unclosed(
                frame.opener,
                frame.expects,
                frame.opened_at,
                Boundary::EndOfInput,
            ));
        }
        self.end_paragraph();
        Ok(self.out)
    }

    fn unclosed(
        &self,
        opener: &Symbol,
        expects: &str,
        opened_at: usize,
        boundary: Boundary,
    ) -> RenderError {
        let expected_spelling = self
            .renderer
            .table
            .by_name(expects)
            .map(|closer| closer.spelling.clone())
            .unwrap_or_default();
        log::debug!("Unclosed '{}' at {}", opener.name, boundary);
        RenderError::Unclosed {
            opened_by: opener.name.clone(),
            opened_at,
            expected: expects.to_string(),
            expected_spelling,
            boundary,
        }
    }
}

/// Split captured template content into `(label, argument)`.
///
/// `"label (target)"` gives `("label", "target")`; content without a
/// trailing parenthesized argument is all label.
pub fn split_template(content: &str) -> (&str, &str) {
    if let Some(inner) = content.strip_suffix(')')
        && let Some(open) = inner.rfind('(')
    {
        return (inner[..open].trim_end(), &inner[open + 1..]);
    }
    (content, "")
}

fn expand_template(opening: &str, closing: &str, captured: &str) -> String {
    let (label, arg) = split_template(captured);
    let mut html = opening.replace(TEMPLATE_ARG, arg);
    html.push_str(label);
    html.push_str(&closing.replace(TEMPLATE_ARG, arg));
    html
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
