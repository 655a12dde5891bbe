//! Character-stream tokenizer.
//!
//! Splits input into plain-text runs and recognized symbols using the
//! symbol trie. A run of characters that matched a symbol spelling is
//! extended as long as the trie still recognizes it, and emitted as the
//! symbol once the next character breaks the match. A run that only ever
//! matched a prefix falls back to plain text, keeping the input
//! characters in order.

use std::io::{self, Read};

use serde::Serialize;

use crate::symbols::{Symbol, SymbolTable, TrieProbe};

/// A unit of the token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token<'t> {
    /// Raw content that is not a recognized spelling.
    Text(String),
    /// A recognized symbol from the table.
    Symbol(#[serde(serialize_with = "serialize_symbol_name")] &'t Symbol),
}

fn serialize_symbol_name<S>(symbol: &&Symbol, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&symbol.name)
}

impl Token<'_> {
    /// The characters this token was read from.
    pub fn spelling(&self) -> &str {
        match self {
            Token::Text(text) => text,
            Token::Symbol(symbol) => &symbol.spelling,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Token::Symbol(symbol) => Some(*symbol),
            Token::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizerState {
    Content,
    MatchingSymbol,
    Eof,
}

/// Incremental tokenizer over one document.
///
/// Feed characters with [`Tokenizer::push`] and collect the tokens with
/// [`Tokenizer::finish`], which also resets the tokenizer for reuse.
pub struct Tokenizer<'t> {
    table: &'t SymbolTable,
    state: TokenizerState,
    buffer: String,
    carry: String,
    last_probe: TrieProbe,
    tokens: Vec<Token<'t>>,
}

impl<'t> Tokenizer<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self {
            table,
            state: TokenizerState::Content,
            buffer: String::new(),
            carry: String::new(),
            last_probe: TrieProbe::NotFound,
            tokens: Vec::new(),
        }
    }

    pub fn push(&mut self, c: char) {
        match self.state {
            TokenizerState::Content => self.push_content(c),
            TokenizerState::MatchingSymbol => self.push_matching(c),
            // finish() resets the state, so Eof is never observed here.
            TokenizerState::Eof => {
                self.state = TokenizerState::Content;
                self.push_content(c);
            }
        }
    }

    fn push_content(&mut self, c: char) {
        let probe = self.probe_char(c);
        if probe.is_candidate() {
            log::trace!("Symbol candidate {c:?} after {} text bytes", self.buffer.len());
            self.state = TokenizerState::MatchingSymbol;
            self.carry = std::mem::take(&mut self.buffer);
            self.buffer.push(c);
            self.last_probe = probe;
        } else {
            self.buffer.push(c);
        }
    }

    fn push_matching(&mut self, c: char) {
        let mut joined = self.buffer.clone();
        joined.push(c);
        let joined_probe = self.table.trie_probe(&joined);

        if joined_probe.is_candidate() {
            self.buffer = joined;
            self.last_probe = joined_probe;
            return;
        }

        let c_probe = self.probe_char(c);
        match self.last_probe {
            // last_probe tracks the buffer, which is never NotFound while matching.
            TrieProbe::Partial | TrieProbe::NotFound => {
                if c_probe.is_candidate() {
                    // The failed attempt becomes text; `c` starts a new candidate.
                    log::trace!("Prefix {:?} failed, restarting at {c:?}", self.buffer);
                    self.carry.push_str(&self.buffer);
                    self.buffer.clear();
                    self.buffer.push(c);
                    self.last_probe = c_probe;
                } else {
                    log::trace!("Prefix {:?} failed, back to content", self.buffer);
                    let mut text = std::mem::take(&mut self.carry);
                    text.push_str(&joined);
                    self.buffer = text;
                    self.state = TokenizerState::Content;
                }
            }
            TrieProbe::Complete => {
                self.emit_symbol();
                self.buffer.push(c);
                if c_probe.is_candidate() {
                    self.last_probe = c_probe;
                } else {
                    self.state = TokenizerState::Content;
                }
            }
        }
    }

    /// Emit the pending carry as text and the buffer as a symbol, leaving both empty.
    fn emit_symbol(&mut self) {
        if !self.carry.is_empty() {
            self.tokens.push(Token::Text(std::mem::take(&mut self.carry)));
        }
        match self.table.lookup_exact(&self.buffer) {
            Some(symbol) => {
                log::trace!("Emitting symbol {}", symbol.name);
                self.tokens.push(Token::Symbol(symbol));
                self.buffer.clear();
            }
            None => {
                // A complete probe always has a table entry.
                self.tokens.push(Token::Text(std::mem::take(&mut self.buffer)));
            }
        }
    }

    fn probe_char(&self, c: char) -> TrieProbe {
        let mut buf = [0u8; 4];
        self.table.trie_probe(c.encode_utf8(&mut buf))
    }

    /// Flush pending input and return the tokens, resetting for the next document.
    pub fn finish(&mut self) -> Vec<Token<'t>> {
        if self.state == TokenizerState::MatchingSymbol
            && self.table.trie_probe(&self.buffer) == TrieProbe::Complete
        {
            self.emit_symbol();
        } else {
            let mut rest = std::mem::take(&mut self.carry);
            rest.push_str(&self.buffer);
            if !rest.is_empty() {
                self.tokens.push(Token::Text(rest));
            }
        }

        self.state = TokenizerState::Eof;
        self.buffer.clear();
        self.carry.clear();
        self.last_probe = TrieProbe::NotFound;

        let tokens = std::mem::take(&mut self.tokens);
        log::debug!("Tokenized document into {} tokens", tokens.len());
        tokens
    }

    pub fn tokenize<I>(&mut self, chars: I) -> Vec<Token<'t>>
    where
        I: IntoIterator<Item = char>,
    {
        for c in chars {
            self.push(c);
        }
        self.finish()
    }
}

/// Tokenize a string with a fresh tokenizer.
pub fn tokenize_str<'t>(table: &'t SymbolTable, input: &str) -> Vec<Token<'t>> {
    Tokenizer::new(table).tokenize(input.chars())
}

/// Tokenize everything readable from `reader`.
pub fn tokenize_reader<'t, R: Read>(
    table: &'t SymbolTable,
    mut reader: R,
) -> io::Result<Vec<Token<'t>>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(tokenize_str(table, &input))
}

/// Concatenate token spellings; reproduces the tokenized input.
pub fn reconstruct(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::spelling).collect()
}
