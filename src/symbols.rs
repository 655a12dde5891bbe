//! Symbol registry and the prefix trie built over symbol spellings.
//!
//! The table is built once from an ordered list of [`SymbolDef`]s and is
//! read-only afterwards. Both the tokenizer and the renderer borrow it.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How the renderer treats a symbol beyond its opening/closing tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Emits its tags in place, inside the surrounding paragraph.
    #[default]
    Inline,
    /// Opens only at the start of a line and ends with the line.
    LineBlock,
    /// Inline construct whose content is copied through as raw spellings.
    Verbatim,
    /// Block construct whose content is copied through as raw spellings.
    VerbatimBlock,
    /// Captures `label (argument)` and substitutes `$arg` into its tags.
    Template,
    SoftBreak,
    ParagraphBreak,
}

impl Role {
    pub fn is_block(self) -> bool {
        matches!(self, Role::LineBlock | Role::VerbatimBlock)
    }

    pub fn is_verbatim(self) -> bool {
        matches!(self, Role::Verbatim | Role::VerbatimBlock)
    }
}

/// One entry of the symbol table wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDef {
    pub name: String,
    pub spelling: String,
    #[serde(default)]
    pub opening_tag: Option<String>,
    #[serde(default)]
    pub closing_tag: Option<String>,
    #[serde(default)]
    pub closes_with: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl SymbolDef {
    pub fn new(name: impl Into<String>, spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spelling: spelling.into(),
            opening_tag: None,
            closing_tag: None,
            closes_with: None,
            role: Role::Inline,
        }
    }

    pub fn opening_tag(mut self, tag: impl Into<String>) -> Self {
        self.opening_tag = Some(tag.into());
        self
    }

    pub fn closing_tag(mut self, tag: impl Into<String>) -> Self {
        self.closing_tag = Some(tag.into());
        self
    }

    pub fn closes_with(mut self, name: impl Into<String>) -> Self {
        self.closes_with = Some(name.into());
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// A recognized markdown symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub spelling: String,
    pub opening_tag: Option<String>,
    pub closing_tag: Option<String>,
    pub closes_with: Option<String>,
    pub role: Role,
}

impl Symbol {
    pub fn has_closing_symbol(&self) -> bool {
        self.closes_with.is_some()
    }
}

impl From<SymbolDef> for Symbol {
    fn from(def: SymbolDef) -> Self {
        Self {
            name: def.name,
            spelling: def.spelling,
            opening_tag: def.opening_tag,
            closing_tag: def.closing_tag,
            closes_with: def.closes_with,
            role: def.role,
        }
    }
}

/// Classification of a candidate string against all known spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieProbe {
    /// No spelling equals or starts with the candidate.
    NotFound,
    /// The candidate is a proper prefix of some spelling, but not a spelling itself.
    Partial,
    /// The candidate is exactly the spelling of a symbol.
    Complete,
}

impl TrieProbe {
    pub fn is_candidate(self) -> bool {
        self != TrieProbe::NotFound
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Index into `SymbolTable::symbols` when a spelling ends here.
    terminal: Option<usize>,
}

impl TrieNode {
    fn walk(&self, candidate: &str) -> Option<&TrieNode> {
        let mut node = self;
        for c in candidate.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}

/// Configuration errors detected while building a [`SymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolTableError {
    DuplicateSpelling {
        spelling: String,
        first: String,
        second: String,
    },
    DuplicateName(String),
    EmptySpelling(String),
    UnknownCloser { symbol: String, closes_with: String },
}

impl fmt::Display for SymbolTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolTableError::DuplicateSpelling {
                spelling,
                first,
                second,
            } => write!(
                f,
                "ambiguous symbol table: '{first}' and '{second}' share the spelling {spelling:?}"
            ),
            SymbolTableError::DuplicateName(name) => {
                write!(f, "symbol name '{name}' is defined more than once")
            }
            SymbolTableError::EmptySpelling(name) => {
                write!(f, "symbol '{name}' has an empty spelling")
            }
            SymbolTableError::UnknownCloser {
                symbol,
                closes_with,
            } => write!(
                f,
                "symbol '{symbol}' closes with '{closes_with}', which is not in the table"
            ),
        }
    }
}

impl std::error::Error for SymbolTableError {}

/// Registry of symbols plus the prefix trie over their spellings.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_spelling: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    trie: TrieNode,
}

impl SymbolTable {
    pub fn new<I>(defs: I) -> Result<Self, SymbolTableError>
    where
        I: IntoIterator<Item = SymbolDef>,
    {
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut by_spelling = HashMap::new();
        let mut by_name = HashMap::new();
        let mut trie = TrieNode::default();

        for def in defs {
            if def.spelling.is_empty() {
                return Err(SymbolTableError::EmptySpelling(def.name));
            }
            if by_name.contains_key(&def.name) {
                return Err(SymbolTableError::DuplicateName(def.name));
            }
            if let Some(&existing) = by_spelling.get(&def.spelling) {
                let first: &Symbol = &symbols[existing];
                return Err(SymbolTableError::DuplicateSpelling {
                    spelling: def.spelling,
                    first: first.name.clone(),
                    second: def.name,
                });
            }

            let idx = symbols.len();
            let mut node = &mut trie;
            for c in def.spelling.chars() {
                node = node.children.entry(c).or_default();
            }
            node.terminal = Some(idx);

            by_spelling.insert(def.spelling.clone(), idx);
            by_name.insert(def.name.clone(), idx);
            symbols.push(def.into());
        }

        // Closers may be defined after their openers, so check once everything is in.
        for symbol in &symbols {
            if let Some(closer) = &symbol.closes_with
                && !by_name.contains_key(closer)
            {
                return Err(SymbolTableError::UnknownCloser {
                    symbol: symbol.name.clone(),
                    closes_with: closer.clone(),
                });
            }
        }

        log::debug!("Built symbol table with {} symbols", symbols.len());

        Ok(Self {
            symbols,
            by_spelling,
            by_name,
            trie,
        })
    }

    pub fn trie_probe(&self, candidate: &str) -> TrieProbe {
        match self.trie.walk(candidate) {
            None => TrieProbe::NotFound,
            Some(node) if node.terminal.is_some() => TrieProbe::Complete,
            Some(node) if !node.children.is_empty() => TrieProbe::Partial,
            // Only the root can be neither terminal nor branching.
            Some(_) => TrieProbe::NotFound,
        }
    }

    pub fn lookup_exact(&self, spelling: &str) -> Option<&Symbol> {
        self.by_spelling.get(spelling).map(|&idx| &self.symbols[idx])
    }

    pub fn exists(&self, spelling: &str) -> bool {
        self.by_spelling.contains_key(spelling)
    }

    pub fn get(&self, spelling: &str) -> Option<&Symbol> {
        self.lookup_exact(spelling)
    }

    pub fn by_name(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name).map(|&idx| &self.symbols[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
