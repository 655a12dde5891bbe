use std::sync::LazyLock;

use memex::renderer::RenderOptions;
use memex::tokenizer::{reconstruct, tokenize_str};
use memex::{Config, Converter, Renderer, SymbolTable, Token, TrieProbe, dialect};
use proptest::prelude::*;

static TABLE: LazyLock<SymbolTable> =
    LazyLock::new(|| SymbolTable::new(dialect::symbols()).unwrap());

const DOCUMENTS: &[&str] = &[
    "",
    "plain text",
    "# Title\nBody",
    "*a* **b** ***c***",
    "\\\\\\ \\\\ \\* \\#",
    "{link (target)} [ext (https://x.org)] {{cite}} [[fig (alt)]]",
    "\"\"quote (who)\"\"",
    "``x",
    "\n\n\n",
    "unterminated *bold",
    "```\ncode\n```",
    "mixed ``` and ` and ``",
];

#[test]
fn tokens_reconstruct_input() {
    let table = SymbolTable::new(dialect::symbols()).unwrap();
    for doc in DOCUMENTS {
        let tokens = tokenize_str(&table, doc);
        assert_eq!(&reconstruct(&tokens), doc);
    }
}

#[test]
fn no_adjacent_text_tokens() {
    let table = SymbolTable::new(dialect::symbols()).unwrap();
    for doc in DOCUMENTS {
        let tokens = tokenize_str(&table, doc);
        for pair in tokens.windows(2) {
            assert!(
                !matches!(pair, [Token::Text(_), Token::Text(_)]),
                "adjacent text tokens in {doc:?}: {tokens:?}"
            );
        }
    }
}

#[test]
fn validation_agrees_with_rendering() {
    let table = SymbolTable::new(dialect::symbols()).unwrap();
    let renderer = Renderer::new(&table, RenderOptions::default());
    for doc in DOCUMENTS {
        let tokens = tokenize_str(&table, doc);
        assert_eq!(
            renderer.validate(&tokens).is_ok(),
            renderer.render(&tokens).is_ok(),
            "validate and render disagree on {doc:?}"
        );
    }
}

#[test]
fn closing_tags_are_emitted_in_reverse_order() {
    let html = memex::convert("*a **b {c (d)} e** f*", None).unwrap();
    assert_eq!(
        html,
        "<p><b>a <i>b <a class=\"internal\" href=\"d\">c</a> e</i> f</b></p>"
    );
}

#[test]
fn converter_is_reusable() {
    let converter = Converter::new(Config::default()).unwrap();
    assert!(converter.convert("*open").is_err());
    assert_eq!(converter.convert("*closed*").unwrap(), "<p><b>closed</b></p>");
    assert_eq!(
        converter.convert("*closed*").unwrap(),
        converter.convert("*closed*").unwrap()
    );
}

/// Pieces that exercise every symbol prefix, mixed with plain text.
fn document_strategy() -> impl Strategy<Value = String> {
    let pieces = vec![
        "#", "*", "\\", "\n", "{", "}", "[", "]", "\"", "`", "(", ")", " ", "a", "word", "é",
    ];
    prop::collection::vec(prop::sample::select(pieces), 0..48).prop_map(|parts| parts.concat())
}

fn has_adjacent_text(tokens: &[Token<'_>]) -> bool {
    tokens
        .windows(2)
        .any(|pair| matches!(pair, [Token::Text(_), Token::Text(_)]))
}

proptest! {
    #[test]
    fn any_input_reconstructs(input in document_strategy()) {
        let tokens = tokenize_str(&TABLE, &input);
        prop_assert_eq!(reconstruct(&tokens), input);
    }

    #[test]
    fn any_input_has_merged_text(input in document_strategy()) {
        let tokens = tokenize_str(&TABLE, &input);
        prop_assert!(!has_adjacent_text(&tokens), "tokens: {:?}", tokens);
    }

    #[test]
    fn any_input_validates_like_it_renders(input in document_strategy()) {
        let renderer = Renderer::new(&TABLE, RenderOptions::default());
        let tokens = tokenize_str(&TABLE, &input);
        prop_assert_eq!(renderer.validate(&tokens), renderer.render(&tokens).map(|_| ()));
    }

    #[test]
    fn any_sequence_of_spellings_reconstructs(
        spellings in prop::collection::vec(
            prop::sample::select(TABLE.iter().map(|s| s.spelling.clone()).collect::<Vec<_>>()),
            1..12,
        )
    ) {
        let input = spellings.concat();
        let tokens = tokenize_str(&TABLE, &input);
        prop_assert_eq!(reconstruct(&tokens), input);
        prop_assert!(!has_adjacent_text(&tokens));
    }
}

#[test]
fn symbols_separated_by_text_are_both_recognized() {
    for a in TABLE.iter() {
        for b in TABLE.iter() {
            let input = format!("{}x{}", a.spelling, b.spelling);
            let tokens = tokenize_str(&TABLE, &input);
            assert_eq!(
                tokens,
                [
                    Token::Symbol(a),
                    Token::Text("x".to_string()),
                    Token::Symbol(b)
                ],
                "tokens for {input:?}"
            );
        }
    }
}

#[test]
fn adjacent_symbols_split_where_the_trie_stops() {
    for a in TABLE.iter() {
        for b in TABLE.iter() {
            let first = b.spelling.chars().next().unwrap();
            if TABLE.trie_probe(&format!("{}{first}", a.spelling)) != TrieProbe::NotFound {
                continue;
            }
            let input = format!("{}{}", a.spelling, b.spelling);
            let tokens = tokenize_str(&TABLE, &input);
            assert_eq!(
                tokens,
                [Token::Symbol(a), Token::Symbol(b)],
                "tokens for {input:?}"
            );
        }
    }
}
