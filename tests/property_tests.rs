// Property tests for the tokenizer

use proptest::prelude::*;
use sprig::config::KEYWORDS;
use sprig::parser::lexer::LexemeKind;
use sprig::tokenize;

proptest! {
    #[test]
    fn tokenizing_is_lossless(source in "[a-z0-9_ =!,()\n#]{0,64}") {
        let lexemes = tokenize(&source, "prop").expect("every character here is accepted");
        let joined: String = lexemes.iter().map(|l| l.string.as_str()).collect();
        prop_assert_eq!(joined, source);
    }

    #[test]
    fn successful_tokenizing_is_lossless(source in "[a-z0-9 =.,()\\[\\]{}\n#'\"\\\\]{0,64}") {
        if let Ok(lexemes) = tokenize(&source, "prop") {
            let joined: String = lexemes.iter().map(|l| l.string.as_str()).collect();
            prop_assert_eq!(joined, source);
        }
    }

    #[test]
    fn spans_cover_significant_text(source in "[a-z0-9 =!,()\n#]{0,64}") {
        let lexemes = tokenize(&source, "prop").expect("every character here is accepted");
        for lexeme in &lexemes {
            prop_assert_eq!(&source[lexeme.start..lexeme.stop], lexeme.text());
        }
    }

    #[test]
    fn keywords_are_classified(
        words in proptest::collection::vec(
            prop_oneof![
                proptest::sample::select(KEYWORDS.to_vec()).prop_map(String::from),
                "[a-z_][a-z0-9_]{0,6}",
            ],
            0..12,
        )
    ) {
        let source = words.join(" ");
        let lexemes = tokenize(&source, "prop").expect("words are always accepted");
        for lexeme in lexemes.iter().filter(|l| matches!(l.kind, LexemeKind::Word | LexemeKind::Keyword)) {
            let is_keyword = KEYWORDS.contains(&lexeme.text());
            prop_assert_eq!(lexeme.kind == LexemeKind::Keyword, is_keyword);
        }
    }

    #[test]
    fn newlines_carry_following_indent(indents in proptest::collection::vec(0usize..8, 1..6)) {
        let source: String = indents
            .iter()
            .map(|n| format!("{}x", " ".repeat(*n)))
            .collect::<Vec<_>>()
            .join("\n");
        let lexemes = tokenize(&source, "prop").expect("indentation is always accepted");
        let numbers: Vec<usize> = lexemes
            .iter()
            .filter(|l| l.kind == LexemeKind::Newline)
            .map(|l| l.number)
            .collect();
        prop_assert_eq!(numbers, indents);
    }
}
