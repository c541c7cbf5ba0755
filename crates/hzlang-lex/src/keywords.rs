//! The dialect keyword table.
//!
//! One flat table maps every reserved word to its token kind. The lexer
//! consults it to classify identifier-like runs; the parser never sees the
//! words themselves, only the kinds (the spelling survives in each token's
//! lexeme).
//!
//! 还有 historically carried two roles (logical-and and an elif marker); it is
//! declared here once, as the connective. Should a future edit give any
//! lexeme two kinds, the table builder logs a warning and keeps the first.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::token::TokenKind;

/// Every reserved word of the language and the kind it lexes to.
pub static KEYWORDS: &[(&str, TokenKind)] = &[
    // Declaration and assignment
    ("老倌", TokenKind::Var),
    ("装", TokenKind::Assign),
    ("摆", TokenKind::Assign),
    ("安", TokenKind::Assign),
    ("搁", TokenKind::Assign),
    // Output
    ("话说", TokenKind::Print),
    // Conditionals
    ("特为", TokenKind::If),
    ("要是", TokenKind::If),
    ("不然", TokenKind::Else),
    // Loops
    ("一息息", TokenKind::While),
    // Functions
    ("会做事", TokenKind::FuncDef),
    ("做事体", TokenKind::FuncDef),
    ("介个套", TokenKind::FuncDef),
    ("有数", TokenKind::Return),
    ("晓得", TokenKind::Return),
    // Block terminator
    ("完了", TokenKind::BlockEnd),
    // Comparison words
    ("大过", TokenKind::Gt),
    ("小过", TokenKind::Lt),
    ("大等于", TokenKind::Ge),
    ("小等于", TokenKind::Le),
    ("等于", TokenKind::EqEq),
    ("不等", TokenKind::NotEq),
    // Arithmetic words
    ("加", TokenKind::Plus),
    ("减", TokenKind::Minus),
    ("乘", TokenKind::Star),
    ("除", TokenKind::Slash),
    // Logical connectives
    ("还有", TokenKind::And),
    ("要么", TokenKind::Or),
    ("不是", TokenKind::Not),
    // Literal words
    ("真的", TokenKind::True),
    ("假的", TokenKind::False),
    ("造话", TokenKind::False),
    ("空的", TokenKind::Null),
    // Flow words without statement forms
    ("跳出", TokenKind::Break),
    ("歇力", TokenKind::Break),
    ("继续", TokenKind::Continue),
];

fn table() -> &'static FxHashMap<&'static str, TokenKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = FxHashMap::default();
        for &(word, kind) in KEYWORDS {
            if let Some(previous) = map.insert(word, kind) {
                if previous != kind {
                    tracing::warn!(
                        word,
                        ?previous,
                        now = ?kind,
                        "keyword declared with two roles, keeping the later one"
                    );
                }
            }
        }
        map
    })
}

/// Looks up the token kind for a reserved word, if it is one.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    table().get(word).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_keywords_resolve() {
        assert_eq!(keyword_kind("老倌"), Some(TokenKind::Var));
        assert_eq!(keyword_kind("话说"), Some(TokenKind::Print));
        assert_eq!(keyword_kind("特为"), Some(TokenKind::If));
        assert_eq!(keyword_kind("要是"), Some(TokenKind::If));
        assert_eq!(keyword_kind("不然"), Some(TokenKind::Else));
        assert_eq!(keyword_kind("一息息"), Some(TokenKind::While));
        assert_eq!(keyword_kind("完了"), Some(TokenKind::BlockEnd));
    }

    #[test]
    fn assignment_synonyms_share_a_kind() {
        for word in ["装", "摆", "安", "搁"] {
            assert_eq!(keyword_kind(word), Some(TokenKind::Assign), "{word}");
        }
    }

    #[test]
    fn function_words_share_a_kind() {
        for word in ["会做事", "做事体", "介个套"] {
            assert_eq!(keyword_kind(word), Some(TokenKind::FuncDef), "{word}");
        }
        assert_eq!(keyword_kind("有数"), Some(TokenKind::Return));
        assert_eq!(keyword_kind("晓得"), Some(TokenKind::Return));
    }

    #[test]
    fn operator_words_map_to_operator_kinds() {
        assert_eq!(keyword_kind("加"), Some(TokenKind::Plus));
        assert_eq!(keyword_kind("减"), Some(TokenKind::Minus));
        assert_eq!(keyword_kind("乘"), Some(TokenKind::Star));
        assert_eq!(keyword_kind("除"), Some(TokenKind::Slash));
        assert_eq!(keyword_kind("大过"), Some(TokenKind::Gt));
        assert_eq!(keyword_kind("小等于"), Some(TokenKind::Le));
        assert_eq!(keyword_kind("等于"), Some(TokenKind::EqEq));
        assert_eq!(keyword_kind("不等"), Some(TokenKind::NotEq));
    }

    #[test]
    fn and_word_is_the_logical_connective() {
        assert_eq!(keyword_kind("还有"), Some(TokenKind::And));
    }

    #[test]
    fn literal_words_resolve() {
        assert_eq!(keyword_kind("真的"), Some(TokenKind::True));
        assert_eq!(keyword_kind("假的"), Some(TokenKind::False));
        assert_eq!(keyword_kind("造话"), Some(TokenKind::False));
        assert_eq!(keyword_kind("空的"), Some(TokenKind::Null));
    }

    #[test]
    fn ordinary_words_are_not_keywords() {
        assert_eq!(keyword_kind("张三"), None);
        assert_eq!(keyword_kind("结果"), None);
        // import words are deliberately not part of the language
        assert_eq!(keyword_kind("进来"), None);
        assert_eq!(keyword_kind("从"), None);
    }
}
