//! Statement parsing.

use hzlang_lex::TokenKind;

use crate::ast::*;
use crate::{ParseError, Parser};

impl Parser {
    /// Parses one statement.
    ///
    /// Returns `Ok(None)` for inputs that parse but produce nothing: a bare
    /// identifier (or other non-call expression) in statement position.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        match self.kind() {
            TokenKind::Var => self.parse_var_decl().map(Some),
            TokenKind::Print => self.parse_print().map(Some),
            TokenKind::If => self.parse_if().map(Some),
            TokenKind::While => self.parse_while().map(Some),
            TokenKind::FuncDef => self.parse_func_def().map(Some),
            TokenKind::Return => self.parse_return().map(Some),
            TokenKind::Break | TokenKind::Continue => {
                let token = self.current();
                Err(ParseError::Unsupported {
                    word: token.lexeme.clone(),
                    line: token.line(),
                    column: token.column(),
                })
            }
            TokenKind::Ident(_) => self.parse_assign_or_expr(),
            _ => Err(self.error_unexpected()),
        }
    }

    /// 老倌 name [装 expr]
    fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let name = self.expect_ident("变量名")?;

        let init = if self.match_kind(TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Stmt::VarDecl(VarDecl { name, init }))
    }

    /// 话说 [：] expr
    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        // The colon after 话说 is optional flavor.
        self.match_kind(TokenKind::Colon);
        let expr = self.parse_expr()?;
        Ok(Stmt::Print(expr))
    }

    /// 特为 expr ：body [不然 ：body] [完了]
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Colon, "'：'")?;

        let then_branch = self.parse_body(&[TokenKind::Else, TokenKind::BlockEnd])?;

        let else_branch = if self.match_kind(TokenKind::Else) {
            self.expect(TokenKind::Colon, "'：'")?;
            Some(self.parse_body(&[TokenKind::BlockEnd])?)
        } else {
            None
        };

        self.match_kind(TokenKind::BlockEnd);

        Ok(Stmt::If(IfStmt {
            cond,
            then_branch,
            else_branch,
        }))
    }

    /// 一息息 expr ：body [完了]
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Colon, "'：'")?;

        let body = self.parse_body(&[TokenKind::BlockEnd])?;
        self.match_kind(TokenKind::BlockEnd);

        Ok(Stmt::While(WhileStmt { cond, body }))
    }

    /// 会做事 name（[老倌] p {，[老倌] p}）：body [完了]
    fn parse_func_def(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let name = self.expect_ident("函数名")?;
        self.expect(TokenKind::LParen, "'（'")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                // The declarator before a parameter name is optional noise.
                self.match_kind(TokenKind::Var);
                params.push(self.expect_ident("参数名")?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen, "'）'")?;
        self.expect(TokenKind::Colon, "'：'")?;

        let body = self.parse_body(&[TokenKind::BlockEnd])?;
        self.match_kind(TokenKind::BlockEnd);

        Ok(Stmt::FuncDef(FuncDef { name, params, body }))
    }

    /// 有数 [expr]
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.advance();

        let value = match self.kind() {
            TokenKind::Newline
            | TokenKind::Comment
            | TokenKind::Eof
            | TokenKind::BlockEnd
            | TokenKind::Else => None,
            _ => Some(self.parse_expr()?),
        };

        Ok(Stmt::Return(value))
    }

    /// Either `name 装 expr` or an expression in statement position.
    ///
    /// Calls survive as statements (their value is discarded); anything else
    /// parses to nothing.
    fn parse_assign_or_expr(&mut self) -> Result<Option<Stmt>, ParseError> {
        if self.peek_kind() == TokenKind::Assign {
            let name = self.expect_ident("变量名")?;
            self.advance(); // the assignment marker
            let value = self.parse_expr()?;
            return Ok(Some(Stmt::Assign(Assign { name, value })));
        }

        let expr = self.parse_expr()?;
        match expr {
            Expr::Call(_) => Ok(Some(Stmt::Expr(expr))),
            _ => Ok(None),
        }
    }

    /// Parses a colon-introduced body until one of `stops` or end of input.
    /// The caller consumes the stop token.
    fn parse_body(&mut self, stops: &[TokenKind]) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        self.skip_trivia();
        while !self.at_end() && !stops.contains(&self.kind()) {
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
            self.skip_trivia();
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use hzlang_lex::tokenize;
    use hzlang_util::Symbol;

    fn parse_ok(source: &str) -> Vec<Stmt> {
        parse(tokenize(source).unwrap()).unwrap().statements
    }

    #[test]
    fn var_decl_with_and_without_init() {
        let stmts = parse_ok("老倌 甲 装 10\n老倌 乙");
        match &stmts[0] {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.name, Symbol::intern("甲"));
                assert!(decl.init.is_some());
            }
            other => panic!("{other:?}"),
        }
        match &stmts[1] {
            Stmt::VarDecl(decl) => assert!(decl.init.is_none()),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn assignment_marker_synonyms() {
        for marker in ["装", "摆", "安", "搁"] {
            let stmts = parse_ok(&format!("甲 {marker} 5"));
            assert!(matches!(stmts[0], Stmt::Assign(_)), "{marker}");
        }
    }

    #[test]
    fn print_accepts_optional_colon() {
        assert_eq!(parse_ok("话说 1"), parse_ok("话说：1"));
    }

    #[test]
    fn flat_if_else_runs_to_end_of_input() {
        let stmts = parse_ok("特为 甲 大过 18：\n    话说 \"成年\"\n不然：\n    话说 \"未成年\"");
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            Stmt::If(stmt) => {
                assert_eq!(stmt.then_branch.len(), 1);
                assert_eq!(stmt.else_branch.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn terminator_closes_the_innermost_body() {
        let source = "一息息 甲 大过 0：\n    特为 甲 等于 1：\n        话说 1\n    完了\n    甲 装 甲 减 1\n完了\n话说 \"好了\"";
        let stmts = parse_ok(source);
        assert_eq!(stmts.len(), 2);
        match &stmts[0] {
            Stmt::While(stmt) => {
                assert_eq!(stmt.body.len(), 2);
                assert!(matches!(stmt.body[0], Stmt::If(_)));
                assert!(matches!(stmt.body[1], Stmt::Assign(_)));
            }
            other => panic!("{other:?}"),
        }
        assert!(matches!(stmts[1], Stmt::Print(_)));
    }

    #[test]
    fn func_def_accepts_optional_param_declarators() {
        let with = parse_ok("会做事 算账（老倌 甲，老倌 乙）：\n    有数 甲 加 乙");
        let without = parse_ok("会做事 算账（甲，乙）：\n    有数 甲 加 乙");
        assert_eq!(with, without);
        match &with[0] {
            Stmt::FuncDef(def) => {
                assert_eq!(def.params, vec![Symbol::intern("甲"), Symbol::intern("乙")]);
                assert!(matches!(def.body[0], Stmt::Return(Some(_))));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn return_without_value() {
        let stmts = parse_ok("会做事 空手（）：\n    有数\n完了");
        match &stmts[0] {
            Stmt::FuncDef(def) => assert_eq!(def.body, vec![Stmt::Return(None)]),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn call_survives_in_statement_position() {
        let stmts = parse_ok("打招呼（\"小明\"）");
        assert!(matches!(stmts[0], Stmt::Expr(Expr::Call(_))));
    }

    #[test]
    fn bare_identifier_produces_no_statement() {
        assert!(parse_ok("甲").is_empty());
    }

    #[test]
    fn break_words_are_reported_unsupported() {
        let err = parse(tokenize("跳出").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { .. }));
        let err = parse(tokenize("继续").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { .. }));
    }

    #[test]
    fn missing_colon_is_an_error() {
        let err = parse(tokenize("特为 甲 大过 1\n话说 1").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Expected { .. }));
    }

    #[test]
    fn comments_and_newlines_are_skipped() {
        let stmts = parse_ok("# 开头说明\n\n老倌 甲 装 1\n# 中间说明\n话说 甲\n");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn parsing_is_deterministic() {
        let source = "会做事 算账（甲，乙）：\n    有数 甲 加 乙\n完了\n话说 算账（3，4）";
        let first = parse(tokenize(source).unwrap()).unwrap();
        let second = parse(tokenize(source).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
