//! Expression parsing - Pratt loop over binding powers.
//!
//! | Level | Operators | BP |
//! |-------|-----------------------------|-------|
//! | 1 | 要么 | 1, 2 |
//! | 2 | 还有 | 3, 4 |
//! | 3 | `==` `!=` 等于 不等 | 5, 6 |
//! | 4 | `<` `>` `<=` `>=` 大过 小过 大等于 小等于 | 7, 8 |
//! | 5 | `+` `-` 加 减 | 9, 10 |
//! | 6 | `*` `/` 乘 除 | 11, 12 |
//!
//! All levels are left-associative (right bp = left bp + 1). Unary `-` and
//! 不是 bind tighter than any binary operator.

use hzlang_lex::TokenKind;

use crate::ast::*;
use crate::{ParseError, Parser};

impl Parser {
    /// Parses a complete expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    /// Pratt core: parses an expression consuming only operators whose left
    /// binding power is at least `min_bp`.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let (_, rbp) = match self.infix_binding_power() {
                Some(bp) if bp.0 >= min_bp => bp,
                _ => break,
            };

            let op = match self.binop_for(self.kind()) {
                Some(op) => op,
                None => break,
            };
            self.advance();

            let rhs = self.parse_expr_bp(rbp)?;
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// Binding powers of the current token as an infix operator.
    fn infix_binding_power(&self) -> Option<(u8, u8)> {
        let bp = match self.kind() {
            TokenKind::Or => (1, 2),
            TokenKind::And => (3, 4),
            TokenKind::EqEq | TokenKind::NotEq => (5, 6),
            TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge => (7, 8),
            TokenKind::Plus | TokenKind::Minus => (9, 10),
            TokenKind::Star | TokenKind::Slash => (11, 12),
            _ => return None,
        };
        Some(bp)
    }

    fn binop_for(&self, kind: TokenKind) -> Option<BinOp> {
        let op = match kind {
            TokenKind::Or => BinOp::Or,
            TokenKind::And => BinOp::And,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Ge => BinOp::Ge,
            TokenKind::Le => BinOp::Le,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            _ => return None,
        };
        Some(op)
    }

    /// Prefix position: unary operators and primaries.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_prefix()?;
                Ok(Expr::Unary(UnaryExpr {
                    op: UnOp::Neg,
                    operand: Box::new(operand),
                }))
            }
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_prefix()?;
                Ok(Expr::Unary(UnaryExpr {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                }))
            }

            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr::Literal(Lit::Int(value)))
            }
            TokenKind::Float(value) => {
                self.advance();
                Ok(Expr::Literal(Lit::Float(value)))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(Expr::Literal(Lit::Str(value.as_str().to_string())))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Lit::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Lit::Bool(false)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal(Lit::Null))
            }

            TokenKind::Ident(name) => {
                self.advance();
                if self.match_kind(TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    Ok(Expr::Call(CallExpr { name, args }))
                } else {
                    Ok(Expr::Ident(name))
                }
            }

            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "'）'")?;
                Ok(inner)
            }

            _ => {
                let token = self.current();
                Err(ParseError::ExpectedExpression {
                    line: token.line(),
                    column: token.column(),
                })
            }
        }
    }

    /// Comma-separated arguments; the opening paren is already consumed.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "'）'")?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use hzlang_lex::tokenize;
    use hzlang_util::Symbol;

    fn parse_one(source: &str) -> Stmt {
        let program = parse(tokenize(source).unwrap()).unwrap();
        assert_eq!(program.statements.len(), 1, "{source}");
        program.statements.into_iter().next().unwrap()
    }

    fn parse_print_expr(source: &str) -> Expr {
        match parse_one(&format!("话说 {source}")) {
            Stmt::Print(expr) => expr,
            other => panic!("expected print, got {other:?}"),
        }
    }

    fn binary(expr: &Expr) -> &BinaryExpr {
        match expr {
            Expr::Binary(b) => b,
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn literals() {
        assert_eq!(parse_print_expr("42"), Expr::Literal(Lit::Int(42)));
        assert_eq!(parse_print_expr("3.14"), Expr::Literal(Lit::Float(3.14)));
        assert_eq!(
            parse_print_expr("\"你好\""),
            Expr::Literal(Lit::Str("你好".to_string()))
        );
        assert_eq!(parse_print_expr("真的"), Expr::Literal(Lit::Bool(true)));
        assert_eq!(parse_print_expr("造话"), Expr::Literal(Lit::Bool(false)));
        assert_eq!(parse_print_expr("空的"), Expr::Literal(Lit::Null));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 甲 加 乙 乘 丙 → 甲 + (乙 * 丙)
        let expr = parse_print_expr("甲 加 乙 乘 丙");
        let top = binary(&expr);
        assert_eq!(top.op, BinOp::Add);
        assert_eq!(binary(&top.right).op, BinOp::Mul);
    }

    #[test]
    fn additive_is_left_associative() {
        // 10 减 3 减 2 → (10 - 3) - 2
        let expr = parse_print_expr("10 减 3 减 2");
        let top = binary(&expr);
        assert_eq!(top.op, BinOp::Sub);
        assert_eq!(binary(&top.left).op, BinOp::Sub);
        assert_eq!(*top.right, Expr::Literal(Lit::Int(2)));
    }

    #[test]
    fn word_and_symbol_operators_parse_identically() {
        assert_eq!(parse_print_expr("甲 加 乙"), parse_print_expr("甲 + 乙"));
        assert_eq!(parse_print_expr("甲 大过 乙"), parse_print_expr("甲 > 乙"));
        assert_eq!(parse_print_expr("甲 等于 乙"), parse_print_expr("甲 == 乙"));
    }

    #[test]
    fn logical_ladder_sits_below_comparison() {
        // 甲 大过 1 还有 乙 小过 2 要么 丙
        // → ((甲 > 1) and (乙 < 2)) or 丙
        let expr = parse_print_expr("甲 大过 1 还有 乙 小过 2 要么 丙");
        let top = binary(&expr);
        assert_eq!(top.op, BinOp::Or);
        let left = binary(&top.left);
        assert_eq!(left.op, BinOp::And);
        assert_eq!(binary(&left.left).op, BinOp::Gt);
        assert_eq!(binary(&left.right).op, BinOp::Lt);
    }

    #[test]
    fn unary_binds_tighter_than_binary() {
        // 不是 甲 还有 乙 → (not 甲) and 乙
        let expr = parse_print_expr("不是 甲 还有 乙");
        let top = binary(&expr);
        assert_eq!(top.op, BinOp::And);
        assert!(matches!(
            &*top.left,
            Expr::Unary(UnaryExpr { op: UnOp::Not, .. })
        ));

        // -2 乘 3 → (-2) * 3
        let expr = parse_print_expr("-2 乘 3");
        let top = binary(&expr);
        assert_eq!(top.op, BinOp::Mul);
        assert!(matches!(
            &*top.left,
            Expr::Unary(UnaryExpr { op: UnOp::Neg, .. })
        ));
    }

    #[test]
    fn parentheses_override_precedence() {
        // (甲 加 乙) 乘 丙
        let expr = parse_print_expr("(甲 加 乙) 乘 丙");
        let top = binary(&expr);
        assert_eq!(top.op, BinOp::Mul);
        assert_eq!(binary(&top.left).op, BinOp::Add);
    }

    #[test]
    fn calls_with_fullwidth_punctuation() {
        let expr = parse_print_expr("算账（3，4）");
        match expr {
            Expr::Call(call) => {
                assert_eq!(call.name, Symbol::intern("算账"));
                assert_eq!(call.args.len(), 2);
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn nested_calls() {
        let expr = parse_print_expr("求根(绝对值(-9))");
        match expr {
            Expr::Call(outer) => {
                assert_eq!(outer.args.len(), 1);
                assert!(matches!(outer.args[0], Expr::Call(_)));
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn missing_operand_is_positioned() {
        let err = parse(tokenize("话说 1 加").unwrap()).unwrap_err();
        assert_eq!(
            err,
            ParseError::ExpectedExpression { line: 1, column: 7 }
        );
    }
}
