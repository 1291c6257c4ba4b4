//! 查询文本的语法分析器
//!
//! ## 匹配流程
//!
//! ```text
//! parse()
//!   └─ clauses() → 反复调用 next_clause()
//!        ├─ 跳过直到遇到 '@'
//!        ├─ 期望紧邻的 Word       (物种)
//!        ├─ 期望紧邻的 '.'
//!        ├─ 期望紧邻的 Word       (字段)
//!        ├─ 期望紧邻的 '='
//!        ├─ 期望紧邻的 Word，取其开头的 ASCII 数字 (值)
//!        │
//!        ├─ 成功 → 产出 Clause，从值之后继续扫描
//!        └─ 失败 → 从该 '@' 之后的下一个 token 重新扫描
//! ```
//!
//! 每个 Clause 交给 [`builder::build`] 转换为组件，有效组件插入 [`ComponentSet`]。
//!
//! ## 语法
//!
//! ```text
//! @<species>.<column>=<digits>
//! ```
//!
//! - 子句内部不允许出现空白：`@job. id=1` 不匹配
//! - 子句之间可以是任意文本
//! - 值部分必须以数字开头：`@job.id=412abc` 取 `412`，`@job.id=abc` 不匹配
//!
//! ## 解析示例
//!
//! ```text
//! // 单个子句
//! @job.id=412
//!
//! // 夹杂在普通文字中
//! show me @job.id=412 and @task.id=9 please
//! ```

use crate::ast::{Clause, Command, ComponentSet};
use crate::builder;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// `'t` 是 token 切片的生命周期，`'a` 是原始输入的生命周期
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// 返回当前 token，不推进位置
    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.position)
    }

    /// 返回当前 token 并推进位置
    fn advance(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// 当前 token 紧邻 `previous` 时返回它并推进位置
    fn advance_adjacent(&mut self, previous: Span) -> Option<&'t Token<'a>> {
        let token = self.peek()?;
        if previous.touches(&token.span) {
            self.position += 1;
            Some(token)
        } else {
            None
        }
    }

    /// 期望紧邻的单词 token
    fn expect_word(&mut self, previous: Span) -> Option<(&'a str, Span)> {
        let token = self.advance_adjacent(previous)?;
        match token.kind {
            TokenKind::Word(word) => Some((word, token.span)),
            _ => None,
        }
    }

    /// 期望紧邻的特定 token
    fn expect_kind(&mut self, previous: Span, expected: TokenKind<'a>) -> Option<Span> {
        let token = self.advance_adjacent(previous)?;
        if token.kind == expected {
            Some(token.span)
        } else {
            None
        }
    }

    /// 从 '@' 之后尝试匹配一个完整子句
    fn match_clause(&mut self, at: Span) -> Option<Clause<'a>> {
        let (species, species_span) = self.expect_word(at)?;
        let dot = self.expect_kind(species_span, TokenKind::Dot)?;
        let (column, column_span) = self.expect_word(dot)?;
        let op = self.expect_kind(column_span, TokenKind::Operator(Command::Equals))?;
        let (value, value_span) = self.expect_word(op)?;

        let digits_len = value
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits_len == 0 {
            return None;
        }

        Some(Clause {
            species,
            column,
            digits: &value[..digits_len],
            span: Span::new(at.start, value_span.start + digits_len),
        })
    }

    /// 返回下一个匹配的子句；输入结束时返回 `None`
    pub fn next_clause(&mut self) -> Option<Clause<'a>> {
        while let Some(token) = self.advance() {
            if token.kind != TokenKind::At {
                continue;
            }
            let at = token.span;
            let resume = self.position;
            match self.match_clause(at) {
                Some(clause) => return Some(clause),
                None => self.position = resume, // 回到 '@' 之后继续扫描
            }
        }
        None
    }

    /// 收集剩余输入中的全部子句（从左到右，不重叠）
    pub fn clauses(&mut self) -> Vec<Clause<'a>> {
        std::iter::from_fn(|| self.next_clause()).collect()
    }

    pub fn parse(&mut self) -> ComponentSet {
        self.clauses()
            .iter()
            .filter_map(builder::build)
            .collect()
    }
}

/// 解析查询文本得到组件集合；对任意输入都不会失败
pub fn parse(query: &str) -> ComponentSet {
    let tokens: Vec<_> = Lexer::new(query).collect();
    Parser::new(&tokens).parse()
}

/// 返回查询文本中全部子句的原始捕获，便于调用方高亮显示
pub fn clauses(query: &str) -> Vec<Clause<'_>> {
    let tokens: Vec<_> = Lexer::new(query).collect();
    Parser::new(&tokens).clauses()
}
