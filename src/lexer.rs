//! 查询文本的词法分析器
//!
//! 输入是用户在搜索框里随手输入的任意文本，子句 `@job.id=412` 可能夹杂在普通文字中间。
//! 词法分析器从不失败：无法识别的字符一律产生 `Illegal` token，由语法分析器跳过。

use crate::ast::Command;
use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    /// 输入字符串中的当前位置（字节索引）
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// 返回当前位置的字符，不推进位置
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// 推进位置一个字符并返回该字符
    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    /// 跳过空白字符
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// 读取单词：字母、数字和下划线的连续序列
    fn read_word(&mut self, start: usize) -> Token<'a> {
        while let Some(c) = self.peek() {
            if is_word_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        Token {
            kind: TokenKind::Word(&self.input[start..self.position]),
            span: Span::new(start, self.position),
        }
    }
}

/// 与正则 `\w` 相同的字符类
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let start = self.position;

        let c = self.bump()?; // 到达输入末尾

        let token = match c {
            '@' => Token { kind: TokenKind::At, span: Span::new(start, self.position) },
            '.' => Token { kind: TokenKind::Dot, span: Span::new(start, self.position) },
            // 'x' 是字母，总是归入单词，因此乘法符号在词法层面无法出现
            '=' | '+' | '-' | '/' => match Command::from_symbol(c) {
                Some(command) => Token {
                    kind: TokenKind::Operator(command),
                    span: Span::new(start, self.position),
                },
                None => Token { kind: TokenKind::Illegal, span: Span::new(start, self.position) },
            },
            c if is_word_char(c) => self.read_word(start),
            _ => Token { kind: TokenKind::Illegal, span: Span::new(start, self.position) },
        };
        Some(token)
    }
}
