use std::fmt;
use std::rc::Rc;

use crate::ast::{
    ArrayLiteral, BlockStatement, BooleanLiteral, CallExpression, Expression,
    ExpressionStatement, FunctionLiteral, Identifier, IfExpression, IndexExpression,
    InfixExpression, IntegerLiteral, LetStatement, PrefixExpression, Program,
    ReturnStatement, Statement, StringLiteral,
};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// A single parse failure. The parser accumulates these and keeps going; it
/// never panics on malformed input.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    Expected { expected: TokenKind, got: TokenKind },
    NoPrefixFn(TokenKind),
    IntegerOutOfRange(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Expected { expected, got } => {
                write!(
                    f,
                    "expected next token to be {}, got {} instead",
                    expected, got
                )
            }
            ParseError::NoPrefixFn(kind) => {
                write!(f, "no prefix parse function for {} found", kind)
            }
            ParseError::IntegerOutOfRange(literal) => {
                write!(f, "could not parse \"{}\" as integer", literal)
            }
        }
    }
}

type ParseResult<T> = Result<T, ParseError>;

type PrefixFn = fn(parser: &mut Parser<'_>) -> ParseResult<Expression>;
type InfixFn = fn(parser: &mut Parser<'_>, left: Expression) -> ParseResult<Expression>;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::EqualEqual => Precedence::Equals,
            TokenKind::BangEqual => Precedence::Equals,
            TokenKind::LessThan => Precedence::LessGreater,
            TokenKind::GreaterThan => Precedence::LessGreater,
            TokenKind::Plus => Precedence::Sum,
            TokenKind::Minus => Precedence::Sum,
            TokenKind::Slash => Precedence::Product,
            TokenKind::Star => Precedence::Product,
            TokenKind::LeftParen => Precedence::Call,
            TokenKind::LeftBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// Parse a source string into a program plus whatever errors were collected
/// along the way. Callers must not evaluate the program when the error list
/// is non-empty.
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Pratt parser with two-token lookahead over the lexer's token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,

    current_token: Token,
    peek_token: Token,

    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
        let mut parser = Parser {
            lexer,
            current_token: Token::eof(),
            peek_token: Token::eof(),
            errors: Vec::new(),
        };

        // Prime current and peek.
        parser.next_token();
        parser.next_token();

        parser
    }

    /// Parse the entire input as a program. A statement that fails to parse
    /// records its error and the loop continues with the next token.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_token_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => program.statements.push(statement),
                Err(error) => self.errors.push(error),
            }
            self.next_token();
        }

        program
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        let token = self.current_token.clone();

        self.expect_peek(TokenKind::Identifier)?;
        let name = self.current_identifier();

        self.expect_peek(TokenKind::Equal)?;

        // Consume the equal sign
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Ok(Statement::Let(LetStatement { token, name, value }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let token = self.current_token.clone();

        // Consume the `return` token
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Ok(Statement::Return(ReturnStatement { token, value }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let token = self.current_token.clone();

        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Ok(Statement::Expression(ExpressionStatement { token, expression }))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let prefix = Self::prefix_fn(self.current_token.kind)
            .ok_or(ParseError::NoPrefixFn(self.current_token.kind))?;

        let mut left = prefix(self)?;

        // The last token of `left` is still current_token here; the Pratt
        // climb decides whether the peek token binds tighter.
        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match Self::infix_fn(self.peek_token.kind) {
                Some(infix) => infix,
                None => return Ok(left),
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    /// Get the matching prefix parsing function for the given token kind.
    fn prefix_fn(kind: TokenKind) -> Option<PrefixFn> {
        match kind {
            TokenKind::Identifier => Some(Parser::parse_identifier),
            TokenKind::Int => Some(Parser::parse_integer_literal),
            TokenKind::String => Some(Parser::parse_string_literal),
            TokenKind::True | TokenKind::False => Some(Parser::parse_boolean),

            TokenKind::Bang | TokenKind::Minus => Some(Parser::parse_prefix_expression),

            TokenKind::LeftParen => Some(Parser::parse_grouped_expression),
            TokenKind::LeftBracket => Some(Parser::parse_array_literal),

            TokenKind::If => Some(Parser::parse_if_expression),
            TokenKind::Function => Some(Parser::parse_function_literal),

            _ => None,
        }
    }

    /// Get the matching infix parsing function for the given token kind.
    fn infix_fn(kind: TokenKind) -> Option<InfixFn> {
        match kind {
            TokenKind::LeftParen => Some(Parser::parse_call_expression),
            TokenKind::LeftBracket => Some(Parser::parse_index_expression),

            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Slash
            | TokenKind::Star
            | TokenKind::EqualEqual
            | TokenKind::BangEqual
            | TokenKind::LessThan
            | TokenKind::GreaterThan => Some(Parser::parse_infix_expression),

            _ => None,
        }
    }

    fn parse_identifier(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        Ok(Expression::Identifier(parser.current_identifier()))
    }

    fn parse_integer_literal(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();

        // An out-of-range literal is recorded as an error, but a zero-valued
        // node is still emitted; callers check the error list.
        let value = match token.literal.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                parser
                    .errors
                    .push(ParseError::IntegerOutOfRange(token.literal.clone()));
                0
            }
        };

        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_string_literal(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();
        let value = token.literal.clone();
        Ok(Expression::String(StringLiteral { token, value }))
    }

    fn parse_boolean(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();
        let value = token.kind == TokenKind::True;
        Ok(Expression::Boolean(BooleanLiteral { token, value }))
    }

    fn parse_prefix_expression(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();
        let operator = token.literal.clone();

        // Consume the operator token
        parser.next_token();

        let right = parser.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(Box::new(PrefixExpression {
            token,
            operator,
            right,
        })))
    }

    fn parse_infix_expression(
        parser: &mut Parser<'_>,
        left: Expression,
    ) -> ParseResult<Expression> {
        let token = parser.current_token.clone();
        let operator = token.literal.clone();
        let precedence = parser.current_precedence();

        parser.next_token();

        let right = parser.parse_expression(precedence)?;

        Ok(Expression::Infix(Box::new(InfixExpression {
            token,
            left,
            operator,
            right,
        })))
    }

    fn parse_grouped_expression(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        // Consume the left parenthesis
        parser.next_token();

        let expression = parser.parse_expression(Precedence::Lowest)?;

        parser.expect_peek(TokenKind::RightParen)?;

        Ok(expression)
    }

    fn parse_if_expression(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();

        parser.expect_peek(TokenKind::LeftParen)?;

        // Consume the left parenthesis
        parser.next_token();
        let condition = parser.parse_expression(Precedence::Lowest)?;

        parser.expect_peek(TokenKind::RightParen)?;
        parser.expect_peek(TokenKind::LeftBrace)?;

        let consequence = parser.parse_block_statement();

        let alternative = if parser.peek_token_is(TokenKind::Else) {
            // Consume the `else` token
            parser.next_token();

            parser.expect_peek(TokenKind::LeftBrace)?;

            Some(parser.parse_block_statement())
        } else {
            None
        };

        Ok(Expression::If(Box::new(IfExpression {
            token,
            condition,
            consequence,
            alternative,
        })))
    }

    /// Parse statements until the closing brace or end of input. A missing
    /// closing brace is tolerated; statements simply run to end of input.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current_token.clone();
        let mut statements = Vec::new();

        // Consume the left brace
        self.next_token();

        while !self.current_token_is(TokenKind::RightBrace)
            && !self.current_token_is(TokenKind::Eof)
        {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => self.errors.push(error),
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    fn parse_function_literal(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();

        parser.expect_peek(TokenKind::LeftParen)?;

        let parameters = parser.parse_function_parameters()?;

        parser.expect_peek(TokenKind::LeftBrace)?;

        let body = Rc::new(parser.parse_block_statement());

        Ok(Expression::Function(Box::new(FunctionLiteral {
            token,
            parameters,
            body,
        })))
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut identifiers = Vec::new();

        // No parameters, parentheses close immediately
        if self.peek_token_is(TokenKind::RightParen) {
            self.next_token();
            return Ok(identifiers);
        }

        self.expect_peek(TokenKind::Identifier)?;
        identifiers.push(self.current_identifier());

        while self.peek_token_is(TokenKind::Comma) {
            // Consume the comma
            self.next_token();
            self.expect_peek(TokenKind::Identifier)?;
            identifiers.push(self.current_identifier());
        }

        self.expect_peek(TokenKind::RightParen)?;

        Ok(identifiers)
    }

    fn parse_call_expression(
        parser: &mut Parser<'_>,
        function: Expression,
    ) -> ParseResult<Expression> {
        let token = parser.current_token.clone();
        let arguments = parser.parse_expression_list(TokenKind::RightParen)?;

        Ok(Expression::Call(Box::new(CallExpression {
            token,
            function,
            arguments,
        })))
    }

    fn parse_array_literal(parser: &mut Parser<'_>) -> ParseResult<Expression> {
        let token = parser.current_token.clone();
        let elements = parser.parse_expression_list(TokenKind::RightBracket)?;

        Ok(Expression::Array(Box::new(ArrayLiteral { token, elements })))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();

        // Empty list, terminator follows immediately
        if self.peek_token_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenKind::Comma) {
            // Consume the previous expression and the comma
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;

        Ok(list)
    }

    fn parse_index_expression(
        parser: &mut Parser<'_>,
        left: Expression,
    ) -> ParseResult<Expression> {
        let token = parser.current_token.clone();

        // Consume the left bracket
        parser.next_token();
        let index = parser.parse_expression(Precedence::Lowest)?;

        parser.expect_peek(TokenKind::RightBracket)?;

        Ok(Expression::Index(Box::new(IndexExpression {
            token,
            left,
            index,
        })))
    }

    fn current_identifier(&self) -> Identifier {
        Identifier {
            token: self.current_token.clone(),
            name: self.current_token.literal.clone(),
        }
    }

    fn next_token(&mut self) {
        self.current_token = self.peek_token.clone();
        self.peek_token = self.lexer.next_token();
    }

    fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current_token.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.kind)
    }

    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_token_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: kind,
                got: self.peek_token.kind,
            })
        }
    }
}
