use std::fmt;
use thiserror::Error;
use tse_common::word::normalize_word;
use tse_common::{DocCounts, Index};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("bad character '{0}' in query")]
    BadCharacter(char),
    #[error("'{0}' cannot be first")]
    LeadingOperator(Token),
    #[error("'{0}' cannot be last")]
    TrailingOperator(Token),
    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(Token, Token),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    And,
    Or,
}

impl Token {
    fn from_word(word: String) -> Self {
        match word.as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            _ => Token::Word(word),
        }
    }

    pub fn is_operator(&self) -> bool {
        !matches!(self, Token::Word(_))
    }

    fn term(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
        }
    }
}

/// A validated query: OR-separated groups of implicitly or explicitly
/// AND-joined terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    /// Split on whitespace, lowercase, and check operator placement.
    pub fn parse(line: &str) -> Result<Query, QueryError> {
        let mut tokens = Vec::new();
        for raw in line.split_whitespace() {
            match normalize_word(raw) {
                Some(word) => tokens.push(Token::from_word(word)),
                None => {
                    let bad = raw.chars().find(|c| !c.is_ascii_alphabetic()).unwrap_or(' ');
                    return Err(QueryError::BadCharacter(bad));
                }
            }
        }
        validate(&tokens)?;
        Ok(Query { tokens })
    }

    pub fn tokens(&self) -> &[Token] { &self.tokens }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    /// Score every document: AND takes the per-document minimum within a
    /// group, OR sums the groups. Unknown terms match nothing.
    pub fn evaluate(&self, index: &Index) -> DocCounts {
        let empty = DocCounts::new();
        let mut result = DocCounts::new();
        for group in self.tokens.split(|t| *t == Token::Or) {
            let mut group_counts: Option<DocCounts> = None;
            for term in group.iter().filter_map(Token::term) {
                let counts = index.find(term).unwrap_or(&empty);
                group_counts = Some(match group_counts {
                    None => counts.clone(),
                    Some(acc) => acc.intersect(counts),
                });
            }
            if let Some(counts) = group_counts {
                result.union_with(&counts);
            }
        }
        result
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

fn validate(tokens: &[Token]) -> Result<(), QueryError> {
    if let Some(first) = tokens.first().filter(|t| t.is_operator()) {
        return Err(QueryError::LeadingOperator(first.clone()));
    }
    if let Some(last) = tokens.last().filter(|t| t.is_operator()) {
        return Err(QueryError::TrailingOperator(last.clone()));
    }
    for pair in tokens.windows(2) {
        if pair[0].is_operator() && pair[1].is_operator() {
            return Err(QueryError::AdjacentOperators(pair[0].clone(), pair[1].clone()));
        }
    }
    Ok(())
}
