//! Token catalog for the EDL surface syntax.
//!
//! The catalog is pure data: the closed set of token kinds, plus the
//! keyword table that drives keyword/identifier disambiguation and
//! category membership. The lexer consults it; nothing downstream of
//! the parser does.
//!
//! Keywords are never reserved at the identifier-acceptance level.
//! Every ident-shaped keyword is a member of the reserved-word
//! category, which is itself accepted wherever the grammar expects a
//! generic name. Grammar rules that need a specific keyword match on
//! the concrete kind instead.

use serde::Serialize;

/// Kind of a token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // Punctuation
    LBrace,   // {
    RBrace,   // }
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Equals,   // =
    Dot,      // .
    Star,     // *

    // Names and literals
    Name,
    StringLiteral,
    IntegerLiteral,
    RegexLiteral,

    // Declaration keywords
    Application,
    Entity,
    Enum,
    Relationship,
    With,
    Except,
    To,

    // Application configuration keys
    ApplicationType,
    BaseName,
    PackageName,
    ServerPort,
    AuthenticationType,
    DatabaseType,
    ClientFramework,
    GeneratorVersion,

    // Option keywords
    SkipClient,
    SkipServer,
    NoFluentMethod,
    Filter,
    Dto,
    Paginate,
    Service,
    Search,
    Microservice,
    ClientRootFolder,
    AngularSuffix,

    // Relationship cardinalities
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,

    // Validation keywords
    Required,
    Unique,
    Min,
    Max,
    Minlength,
    Maxlength,
    Minbytes,
    Maxbytes,
    Pattern,

    // Boolean literals
    True,
    False,
}

/// Grouping of kinds used for grammar-level acceptance.
///
/// A category never carries its own text pattern; it only classifies
/// kinds, so grammar positions can accept "any member of C" without
/// specializing a token's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    /// Anything acceptable where a generic name is expected: the
    /// `Name` kind itself plus every reserved word.
    Identifier,
    /// Ident-shaped keywords. A member of `Identifier`.
    ReservedWord,
    /// `true` / `false`.
    BooleanLiteral,
    /// Keys legal inside an `application { config { ... } }` block.
    ConfigKey,
    /// Validation keywords that take a numeric bound.
    MinMaxValidation,
}

/// A single keyword registration.
#[derive(Debug)]
pub struct KeywordDescriptor {
    /// Literal text of the keyword.
    pub literal: &'static str,
    /// Kind emitted when the literal matches exactly.
    pub kind: TokenKind,
    /// Category memberships beyond the implicit `ReservedWord`.
    pub categories: &'static [TokenCategory],
}

use TokenCategory::{BooleanLiteral, ConfigKey, MinMaxValidation};

/// The complete keyword table.
///
/// Registered longest-literal-first: several literals are strict
/// prefixes of others (`application` / `applicationType`, `min` /
/// `minlength`), and a first-match tokenizer walking this table must
/// see the longer literal first. The ordering is asserted by a test.
pub const KEYWORDS: &[KeywordDescriptor] = &[
    KeywordDescriptor { literal: "authenticationType", kind: TokenKind::AuthenticationType, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "clientRootFolder", kind: TokenKind::ClientRootFolder, categories: &[] },
    KeywordDescriptor { literal: "generatorVersion", kind: TokenKind::GeneratorVersion, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "applicationType", kind: TokenKind::ApplicationType, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "clientFramework", kind: TokenKind::ClientFramework, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "noFluentMethod", kind: TokenKind::NoFluentMethod, categories: &[] },
    KeywordDescriptor { literal: "angularSuffix", kind: TokenKind::AngularSuffix, categories: &[] },
    KeywordDescriptor { literal: "relationship", kind: TokenKind::Relationship, categories: &[] },
    KeywordDescriptor { literal: "microservice", kind: TokenKind::Microservice, categories: &[] },
    KeywordDescriptor { literal: "databaseType", kind: TokenKind::DatabaseType, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "application", kind: TokenKind::Application, categories: &[] },
    KeywordDescriptor { literal: "packageName", kind: TokenKind::PackageName, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "ManyToMany", kind: TokenKind::ManyToMany, categories: &[] },
    KeywordDescriptor { literal: "serverPort", kind: TokenKind::ServerPort, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "skipClient", kind: TokenKind::SkipClient, categories: &[] },
    KeywordDescriptor { literal: "skipServer", kind: TokenKind::SkipServer, categories: &[] },
    KeywordDescriptor { literal: "ManyToOne", kind: TokenKind::ManyToOne, categories: &[] },
    KeywordDescriptor { literal: "OneToMany", kind: TokenKind::OneToMany, categories: &[] },
    KeywordDescriptor { literal: "maxlength", kind: TokenKind::Maxlength, categories: &[MinMaxValidation] },
    KeywordDescriptor { literal: "minlength", kind: TokenKind::Minlength, categories: &[MinMaxValidation] },
    KeywordDescriptor { literal: "OneToOne", kind: TokenKind::OneToOne, categories: &[] },
    KeywordDescriptor { literal: "baseName", kind: TokenKind::BaseName, categories: &[ConfigKey] },
    KeywordDescriptor { literal: "maxbytes", kind: TokenKind::Maxbytes, categories: &[MinMaxValidation] },
    KeywordDescriptor { literal: "minbytes", kind: TokenKind::Minbytes, categories: &[MinMaxValidation] },
    KeywordDescriptor { literal: "paginate", kind: TokenKind::Paginate, categories: &[] },
    KeywordDescriptor { literal: "required", kind: TokenKind::Required, categories: &[] },
    KeywordDescriptor { literal: "pattern", kind: TokenKind::Pattern, categories: &[] },
    KeywordDescriptor { literal: "service", kind: TokenKind::Service, categories: &[] },
    KeywordDescriptor { literal: "entity", kind: TokenKind::Entity, categories: &[] },
    KeywordDescriptor { literal: "except", kind: TokenKind::Except, categories: &[] },
    KeywordDescriptor { literal: "filter", kind: TokenKind::Filter, categories: &[] },
    KeywordDescriptor { literal: "search", kind: TokenKind::Search, categories: &[] },
    KeywordDescriptor { literal: "unique", kind: TokenKind::Unique, categories: &[] },
    KeywordDescriptor { literal: "false", kind: TokenKind::False, categories: &[BooleanLiteral] },
    KeywordDescriptor { literal: "enum", kind: TokenKind::Enum, categories: &[] },
    KeywordDescriptor { literal: "true", kind: TokenKind::True, categories: &[BooleanLiteral] },
    KeywordDescriptor { literal: "with", kind: TokenKind::With, categories: &[] },
    KeywordDescriptor { literal: "dto", kind: TokenKind::Dto, categories: &[] },
    KeywordDescriptor { literal: "max", kind: TokenKind::Max, categories: &[MinMaxValidation] },
    KeywordDescriptor { literal: "min", kind: TokenKind::Min, categories: &[MinMaxValidation] },
    KeywordDescriptor { literal: "to", kind: TokenKind::To, categories: &[] },
];

/// Look up an ident-shaped lexeme in the keyword table.
///
/// Exact match only: a lexeme that merely starts with a keyword
/// (`applications`) is a generic name, which is how the longer-kind
/// disambiguation falls out of maximal-munch identifier scanning.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.iter().find(|descriptor| descriptor.literal == text).map(|descriptor| descriptor.kind)
}

impl TokenKind {
    fn keyword_descriptor(self) -> Option<&'static KeywordDescriptor> {
        KEYWORDS.iter().find(|descriptor| descriptor.kind == self)
    }

    /// True for every kind registered in the keyword table.
    pub fn is_reserved_word(self) -> bool {
        self.keyword_descriptor().is_some()
    }

    /// Category membership query used by grammar-level acceptance.
    pub fn is_in(self, category: TokenCategory) -> bool {
        match category {
            TokenCategory::Identifier => self == TokenKind::Name || self.is_reserved_word(),
            TokenCategory::ReservedWord => self.is_reserved_word(),
            other => self
                .keyword_descriptor()
                .is_some_and(|descriptor| descriptor.categories.contains(&other)),
        }
    }
}

/// A classified lexeme: kind, matched text, byte offset into the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_is_registered_longest_first() {
        for pair in KEYWORDS.windows(2) {
            assert!(
                pair[0].literal.len() >= pair[1].literal.len(),
                "{} is registered after the shorter {}",
                pair[0].literal,
                pair[1].literal,
            );
        }
    }

    #[test]
    fn every_keyword_is_accepted_as_an_identifier() {
        for descriptor in KEYWORDS {
            assert!(
                descriptor.kind.is_in(TokenCategory::Identifier),
                "{} is reserved at the identifier level",
                descriptor.literal,
            );
            assert!(descriptor.kind.is_in(TokenCategory::ReservedWord));
        }
    }

    #[test]
    fn punctuation_and_literals_are_not_identifiers() {
        assert!(TokenKind::Name.is_in(TokenCategory::Identifier));
        assert!(!TokenKind::LBrace.is_in(TokenCategory::Identifier));
        assert!(!TokenKind::StringLiteral.is_in(TokenCategory::Identifier));
        assert!(!TokenKind::IntegerLiteral.is_in(TokenCategory::ReservedWord));
    }

    #[test]
    fn category_memberships() {
        assert!(TokenKind::True.is_in(TokenCategory::BooleanLiteral));
        assert!(TokenKind::False.is_in(TokenCategory::BooleanLiteral));
        assert!(TokenKind::ApplicationType.is_in(TokenCategory::ConfigKey));
        assert!(TokenKind::BaseName.is_in(TokenCategory::ConfigKey));
        assert!(TokenKind::Min.is_in(TokenCategory::MinMaxValidation));
        assert!(TokenKind::Maxbytes.is_in(TokenCategory::MinMaxValidation));
        assert!(!TokenKind::Required.is_in(TokenCategory::MinMaxValidation));
        assert!(!TokenKind::Entity.is_in(TokenCategory::ConfigKey));
    }

    #[test]
    fn keyword_lookup_is_exact_match_only() {
        assert_eq!(lookup_keyword("application"), Some(TokenKind::Application));
        assert_eq!(lookup_keyword("applicationType"), Some(TokenKind::ApplicationType));
        assert_eq!(lookup_keyword("applications"), None);
        assert_eq!(lookup_keyword("Entity"), None);
    }
}
