//! Text-driven rewrite verification.

use common_error::QuiverResult;
use log::debug;
use quiver_logical::text::ExprParser;
use quiver_logical::LogicalExpr;

use crate::rules::ExprSimplifier;

/// Parses expressions from text, simplifies them, and compares the result
/// structurally against an expected expression.
///
/// With the default parser, identifiers are opaque `Int64` columns and
/// `NULL` is the `Int64` typed null.
#[derive(Debug, Default)]
pub struct RewriteHarness {
    parser: ExprParser,
    simplifier: ExprSimplifier,
}

impl RewriteHarness {
    /// Create a harness with the default parser and rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom parser (e.g. one with typed columns).
    #[must_use]
    pub fn with_parser(mut self, parser: ExprParser) -> Self {
        self.parser = parser;
        self
    }

    /// Use a custom simplifier.
    #[must_use]
    pub fn with_simplifier(mut self, simplifier: ExprSimplifier) -> Self {
        self.simplifier = simplifier;
        self
    }

    /// Parse and simplify `input`.
    pub fn rewrite(&self, input: &str) -> QuiverResult<LogicalExpr> {
        let expr = self.parser.parse(input)?;
        Ok(self.simplifier.simplify(expr)?.expr)
    }

    /// Whether simplifying `input` yields exactly `expected`.
    pub fn verify_rewrite(&self, input: &str, expected: &str) -> QuiverResult<bool> {
        let actual = self.rewrite(input)?;
        let expected = self.parser.parse(expected)?;
        let matches = actual == expected;
        if !matches {
            debug!("Rewrite of '{input}' produced {actual}, expected {expected}");
        }
        Ok(matches)
    }
}
