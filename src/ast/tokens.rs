#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: a left-hand path token or an unquoted literal
    ///
    /// Path tokens glue identifiers, dots, and index groups into a single
    /// token with no internal whitespace; bare literals are runs of letters,
    /// digits, dots, and underscores.
    ///
    /// # Examples
    /// ```text
    /// name
    /// birth.date.year
    /// event_ref_list[0].ref
    /// 2021
    /// ```
    Word(String),

    /// Quoted literal with the delimiters already stripped
    ///
    /// Single or double quotes; the content is taken verbatim (no escape
    /// processing).
    ///
    /// # Examples
    /// ```text
    /// "John Doe"
    /// 'person001'
    /// ```
    Str(String),

    /// Logical AND keyword (case-insensitive)
    And,

    /// Logical OR keyword (case-insensitive)
    Or,

    // Comparison operators
    /// Equality (`=`)
    Eq,

    /// Inequality (`!=`)
    NotEq,

    /// Less than
    Lt,

    /// Less than or equal
    LtEq,

    /// Greater than
    Gt,

    /// Greater than or equal
    GtEq,

    /// Contains (`~`): substring or sequence membership
    Contains,

    /// Not-contains (`!~`)
    NotContains,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}
