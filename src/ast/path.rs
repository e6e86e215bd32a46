/// One step of path traversal.
///
/// Produced by [`parse_path`](crate::parser::parse_path) from a left-hand
/// path token. The grammar accepts `length`, `any`, `all`, and `get_*` as
/// ordinary identifiers; classification into pseudo-segments happens here so
/// the evaluator can dispatch on an explicit variant instead of re-inspecting
/// names.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Mapping lookup by field name
    ///
    /// # Examples
    /// ```text
    /// name
    /// birth.date
    /// ```
    Field(String),

    /// Sequence element by zero-based index
    ///
    /// # Examples
    /// ```text
    /// event_ref_list[0]
    /// ```
    Index(usize),

    /// Replace the current value with its element count
    ///
    /// Counts sequence elements, string characters, or mapping entries.
    Length,

    /// Quantifier: at least one sequence element matches
    Any,

    /// Quantifier: every sequence element matches (empty sequence fails)
    All,

    /// Dereference an opaque reference key through the configured resolver
    ///
    /// Written as `get_<category>`; the current value is used as the lookup
    /// key within the named record category.
    ///
    /// # Examples
    /// ```text
    /// note_list.any.get_note.gramps_id
    /// ```
    Deref(String),
}
