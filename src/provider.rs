//! Record-provider interface and collection iteration.
//!
//! The evaluator depends on the originating record store through this narrow
//! seam: enumerate all entities of a fixed set of categories, fetch one
//! entity by opaque key, and convert an entity to its nested-mapping form.
//! Implementations live with the store; this crate only consumes them.

use crate::ast::Query;
use crate::evaluator::{Evaluator, Resolver};
use crate::value::Value;

/// External record store with a fixed, finite set of entity categories.
///
/// `to_mapping` must be a pure conversion; it runs once per entity during
/// iteration and once per fetched record during dereference.
pub trait RecordProvider {
    /// The store's native entity type, yielded unconverted by iteration.
    type Entity;

    /// Known categories, in enumeration order.
    fn categories(&self) -> Vec<String>;

    /// All entities of one category, in the provider's natural order. An
    /// unknown category yields an empty iterator.
    fn entities<'a>(&'a self, category: &str) -> Box<dyn Iterator<Item = Self::Entity> + 'a>;

    /// One entity by opaque reference key within a category.
    fn fetch(&self, category: &str, key: &str) -> Option<Self::Entity>;

    /// The entity's nested-mapping form used for evaluation.
    fn to_mapping(&self, entity: &Self::Entity) -> Value;
}

/// Every record provider doubles as the dereference resolver: fetch the
/// entity and hand its mapping form to the evaluator.
impl<P: RecordProvider> Resolver for P {
    fn resolve(&self, category: &str, key: &str) -> Option<Value> {
        self.fetch(category, key).map(|entity| self.to_mapping(&entity))
    }
}

/// Iterate every entity of every category the provider knows, yielding those
/// whose mapping form matches the query.
///
/// The sequence is lazy and restartable: a fresh call re-iterates from
/// scratch, and the caller may stop consuming at any point. Order follows
/// `categories()` then the provider's per-category order; no re-sorting.
pub fn iter_entities<'a, P: RecordProvider>(
    query: &'a Query,
    provider: &'a P,
) -> impl Iterator<Item = P::Entity> + 'a {
    let evaluator = Evaluator::with_resolver(provider);
    provider
        .categories()
        .into_iter()
        .flat_map(move |category| provider.entities(&category))
        .filter(move |entity| {
            let mapping = provider.to_mapping(entity);
            evaluator.matches(query, &mapping).unwrap_or(false)
        })
}
