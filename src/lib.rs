//! Structured search for a work log.
//!
//! A query such as `what did I log on @job.id=412` is scanned for clauses of
//! the form `@<species>.<column>=<integer>`, each clause becomes a typed
//! [`Component`], and the resulting [`ComponentSet`] is resolved against an
//! [`EntityStore`] into a [`ResultSet`] of entities grouped by label.
//!
//! ```
//! use worklog_query::{search, MemoryStore, Results};
//!
//! let store = MemoryStore::sample();
//! let found = search("@job.id=412", &Results::default(), &store).unwrap();
//! assert_eq!(found.group("Jobs").unwrap()[0].id(), 412);
//! ```

pub mod ast;
pub mod builder;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod sql;
pub mod store;
pub mod token;

pub use ast::{Clause, Column, Command, Component, ComponentSet, Species};
pub use config::{ConfigError, SearchConfig};
pub use parser::parse;
pub use resolver::{ResultSet, Results};
pub use store::{Entity, EntityKind, EntityStore, MemoryStore};

/// Parse `query` and resolve it against `store` in one call.
pub fn search<S: EntityStore + 'static>(
    query: &str,
    results: &Results<S>,
    store: &S,
) -> Result<ResultSet, S::Error> {
    results.find(&parse(query), store)
}
