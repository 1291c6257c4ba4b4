//! Resolver that turns a parsed component set into grouped entity results.
//!
//! Dispatch is a registry keyed by species name. Each route names the result
//! group it fills and the lookup it runs against the host's [`EntityStore`].

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::ast::{Command, Component, ComponentSet};
use crate::config::SearchConfig;
use crate::store::{Entity, EntityKind, EntityStore};

struct Route<S: EntityStore> {
    group: String,
    lookup: Box<dyn Fn(&S, &Component) -> Result<Option<Entity>, S::Error> + Send + Sync>,
}

/// Grouped results of one resolve call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    groups: BTreeMap<String, Vec<Entity>>,
    /// Components whose command has no resolution yet.
    pub unsupported: Vec<Component>,
}

impl ResultSet {
    pub fn group(&self, label: &str) -> Option<&[Entity]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    pub fn contains_group(&self, label: &str) -> bool {
        self.groups.contains_key(label)
    }

    /// Groups in label order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Entity])> {
        self.groups
            .iter()
            .map(|(label, entities)| (label.as_str(), entities.as_slice()))
    }

    /// Total number of matched entities across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_groups(self) -> BTreeMap<String, Vec<Entity>> {
        self.groups
    }
}

/// Species registry and resolver
pub struct Results<S: EntityStore> {
    routes: HashMap<String, Route<S>>,
}

impl<S: EntityStore + 'static> Results<S> {
    /// A resolver with no species wired.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Wire the species listed in the config to their store lookups.
    pub fn from_config(config: &SearchConfig) -> Self {
        let mut results = Self::new();
        for species in &config.species {
            match EntityKind::from_species(species) {
                Some(kind) => results.register_kind(kind, config.get_group_label(species)),
                None => warn!(species = %species, "configured species has no entity kind, skipping"),
            }
        }
        results
    }

    /// Register a lookup for `species`, replacing any earlier route for it.
    pub fn register<F>(&mut self, species: impl Into<String>, group: impl Into<String>, lookup: F)
    where
        F: Fn(&S, &Component) -> Result<Option<Entity>, S::Error> + Send + Sync + 'static,
    {
        self.routes.insert(
            species.into(),
            Route {
                group: group.into(),
                lookup: Box::new(lookup),
            },
        );
    }

    /// Register the identifier lookup for `kind`. The component value is read
    /// as the entity id whatever column the clause named.
    pub fn register_kind(&mut self, kind: EntityKind, group: impl Into<String>) {
        self.register(kind.species(), group, move |store: &S, component: &Component| {
            match component.value {
                Some(id) => store.find_by_id(kind, id),
                None => Ok(None),
            }
        });
    }

    /// Registered species names, sorted.
    pub fn species(&self) -> Vec<&str> {
        let mut species: Vec<_> = self.routes.keys().map(String::as_str).collect();
        species.sort_unstable();
        species
    }

    /// Resolve every component against `store`.
    ///
    /// Each registered group is present in the result even when nothing
    /// matched. The only error is one raised by the store itself.
    pub fn find(&self, components: &ComponentSet, store: &S) -> Result<ResultSet, S::Error> {
        let mut result = ResultSet {
            groups: self
                .routes
                .values()
                .map(|route| (route.group.clone(), Vec::new()))
                .collect(),
            unsupported: Vec::new(),
        };

        // sorted so groups shared by several species fill deterministically
        let mut ordered: Vec<&Component> = components.iter().collect();
        ordered.sort_by(|a, b| a.species.name().cmp(b.species.name()));

        for component in ordered {
            let Some(route) = self.routes.get(component.species.name()) else {
                debug!(species = component.species.name(), "unknown species, ignoring component");
                continue;
            };

            match component.command {
                Command::Equals => match (route.lookup)(store, component)? {
                    Some(entity) => result
                        .groups
                        .entry(route.group.clone())
                        .or_default()
                        .push(entity),
                    None => debug!(component = %component, "no entity matched"),
                },
                Command::Add | Command::Sub | Command::Mult | Command::Div => {
                    warn!(component = %component, command = %component.command, "command not yet supported");
                    result.unsupported.push(component.clone());
                }
            }
        }

        debug!(matched = result.len(), "resolved components");
        Ok(result)
    }
}

impl<S: EntityStore + 'static> Default for Results<S> {
    /// Only `Job` is wired, into the `Jobs` group.
    fn default() -> Self {
        let mut results = Self::new();
        results.register_kind(EntityKind::Job, "Jobs");
        results
    }
}
