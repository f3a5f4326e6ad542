/**
 * ontology.rs
 * Arena of classes indexed by name
 *
 * The only way to obtain a ClassId for a name is `get_or_create`, so one
 * name maps to at most one live Class for the lifetime of the graph.
 */

use std::collections::{HashMap, HashSet};

use crate::errors::{DocError, Result};

use super::{Class, ClassId, Entity, Property, Stereotype};

#[derive(Debug, Clone, Default)]
pub struct Ontology {
    namespace: String,
    classes: Vec<Class>,
    index: HashMap<String, ClassId>,
}

impl Ontology {
    /// Create an empty graph whose entities all live in `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            classes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Return the class registered under `name`, creating a bare stub if absent
    pub fn get_or_create(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }

        let id = ClassId(self.classes.len());
        self.classes.push(Class::stub(name, &self.namespace));
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn find(&self, name: &str) -> Option<ClassId> {
        self.index.get(name).copied()
    }

    /// Like `find`, but a missing class is an error
    pub fn require(&self, name: &str) -> Result<ClassId> {
        self.find(name).ok_or_else(|| DocError::ClassNotFound(name.to_string()))
    }

    pub fn get(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    pub fn get_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<&Class> {
        self.find(name).map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All classes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &Class)> {
        self.classes.iter().enumerate().map(|(i, c)| (ClassId(i), c))
    }

    /// Ids of classes with the given stereotype, sorted by name
    pub fn ids_by_stereotype(&self, stereotype: Stereotype) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self
            .iter()
            .filter(|(_, c)| c.stereotype == stereotype)
            .map(|(id, _)| id)
            .collect();
        ids.sort_by(|a, b| self.get(*a).name.cmp(&self.get(*b).name));
        ids
    }

    pub fn count_by_stereotype(&self, stereotype: Stereotype) -> usize {
        self.classes.iter().filter(|c| c.stereotype == stereotype).count()
    }

    /// Properties of every Class-stereotype class, classes by name, properties in declaration order
    pub fn class_properties(&self) -> Vec<&Property> {
        self.ids_by_stereotype(Stereotype::Class)
            .into_iter()
            .flat_map(|id| self.get(id).properties.values())
            .collect()
    }

    /// Properties of every class whatever its stereotype, same ordering as `class_properties`
    pub fn all_properties(&self) -> Vec<&Property> {
        Stereotype::ALL
            .into_iter()
            .flat_map(|s| self.ids_by_stereotype(s))
            .flat_map(|id| self.get(id).properties.values())
            .collect()
    }

    /// Parent chain of `id`, nearest ancestor first
    ///
    /// Fails with `AncestorCycle` if the `sub_class` links loop back.
    pub fn ancestors(&self, id: ClassId) -> Result<Vec<ClassId>> {
        let mut visited = HashSet::new();
        visited.insert(id);

        let mut chain = Vec::new();
        let mut current = self.get(id).sub_class;

        while let Some(parent) = current {
            if !visited.insert(parent) {
                let mut names: Vec<String> = std::iter::once(id)
                    .chain(chain.iter().copied())
                    .map(|c| self.get(c).name.clone())
                    .collect();
                names.push(self.get(parent).name.clone());

                return Err(DocError::AncestorCycle {
                    class: self.get(id).name.clone(),
                    chain: names,
                });
            }
            chain.push(parent);
            current = self.get(parent).sub_class;
        }

        Ok(chain)
    }

    /// Direct subclasses of `id`, sorted by name
    pub fn children(&self, id: ClassId) -> Vec<ClassId> {
        let mut children: Vec<ClassId> = self
            .iter()
            .filter(|(_, c)| c.sub_class == Some(id))
            .map(|(child, _)| child)
            .collect();
        children.sort_by(|a, b| self.get(*a).name.cmp(&self.get(*b).name));
        children
    }

    /// Distinct domains of properties whose range is `id`, sorted by name
    pub fn used_in(&self, id: ClassId) -> Vec<ClassId> {
        let mut domains: Vec<ClassId> = self
            .classes
            .iter()
            .flat_map(|c| c.properties.values())
            .filter(|p| p.range == Some(id))
            .map(|p| p.domain)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        domains.sort_by(|a, b| self.get(*a).name.cmp(&self.get(*b).name));
        domains
    }

    /// Full id of a property's range, empty when it has none
    pub fn range_id(&self, property: &Property) -> String {
        property.range.map(|r| self.get(r).id()).unwrap_or_default()
    }
}
