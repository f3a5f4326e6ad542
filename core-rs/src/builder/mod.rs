//! Graph builder
//!
//! One pass over a flat declaration sequence produces a fully linked
//! [`Ontology`]. Each declaration kind is handled independently; references
//! to classes not declared yet resolve through `get_or_create`, so the
//! resulting graph does not depend on declaration order.

pub mod declaration;

pub use declaration::{ClassDecl, Declaration, DescriptionDecl, PropertyDecl};

use crate::model::{ClassId, Description, Ontology, Property, Stereotype};

/// Prefix on multiplicity resources (`M:0..1`)
pub const MULTIPLICITY_PREFIX: &str = "M:";

/// Outcome of applying one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// Same short name already present on the domain; first declaration wins
    Duplicate,
    /// Malformed identifier or missing domain
    Dropped,
}

/// Counters for one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub classes: usize,
    pub properties: usize,
    pub descriptions: usize,
    pub duplicates: usize,
    pub dropped: usize,
}

#[derive(Debug)]
pub struct GraphBuilder {
    graph: Ontology,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            graph: Ontology::new(namespace),
            stats: BuildStats::default(),
        }
    }

    /// Build a graph from a complete declaration sequence
    pub fn build<I>(namespace: impl Into<String>, declarations: I) -> Ontology
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut builder = Self::new(namespace);
        builder.extend(declarations);
        builder.finish()
    }

    pub fn get_or_create(&mut self, name: &str) -> ClassId {
        self.graph.get_or_create(name)
    }

    pub fn extend<I>(&mut self, declarations: I)
    where
        I: IntoIterator<Item = Declaration>,
    {
        for declaration in declarations {
            self.apply(declaration);
        }
    }

    pub fn apply(&mut self, declaration: Declaration) -> Applied {
        let applied = match declaration {
            Declaration::Class(decl) => self.apply_class(decl),
            Declaration::Property(decl) => self.apply_property(decl),
            Declaration::Description(decl) => self.apply_description(decl),
        };

        match applied {
            Applied::Accepted => {}
            Applied::Duplicate => self.stats.duplicates += 1,
            Applied::Dropped => self.stats.dropped += 1,
        }
        applied
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn graph(&self) -> &Ontology {
        &self.graph
    }

    pub fn finish(self) -> Ontology {
        tracing::info!(
            "[Builder] Built {} classes ({} declared), {} properties, {} enum values; {} duplicates, {} dropped",
            self.graph.len(),
            self.stats.classes,
            self.stats.properties,
            self.stats.descriptions,
            self.stats.duplicates,
            self.stats.dropped
        );
        self.graph
    }

    fn apply_class(&mut self, decl: ClassDecl) -> Applied {
        let id = self.graph.get_or_create(&decl.name);
        let parent = decl.parent.as_deref().map(|p| self.graph.get_or_create(p));

        let class = self.graph.get_mut(id);
        if let Some(label) = decl.label {
            class.label = label;
        }
        if let Some(comment) = decl.comment {
            class.comment = comment;
        }

        // A class that already owns enum values stays an enum whatever it declares
        class.stereotype = if class.descriptions.is_empty() {
            decl.stereotype
                .as_deref()
                .map(Stereotype::from_token)
                .unwrap_or_default()
        } else {
            Stereotype::Enum
        };

        if parent.is_some() {
            class.sub_class = parent;
        }

        self.stats.classes += 1;
        Applied::Accepted
    }

    fn apply_property(&mut self, decl: PropertyDecl) -> Applied {
        let Some(domain_name) = decl.domain.as_deref() else {
            tracing::debug!("[Builder] Dropping property {}: no domain", decl.id);
            return Applied::Dropped;
        };
        let domain = self.graph.get_or_create(domain_name);

        let Some((owner, short_name)) = split_pair(&decl.id) else {
            tracing::debug!("[Builder] Dropping property {}: expected <Domain>.<name>", decl.id);
            return Applied::Dropped;
        };
        if owner != domain_name {
            tracing::debug!(
                "[Builder] Dropping property {}: declared domain is {}",
                decl.id,
                domain_name
            );
            return Applied::Dropped;
        }
        if self.graph.get(domain).properties.contains_key(short_name) {
            return Applied::Duplicate;
        }

        let range = decl.range.as_deref().map(|r| self.graph.get_or_create(r));
        let multiplicity = decl
            .multiplicity
            .map(|m| match m.strip_prefix(MULTIPLICITY_PREFIX) {
                Some(stripped) => stripped.to_string(),
                None => m,
            })
            .unwrap_or_default();

        let property = Property {
            label: decl.label.unwrap_or_default(),
            namespace: self.graph.namespace().to_string(),
            name: short_name.to_string(),
            domain,
            domain_name: domain_name.to_string(),
            range,
            multiplicity,
            inverse_role_name: decl.inverse_role_name.unwrap_or_default(),
        };
        self.graph
            .get_mut(domain)
            .properties
            .insert(short_name.to_string(), property);

        self.stats.properties += 1;
        Applied::Accepted
    }

    fn apply_description(&mut self, decl: DescriptionDecl) -> Applied {
        let Some((enum_name, value_name)) = split_pair(&decl.id) else {
            tracing::debug!("[Builder] Dropping description {}: expected <Enum>.<value>", decl.id);
            return Applied::Dropped;
        };

        let domain = self.graph.get_or_create(enum_name);
        let namespace = self.graph.namespace().to_string();
        let class = self.graph.get_mut(domain);
        class.stereotype = Stereotype::Enum;

        if class.descriptions.contains_key(value_name) {
            return Applied::Duplicate;
        }

        class.descriptions.insert(
            value_name.to_string(),
            Description {
                label: decl.label.unwrap_or_default(),
                namespace,
                name: value_name.to_string(),
                domain,
                domain_name: enum_name.to_string(),
            },
        );

        self.stats.descriptions += 1;
        Applied::Accepted
    }
}

/// Split `Owner.member` into exactly two segments
fn split_pair(id: &str) -> Option<(&str, &str)> {
    let mut parts = id.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(member), None) => Some((owner, member)),
        _ => None,
    }
}
