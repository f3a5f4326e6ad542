//! Serializable view models handed to the page templates

use serde::Serialize;

use crate::model::{ClassId, Entity, Ontology, Property, Stereotype};

/// Link to another page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn class(graph: &Ontology, id: ClassId) -> Self {
        let class = graph.get(id);
        Self {
            id: class.id(),
            label: class.display_label().to_string(),
            href: class.href(),
        }
    }

    pub fn property(property: &Property) -> Self {
        Self {
            id: property.id(),
            label: property_label(property).to_string(),
            href: property.href(),
        }
    }
}

/// Property label, falling back to its short name
fn property_label(property: &Property) -> &str {
    if property.label.is_empty() {
        &property.name
    } else {
        &property.label
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Counts {
    pub classes: usize,
    pub properties: usize,
    pub enums: usize,
    pub datatypes: usize,
    pub primitives: usize,
}

impl Counts {
    pub fn of(graph: &Ontology) -> Self {
        Self {
            classes: graph.count_by_stereotype(Stereotype::Class),
            properties: graph.class_properties().len(),
            enums: graph.count_by_stereotype(Stereotype::Enum),
            datatypes: graph.count_by_stereotype(Stereotype::DataType),
            primitives: graph.count_by_stereotype(Stereotype::Primitive),
        }
    }
}

/// Navigation entries of one output category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavGroup {
    pub title: String,
    pub category: String,
    pub entries: Vec<Link>,
}

impl NavGroup {
    /// One group per stereotype, each listing its classes by name
    pub fn all(graph: &Ontology) -> Vec<Self> {
        Stereotype::ALL
            .into_iter()
            .map(|stereotype| NavGroup {
                title: stereotype.to_string(),
                category: stereotype.output_category().to_string(),
                entries: graph
                    .ids_by_stereotype(stereotype)
                    .into_iter()
                    .map(|id| Link::class(graph, id))
                    .collect(),
            })
            .collect()
    }
}

/// Fields shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub site_title: String,
    pub page_title: String,
    pub current_page: String,
    /// Category whose navigation group starts open; empty on the index
    pub current_category: String,
    pub generated_at: String,
    pub counts: Counts,
    pub nav: Vec<NavGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyRow {
    pub link: Link,
    /// Short or namespaced name, per configuration
    pub name: String,
    pub range: Option<Link>,
    pub range_stereotype: Option<String>,
    pub multiplicity: String,
    pub inverse_role_name: String,
}

impl PropertyRow {
    pub fn new(graph: &Ontology, property: &Property, namespaced: bool) -> Self {
        Self {
            link: Link::property(property),
            name: if namespaced {
                property.namespaced_name()
            } else {
                property.name.clone()
            },
            range: property.range.map(|r| Link::class(graph, r)),
            range_stereotype: property.range.map(|r| graph.get(r).stereotype.to_string()),
            multiplicity: property.multiplicity.clone(),
            inverse_role_name: property.inverse_role_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueRow {
    pub id: String,
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassPage {
    pub layout: Layout,
    pub id: String,
    pub name: String,
    pub label: String,
    pub comment: String,
    pub stereotype: String,
    pub badge: String,
    pub category: String,
    pub properties: Vec<PropertyRow>,
    /// Nearest ancestor first
    pub ancestors: Vec<Link>,
    pub children: Vec<Link>,
    pub used_in: Vec<Link>,
    pub values: Vec<ValueRow>,
    pub diagram_svg: Option<String>,
    pub diagram_png: Option<String>,
    pub diagram_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyPage {
    pub layout: Layout,
    pub row: PropertyRow,
    pub label: String,
    pub domain: Link,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub layout: Layout,
    pub description: String,
    pub classes: Vec<Link>,
    pub properties: Vec<Link>,
}

/// One search entry
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchEntry {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SearchIndex {
    pub classes: Vec<SearchEntry>,
    pub properties: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn of(graph: &Ontology) -> Self {
        let classes = graph
            .ids_by_stereotype(Stereotype::Class)
            .into_iter()
            .map(|id| {
                let class = graph.get(id);
                SearchEntry {
                    id: class.id(),
                    name: class.display_label().to_string(),
                    url: format!("/classes/{}.html", class.id()),
                    description: class.comment.clone(),
                }
            })
            .collect();

        let properties = graph
            .class_properties()
            .into_iter()
            .map(|p| SearchEntry {
                id: p.id(),
                name: property_label(p).to_string(),
                url: p.href(),
                description: String::new(),
            })
            .collect();

        Self { classes, properties }
    }
}
