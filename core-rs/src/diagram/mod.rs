//! Per-class diagram synthesis
//!
//! Produces PlantUML class-diagram text for one focal class:
//!
//! - the focal class with one member line per property
//! - a one-hop companion node for every property whose range is a Class or
//!   an Enum (enums list their values), plus a relation edge
//! - the full ancestor chain with inheritance edges
//! - a fixed legend explaining the member tokens
//!
//! Node declarations are collected separately from member lines and edges,
//! then concatenated, so each node is declared once however many times it
//! is reached.

use std::collections::HashSet;

use crate::errors::Result;
use crate::model::{ClassId, Entity, Ontology, Property, Stereotype};

/// Legend explaining the member-line tokens
pub const LEGEND: &str = r#"annotation "Legend" {
  #enum reference
  ~class reference
  +plain property
}
"#;

const HEADER: &str = "skinparam groupInheritance 6\nset separator none\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramOptions {
    /// Show members as `ns:name` instead of the short name
    pub namespaced_properties: bool,
}

/// Synthesize with default options
pub fn synthesize(graph: &Ontology, focal: ClassId) -> Result<String> {
    DiagramSynthesizer::new(graph, DiagramOptions::default()).synthesize(focal)
}

pub struct DiagramSynthesizer<'g> {
    graph: &'g Ontology,
    options: DiagramOptions,
    declarations: String,
    body: String,
    declared: HashSet<ClassId>,
}

impl<'g> DiagramSynthesizer<'g> {
    pub fn new(graph: &'g Ontology, options: DiagramOptions) -> Self {
        Self {
            graph,
            options,
            declarations: String::new(),
            body: String::new(),
            declared: HashSet::new(),
        }
    }

    /// Diagram text for `focal`; fails if its ancestor chain loops
    pub fn synthesize(mut self, focal: ClassId) -> Result<String> {
        // Resolve ancestors first so a cycle fails before any output is built
        let ancestors = self.graph.ancestors(focal)?;

        self.declarations.push_str(HEADER);
        self.declarations.push_str(LEGEND);

        self.declare(focal);
        self.members(focal);
        self.relations(focal);
        self.inheritance(focal, &ancestors);

        let mut text = String::with_capacity(self.declarations.len() + self.body.len() + 32);
        text.push_str("@startuml\n");
        text.push_str(&self.declarations);
        text.push_str(&self.body);
        text.push_str("@enduml\n");
        Ok(text)
    }

    fn declare(&mut self, id: ClassId) -> bool {
        if !self.declared.insert(id) {
            return false;
        }

        let class = self.graph.get(id);
        let keyword = match class.stereotype {
            Stereotype::Enum => "enum",
            _ => "class",
        };
        self.declarations.push_str(&format!(
            "{} \"{}\" as {} [[{}]]\n",
            keyword,
            class.id(),
            alias(self.graph, id),
            class.href()
        ));
        true
    }

    /// Member name as printed, shared by member lines and association edges
    fn member_name(&self, property: &Property) -> String {
        if self.options.namespaced_properties {
            property.namespaced_name()
        } else {
            property.name.clone()
        }
    }

    fn members(&mut self, focal: ClassId) {
        let graph = self.graph;
        let focal_alias = alias(graph, focal);

        for property in graph.get(focal).properties.values() {
            let token = self.range_stereotype(property).map_or('+', Stereotype::member_token);
            let name = self.member_name(property);

            match property.range {
                Some(range) => self.body.push_str(&format!(
                    "{} : {}{} : {}\n",
                    focal_alias,
                    token,
                    name,
                    graph.get(range).id()
                )),
                None => self.body.push_str(&format!("{} : {}{}\n", focal_alias, token, name)),
            }
        }
    }

    fn relations(&mut self, focal: ClassId) {
        let graph = self.graph;
        let focal_alias = alias(graph, focal);

        for property in graph.get(focal).properties.values() {
            let Some(range) = property.range else {
                continue;
            };
            let stereotype = graph.get(range).stereotype;
            if !matches!(stereotype, Stereotype::Class | Stereotype::Enum) {
                continue;
            }

            // Companion nodes are not expanded: no members, no ancestors
            if self.declare(range) && stereotype == Stereotype::Enum {
                self.enum_values(range);
            }

            let name = self.member_name(property);
            self.body.push_str(&format!("{}::{} -- {}\n", focal_alias, name, alias(graph, range)));
        }
    }

    fn enum_values(&mut self, id: ClassId) {
        let graph = self.graph;
        self.body.push_str(&format!("enum {} {{\n", alias(graph, id)));
        let class = graph.get(id);
        for value in class.descriptions.keys() {
            self.body.push_str(value);
            self.body.push('\n');
        }
        self.body.push_str("}\n");
    }

    fn inheritance(&mut self, focal: ClassId, ancestors: &[ClassId]) {
        let mut child = focal;
        for &parent in ancestors {
            self.declare(parent);
            self.body.push_str(&format!(
                "{} <|-down- {}\n",
                alias(self.graph, parent),
                alias(self.graph, child)
            ));
            child = parent;
        }
    }

    fn range_stereotype(&self, property: &Property) -> Option<Stereotype> {
        property.range.map(|r| self.graph.get(r).stereotype)
    }
}

/// Short diagram alias: `namespace.name`
pub fn alias(graph: &Ontology, id: ClassId) -> String {
    let class = graph.get(id);
    format!("{}.{}", class.namespace, class.name)
}
