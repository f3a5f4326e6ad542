//! Graph nodes: classes, their properties and enumeration values
//!
//! Classes live in the [`Ontology`](super::Ontology) arena and refer to each
//! other by [`ClassId`]. Properties and descriptions are owned by their domain
//! class and keep the domain's name so their composite ids can be derived
//! without a graph lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Stereotype;

/// Index of a class in the ontology arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Common identity of every graph node
pub trait Entity {
    fn label(&self) -> &str;
    fn namespace(&self) -> &str;
    fn name(&self) -> &str;

    /// `namespace:name` unless the node derives a composite id
    fn id(&self) -> String {
        format!("{}:{}", self.namespace(), self.name())
    }
}

/// Image format requested from the diagram renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }
}

/// Rendered diagram image
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramImage {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl DiagramImage {
    /// SVG markup, if this image is an SVG
    pub fn as_svg(&self) -> Option<String> {
        match self.format {
            OutputFormat::Svg => Some(String::from_utf8_lossy(&self.bytes).into_owned()),
            OutputFormat::Png => None,
        }
    }
}

/// Diagram state of a class. Set once, by the render orchestrator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderStatus {
    #[default]
    Pending,
    Rendered(DiagramImage),
    Failed(String),
}

impl RenderStatus {
    pub fn image(&self) -> Option<&DiagramImage> {
        match self {
            RenderStatus::Rendered(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RenderStatus::Pending)
    }
}

/// Schema class (also used for enumerations, datatypes and primitives)
#[derive(Debug, Clone, Default)]
pub struct Class {
    pub label: String,
    pub namespace: String,
    pub name: String,
    pub comment: String,
    pub stereotype: Stereotype,
    /// Parent class (`rdfs:subClassOf`)
    pub sub_class: Option<ClassId>,
    /// Keyed by short property name, in declaration order
    pub properties: IndexMap<String, Property>,
    /// Enumeration values keyed by short value name; only filled for enums
    pub descriptions: IndexMap<String, Description>,
    pub diagram: RenderStatus,
}

impl Class {
    /// Bare stub created when a class is first seen as a reference
    pub fn stub(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Self::default()
        }
    }

    pub fn output_category(&self) -> &'static str {
        self.stereotype.output_category()
    }

    /// Site-relative URL of this class's page
    pub fn href(&self) -> String {
        format!("/{}/{}.html", self.output_category(), self.id())
    }

    /// Label, falling back to the name for classes never declared with one
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

impl Entity for Class {
    fn label(&self) -> &str {
        &self.label
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Typed attribute owned by its domain class
#[derive(Debug, Clone)]
pub struct Property {
    pub label: String,
    pub namespace: String,
    pub name: String,
    pub domain: ClassId,
    pub domain_name: String,
    /// Value type; `None` when the declaration had no range
    pub range: Option<ClassId>,
    pub multiplicity: String,
    pub inverse_role_name: String,
}

impl Property {
    /// `namespace:name`, used when properties are shown namespaced
    pub fn namespaced_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    pub fn href(&self) -> String {
        format!("/properties/{}.html", self.id())
    }
}

impl Entity for Property {
    fn label(&self) -> &str {
        &self.label
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> String {
        format!("{}:{}.{}", self.namespace, self.domain_name, self.name)
    }
}

/// One member of an enumeration
#[derive(Debug, Clone)]
pub struct Description {
    pub label: String,
    pub namespace: String,
    pub name: String,
    pub domain: ClassId,
    pub domain_name: String,
}

impl Entity for Description {
    fn label(&self) -> &str {
        &self.label
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> String {
        format!("{}:{}.{}", self.namespace, self.domain_name, self.name)
    }
}
