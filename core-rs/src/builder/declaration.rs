//! Flat declarations consumed by the graph builder
//!
//! References are plain names. Nothing here is resolved; the builder turns
//! names into class handles through the ontology registry.

/// Declaration of (or enrichment to) a class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    /// Raw stereotype token, see `Stereotype::from_token`
    pub stereotype: Option<String>,
    /// Name of the parent class
    pub parent: Option<String>,
}

/// Declaration of a property, identified as `<Domain>.<property>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDecl {
    pub id: String,
    pub domain: Option<String>,
    pub label: Option<String>,
    pub range: Option<String>,
    /// Multiplicity resource, e.g. `M:0..1`
    pub multiplicity: Option<String>,
    pub inverse_role_name: Option<String>,
}

/// Declaration of an enumeration value, identified as `<Enum>.<value>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionDecl {
    pub id: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassDecl),
    Property(PropertyDecl),
    Description(DescriptionDecl),
}

impl Declaration {
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Class(_) => "Class",
            Declaration::Property(_) => "Property",
            Declaration::Description(_) => "Description",
        }
    }

    pub fn class(name: impl Into<String>) -> ClassDecl {
        ClassDecl {
            name: name.into(),
            ..ClassDecl::default()
        }
    }

    pub fn property(id: impl Into<String>, domain: impl Into<String>) -> PropertyDecl {
        PropertyDecl {
            id: id.into(),
            domain: Some(domain.into()),
            ..PropertyDecl::default()
        }
    }

    pub fn description(id: impl Into<String>) -> DescriptionDecl {
        DescriptionDecl {
            id: id.into(),
            label: None,
        }
    }
}

impl ClassDecl {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn stereotype(mut self, token: impl Into<String>) -> Self {
        self.stereotype = Some(token.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl PropertyDecl {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.multiplicity = Some(multiplicity.into());
        self
    }

    pub fn inverse_role_name(mut self, name: impl Into<String>) -> Self {
        self.inverse_role_name = Some(name.into());
        self
    }
}

impl DescriptionDecl {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<ClassDecl> for Declaration {
    fn from(decl: ClassDecl) -> Self {
        Declaration::Class(decl)
    }
}

impl From<PropertyDecl> for Declaration {
    fn from(decl: PropertyDecl) -> Self {
        Declaration::Property(decl)
    }
}

impl From<DescriptionDecl> for Declaration {
    fn from(decl: DescriptionDecl) -> Self {
        Declaration::Description(decl)
    }
}
