/**
 * stereotype.rs
 * Kind of a schema class and the output category derived from it
 */

use serde::Serialize;
use std::fmt;

/// A class's kind. Drives page placement and diagram member tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum Stereotype {
    #[default]
    Class,
    Enum,
    DataType,
    Primitive,
}

impl Stereotype {
    pub const ALL: [Stereotype; 4] = [
        Stereotype::Class,
        Stereotype::Enum,
        Stereotype::DataType,
        Stereotype::Primitive,
    ];

    /// Directory (and URL segment) holding pages of this kind
    pub fn output_category(self) -> &'static str {
        match self {
            Stereotype::Class => "classes",
            Stereotype::Enum => "enums",
            Stereotype::DataType => "datatypes",
            Stereotype::Primitive => "primitives",
        }
    }

    /// Parse a declared stereotype token
    ///
    /// Accepts a bare token (`Primitive`) or a resource whose fragment is the
    /// token (`http://iec.ch/TC57/NonStandard/UML#enumeration`). Anything
    /// unrecognized is a plain Class.
    pub fn from_token(token: &str) -> Self {
        let fragment = token.rsplit('#').next().unwrap_or(token).trim();

        match fragment.to_ascii_lowercase().as_str() {
            "enumeration" | "enum" => Stereotype::Enum,
            "datatype" | "cimdatatype" => Stereotype::DataType,
            "primitive" => Stereotype::Primitive,
            _ => Stereotype::Class,
        }
    }

    /// CSS badge used by the page templates
    pub fn badge_class(self) -> &'static str {
        match self {
            Stereotype::Class => "badge-class",
            Stereotype::Enum => "badge-enum",
            Stereotype::DataType => "badge-datatype",
            Stereotype::Primitive => "badge-primitive",
        }
    }

    /// Member-line token for a property whose range has this stereotype
    pub fn member_token(self) -> char {
        match self {
            Stereotype::Class => '~',
            Stereotype::Enum => '#',
            Stereotype::DataType | Stereotype::Primitive => '+',
        }
    }
}

impl fmt::Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stereotype::Class => "Class",
            Stereotype::Enum => "Enum",
            Stereotype::DataType => "DataType",
            Stereotype::Primitive => "Primitive",
        };
        f.write_str(name)
    }
}
