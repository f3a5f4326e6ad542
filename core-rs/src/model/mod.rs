/**
 * model module
 *
 * - stereotype: class kinds and their output categories
 * - entity: Class, Property, Description and the Entity identity trait
 * - ontology: name-indexed arena holding every class of one run
 */

pub mod entity;
pub mod ontology;
pub mod stereotype;

pub use entity::{Class, ClassId, Description, DiagramImage, Entity, OutputFormat, Property, RenderStatus};
pub use ontology::Ontology;
pub use stereotype::Stereotype;
