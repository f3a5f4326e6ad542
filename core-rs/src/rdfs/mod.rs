/**
 * rdfs module
 *
 * - reader: RDF/XML schema file -> ordered Declaration sequence
 */

pub mod reader;

pub use reader::RdfsReader;

use crate::builder::GraphBuilder;
use crate::errors::Result;
use crate::model::Ontology;
use std::path::Path;

/// Read a schema file and build its graph in one step
pub fn load_ontology<P: AsRef<Path>>(path: P, namespace: &str) -> Result<Ontology> {
    let declarations = RdfsReader::read_file(path)?;
    Ok(GraphBuilder::build(namespace, declarations))
}
