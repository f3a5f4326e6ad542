//! # rdfsdoc - RDFS ontology documentation generator
//!
//! Reads an RDFS schema in RDF/XML form, builds an in-memory class graph,
//! renders one PlantUML class diagram per class through a PlantUML server
//! and writes a static HTML documentation site.
//!
//! ## Pipeline
//!
//! ```text
//!  schema.rdf ──► RdfsReader ──► GraphBuilder ──► Ontology
//!                                                   │
//!                      DiagramSynthesizer ◄─────────┤
//!                              │                    │
//!                      RenderOrchestrator ──────────┤  (diagram per class)
//!                                                   ▼
//!                                             SiteGenerator ──► site/
//! ```
//!
//! Classes are held in an arena ([`Ontology`]) and refer to each other by
//! [`ClassId`], so forward references, parent links and property ranges never
//! duplicate a class.

pub mod errors;
pub mod model;
pub mod builder;
pub mod rdfs;
pub mod diagram;
pub mod render;
pub mod config;
pub mod site;

pub use errors::{DocError, Result};
pub use model::{Class, ClassId, Description, DiagramImage, Entity, Ontology, OutputFormat, Property, RenderStatus, Stereotype};
pub use builder::{Applied, BuildStats, Declaration, GraphBuilder};
pub use rdfs::{load_ontology, RdfsReader};
pub use diagram::{DiagramOptions, DiagramSynthesizer};
pub use render::{PlantUmlServer, RenderOrchestrator, RenderReport, RenderTransport};
pub use config::Config;
pub use site::{SiteGenerator, SiteSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "rdfsdoc.yaml";
