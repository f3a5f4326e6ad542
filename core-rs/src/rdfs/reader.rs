/**
 * reader.rs
 * RDF/XML schema reader
 *
 * Every direct child of the document root named Class, Property or
 * Description becomes one Declaration, in document order. Children of a
 * declaration are read one level deep: text for label/comment, the
 * rdf:resource attribute for references.
 */

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::reader::Reader as XmlReader;

use crate::builder::{ClassDecl, Declaration, DescriptionDecl, PropertyDecl};
use crate::errors::{DocError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Class,
    Property,
    Description,
}

impl DeclKind {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"Class" => Some(DeclKind::Class),
            b"Property" => Some(DeclKind::Property),
            b"Description" => Some(DeclKind::Description),
            _ => None,
        }
    }
}

/// Child element of a declaration
#[derive(Debug, Default)]
struct Field {
    name: String,
    resource: Option<String>,
    text: String,
}

#[derive(Debug)]
struct Pending {
    kind: DeclKind,
    id: String,
    fields: Vec<Field>,
}

pub struct RdfsReader;

impl RdfsReader {
    /// Read and parse an RDF/XML schema file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Declaration>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DocError::Rdfs(format!("Schema file not found: {}", path.display())));
        }

        tracing::info!("[Rdfs] Reading schema {}", path.display());
        let xml = fs::read_to_string(path)?;
        Self::parse_str(&xml)
    }

    /// Parse RDF/XML text into declarations, in document order
    pub fn parse_str(xml: &str) -> Result<Vec<Declaration>> {
        let mut reader = XmlReader::from_str(xml);

        let mut declarations = Vec::new();
        let mut depth = 0usize;
        let mut current: Option<Pending> = None;
        let mut field: Option<Field> = None;

        loop {
            let event = reader.read_event().map_err(|e| DocError::Xml {
                position: reader.error_position(),
                message: e.to_string(),
            })?;

            match event {
                XmlEvent::Start(ref e) => {
                    depth += 1;
                    match depth {
                        2 => current = Self::open_declaration(e)?,
                        3 if current.is_some() => field = Some(Self::open_field(e)),
                        _ => {}
                    }
                }
                XmlEvent::Empty(ref e) => match depth + 1 {
                    2 => {
                        if let Some(pending) = Self::open_declaration(e)? {
                            declarations.push(Self::finish(pending)?);
                        }
                    }
                    3 => {
                        if let Some(pending) = current.as_mut() {
                            pending.fields.push(Self::open_field(e));
                        }
                    }
                    _ => {}
                },
                XmlEvent::Text(ref e) => {
                    if let (3, Some(f)) = (depth, field.as_mut()) {
                        let text = e.decode().map_err(|err| DocError::Xml {
                            position: reader.buffer_position(),
                            message: err.to_string(),
                        })?;
                        f.text.push_str(&text);
                    }
                }
                XmlEvent::CData(ref e) => {
                    if let (3, Some(f)) = (depth, field.as_mut()) {
                        f.text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                XmlEvent::GeneralRef(ref e) => {
                    if let (3, Some(f)) = (depth, field.as_mut()) {
                        let name = e.decode().map_err(|err| DocError::Xml {
                            position: reader.buffer_position(),
                            message: err.to_string(),
                        })?;
                        if let Ok(Some(ch)) = e.resolve_char_ref() {
                            f.text.push(ch);
                        } else if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(&name) {
                            f.text.push_str(resolved);
                        } else {
                            // Undeclared entity: keep it verbatim
                            f.text.push('&');
                            f.text.push_str(&name);
                            f.text.push(';');
                        }
                    }
                }
                XmlEvent::End(_) => {
                    match depth {
                        3 => {
                            if let (Some(pending), Some(done)) = (current.as_mut(), field.take()) {
                                pending.fields.push(done);
                            }
                        }
                        2 => {
                            if let Some(pending) = current.take() {
                                declarations.push(Self::finish(pending)?);
                            }
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        tracing::debug!("[Rdfs] Parsed {} declarations", declarations.len());
        Ok(declarations)
    }

    fn open_declaration(e: &BytesStart) -> Result<Option<Pending>> {
        let Some(kind) = DeclKind::from_local_name(e.local_name().as_ref()) else {
            return Ok(None);
        };

        let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let id = match (attribute(e, b"ID"), attribute(e, b"about")) {
            (Some(id), None) | (None, Some(id)) => id,
            (Some(_), Some(_)) => {
                return Err(DocError::Rdfs(format!(
                    "Both rdf:ID and rdf:about on element {}",
                    element
                )))
            }
            (None, None) => {
                return Err(DocError::Rdfs(format!(
                    "Missing rdf:ID or rdf:about on element {}",
                    element
                )))
            }
        };

        Ok(Some(Pending {
            kind,
            id: strip_hash(&id).to_string(),
            fields: Vec::new(),
        }))
    }

    fn open_field(e: &BytesStart) -> Field {
        Field {
            name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            resource: attribute(e, b"resource"),
            text: String::new(),
        }
    }

    fn finish(pending: Pending) -> Result<Declaration> {
        let Pending { kind, id, fields } = pending;

        let declaration = match kind {
            DeclKind::Class => {
                let mut decl = ClassDecl {
                    name: id,
                    ..ClassDecl::default()
                };
                for field in fields {
                    match field.name.as_str() {
                        "label" => decl.label = Some(field.text.trim().to_string()),
                        "comment" => decl.comment = Some(field.text.trim().to_string()),
                        "stereotype" => {
                            decl.stereotype = Some(match field.resource {
                                Some(resource) => resource,
                                None => field.text.trim().to_string(),
                            })
                        }
                        "subClassOf" => decl.parent = Some(required_reference(&field, &decl.name)?),
                        _ => {}
                    }
                }
                Declaration::Class(decl)
            }
            DeclKind::Property => {
                let mut decl = PropertyDecl {
                    id,
                    ..PropertyDecl::default()
                };
                for field in fields {
                    match field.name.as_str() {
                        "label" => decl.label = Some(field.text.trim().to_string()),
                        "domain" => decl.domain = Some(required_reference(&field, &decl.id)?),
                        "range" => decl.range = Some(required_reference(&field, &decl.id)?),
                        "multiplicity" => {
                            let resource = required_reference(&field, &decl.id)?;
                            decl.multiplicity = Some(fragment(&resource).to_string())
                        }
                        "inverseRoleName" => {
                            let resource = field.resource.clone().ok_or_else(|| missing_resource(&field, &decl.id))?;
                            decl.inverse_role_name = Some(resource);
                        }
                        _ => {}
                    }
                }
                Declaration::Property(decl)
            }
            DeclKind::Description => {
                let mut decl = DescriptionDecl { id, label: None };
                for field in fields {
                    if field.name == "label" {
                        decl.label = Some(field.text.trim().to_string());
                    }
                }
                Declaration::Description(decl)
            }
        };

        Ok(declaration)
    }
}

/// Value of an attribute matched by local name (any prefix), unescaped
fn attribute(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .map(|a| {
            let raw = String::from_utf8_lossy(&a.value).into_owned();
            match quick_xml::escape::unescape(&raw) {
                Ok(Cow::Owned(unescaped)) => unescaped,
                _ => raw,
            }
        })
}

fn strip_hash(value: &str) -> &str {
    value.strip_prefix('#').unwrap_or(value)
}

/// Part after the last '#', for values given as full URIs
fn fragment(value: &str) -> &str {
    value.rsplit('#').next().unwrap_or(value)
}

fn required_reference(field: &Field, owner: &str) -> Result<String> {
    field
        .resource
        .as_deref()
        .map(|r| strip_hash(r).to_string())
        .ok_or_else(|| missing_resource(field, owner))
}

fn missing_resource(field: &Field, owner: &str) -> DocError {
    DocError::Rdfs(format!("Missing rdf:resource on <{}> of {}", field.name, owner))
}
