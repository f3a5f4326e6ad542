/**
 * site/mod.rs
 * Static documentation site generator
 *
 * Output layout:
 *   index.html
 *   assets/css/site.css
 *   assets/search-index.json
 *   assets/js/search.js
 *   {classes,enums,datatypes,primitives}/{id}.html
 *   classes/{id}.png              (PNG output only)
 *   properties/{id}.html           (every property, whatever its domain's stereotype)
 */

pub mod pages;
pub mod templates;

pub use pages::{ClassPage, IndexPage, Link, PropertyPage, PropertyRow, SearchEntry, SearchIndex};

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::config::Config;
use crate::errors::Result;
use crate::model::{ClassId, Entity, Ontology, OutputFormat, Property, RenderStatus, Stereotype};
use pages::{Counts, Layout, NavGroup, ValueRow};

/// Classes and properties listed on the index page
pub const INDEX_LISTING_LIMIT: usize = 20;

/// Files written by one generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSummary {
    pub class_pages: usize,
    pub property_pages: usize,
    pub images: usize,
}

pub struct SiteGenerator<'a> {
    graph: &'a Ontology,
    config: &'a Config,
    tera: Tera,
    generated_at: String,
    counts: Counts,
    nav: Vec<NavGroup>,
}

impl<'a> SiteGenerator<'a> {
    pub fn new(graph: &'a Ontology, config: &'a Config) -> Result<Self> {
        Ok(Self {
            graph,
            config,
            tera: templates::engine()?,
            generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            counts: Counts::of(graph),
            nav: NavGroup::all(graph),
        })
    }

    /// Override the footer timestamp
    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = generated_at.into();
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Write the whole site under the configured output path
    pub fn generate(&self) -> Result<SiteSummary> {
        let root = self.config.output_path.clone();
        tracing::info!("[Site] Generating site in {}", root.display());

        self.create_layout(&root)?;
        fs::write(root.join("assets/css/site.css"), templates::SITE_CSS)?;
        fs::write(root.join("assets/js/search.js"), templates::SEARCH_JS)?;

        let index = serde_json::to_string_pretty(&SearchIndex::of(self.graph))?;
        fs::write(root.join("assets/search-index.json"), index)?;

        fs::write(root.join("index.html"), self.render_index()?)?;

        let mut summary = SiteSummary::default();
        for stereotype in Stereotype::ALL {
            for id in self.graph.ids_by_stereotype(stereotype) {
                let class = self.graph.get(id);
                let dir = root.join(class.output_category());

                if let Some(image) = class.diagram.image() {
                    if image.format == OutputFormat::Png {
                        fs::write(dir.join(format!("{}.png", class.id())), &image.bytes)?;
                        summary.images += 1;
                    }
                }

                fs::write(dir.join(format!("{}.html", class.id())), self.render_class(id)?)?;
                summary.class_pages += 1;
            }
        }

        // Every class page links its property rows, so every property gets a page
        for property in self.graph.all_properties() {
            fs::write(
                root.join("properties").join(format!("{}.html", property.id())),
                self.render_property(property)?,
            )?;
            summary.property_pages += 1;
        }

        tracing::info!(
            "[Site] Wrote {} class pages, {} property pages, {} images",
            summary.class_pages,
            summary.property_pages,
            summary.images
        );
        Ok(summary)
    }

    fn create_layout(&self, root: &Path) -> Result<()> {
        let mut dirs: Vec<PathBuf> = Stereotype::ALL
            .iter()
            .map(|s| root.join(s.output_category()))
            .collect();
        dirs.push(root.join("properties"));
        dirs.push(root.join("assets").join("css"));
        dirs.push(root.join("assets").join("js"));

        for dir in dirs {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    fn layout(&self, page_title: &str, current_page: &str, current_category: &str) -> Layout {
        Layout {
            site_title: self.config.title.clone(),
            page_title: page_title.to_string(),
            current_page: current_page.to_string(),
            current_category: current_category.to_string(),
            generated_at: self.generated_at.clone(),
            counts: self.counts.clone(),
            nav: self.nav.clone(),
        }
    }

    pub fn index_page(&self) -> IndexPage {
        let mut classes: Vec<Link> = self
            .graph
            .ids_by_stereotype(Stereotype::Class)
            .into_iter()
            .map(|id| Link::class(self.graph, id))
            .collect();
        classes.sort_by(|a, b| a.id.cmp(&b.id));
        classes.truncate(INDEX_LISTING_LIMIT);

        let mut properties: Vec<Link> = self.graph.class_properties().into_iter().map(Link::property).collect();
        properties.sort_by(|a, b| a.id.cmp(&b.id));
        properties.truncate(INDEX_LISTING_LIMIT);

        IndexPage {
            layout: self.layout("Home", "/index.html", ""),
            description: self.config.description.clone(),
            classes,
            properties,
        }
    }

    pub fn class_page(&self, id: ClassId) -> ClassPage {
        let graph = self.graph;
        let class = graph.get(id);

        let ancestors = match graph.ancestors(id) {
            Ok(chain) => chain.into_iter().map(|a| Link::class(graph, a)).collect(),
            Err(e) => {
                tracing::warn!("[Site] {}: {}", class.name, e);
                Vec::new()
            }
        };

        let (diagram_svg, diagram_png, diagram_error) = match &class.diagram {
            RenderStatus::Rendered(image) => match image.format {
                OutputFormat::Svg => (image.as_svg(), None, None),
                OutputFormat::Png => (None, Some(format!("/{}/{}.png", class.output_category(), class.id())), None),
            },
            RenderStatus::Failed(message) => (None, None, Some(message.clone())),
            RenderStatus::Pending => (None, None, None),
        };

        ClassPage {
            layout: self.layout(class.display_label(), &class.href(), class.output_category()),
            id: class.id(),
            name: class.name.clone(),
            label: class.display_label().to_string(),
            comment: class.comment.clone(),
            stereotype: class.stereotype.to_string(),
            badge: class.stereotype.badge_class().to_string(),
            category: class.output_category().to_string(),
            properties: class
                .properties
                .values()
                .map(|p| PropertyRow::new(graph, p, self.config.use_namespace_for_properties))
                .collect(),
            ancestors,
            children: graph.children(id).into_iter().map(|c| Link::class(graph, c)).collect(),
            used_in: graph.used_in(id).into_iter().map(|c| Link::class(graph, c)).collect(),
            values: class
                .descriptions
                .values()
                .map(|d| ValueRow {
                    id: d.id(),
                    name: d.name.clone(),
                    label: d.label.clone(),
                })
                .collect(),
            diagram_svg,
            diagram_png,
            diagram_error,
        }
    }

    pub fn property_page(&self, property: &Property) -> PropertyPage {
        let row = PropertyRow::new(self.graph, property, self.config.use_namespace_for_properties);
        let domain_category = self.graph.get(property.domain).output_category();
        PropertyPage {
            layout: self.layout(&row.link.label, &row.link.href, domain_category),
            label: row.link.label.clone(),
            domain: Link::class(self.graph, property.domain),
            row,
        }
    }

    pub fn render_index(&self) -> Result<String> {
        self.render("index.html", &self.index_page())
    }

    pub fn render_class(&self, id: ClassId) -> Result<String> {
        self.render("class.html", &self.class_page(id))
    }

    pub fn render_property(&self, property: &Property) -> Result<String> {
        self.render("property.html", &self.property_page(property))
    }

    fn render<T: serde::Serialize>(&self, template: &str, page: &T) -> Result<String> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(template, &context)?)
    }
}
