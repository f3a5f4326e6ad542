//! Site Generation Integration Tests
//!
//! Generates a site from the fixture schema into a temporary directory and
//! checks the written layout, the search index and cross-page links.

use std::fs;
use std::path::{Path, PathBuf};

use rdfsdoc_core::{
    load_ontology, Config, Declaration, DiagramImage, Entity, GraphBuilder, Ontology, OutputFormat,
    RenderStatus, SiteGenerator,
};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("core-rs/tests/fixtures/grid_profile.rdf")
}

fn setup(output_format: OutputFormat) -> (TempDir, Config, Ontology) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        rdfs_path: fixture(),
        plantuml_url: "http://localhost:8080".to_string(),
        output_path: temp_dir.path().join("site"),
        title: "Grid Profile".to_string(),
        description: "Switching equipment".to_string(),
        common_namespace: "cim".to_string(),
        use_namespace_for_properties: false,
        render_concurrency: 4,
        output_format,
    };
    let graph = load_ontology(&config.rdfs_path, &config.common_namespace).unwrap();
    (temp_dir, config, graph)
}

#[test]
fn test_output_directories_created() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();

    let root = &config.output_path;
    for dir in ["classes", "enums", "datatypes", "primitives", "properties", "assets/css", "assets/js"] {
        assert!(root.join(dir).is_dir(), "missing directory {}", dir);
    }
    assert!(root.join("datatypes/cim:ActivePower.html").exists());
    assert!(root.join("primitives/cim:Boolean.html").exists());
    assert!(root.join("properties/cim:Terminal.ConductingEquipment.html").exists());
}

#[test]
fn test_search_index_shape() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();

    let content = fs::read_to_string(config.output_path.join("assets/search-index.json")).unwrap();
    let index: serde_json::Value = serde_json::from_str(&content).unwrap();

    let classes = index["classes"].as_array().unwrap();
    let ids: Vec<&str> = classes.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["cim:Breaker", "cim:ConductingEquipment", "cim:Switch", "cim:Terminal"]);
    assert_eq!(classes[0]["url"], "/classes/cim:Breaker.html");
    assert_eq!(classes[0]["name"], "Breaker");
    assert!(classes[0]["description"].as_str().unwrap().starts_with("A mechanical switching device"));

    let properties = index["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 3);
    assert_eq!(properties[0]["id"], "cim:Switch.normalOpen");
    assert_eq!(properties[0]["url"], "/properties/cim:Switch.normalOpen.html");
}

#[test]
fn test_index_page_lists_counts_and_description() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    let html = SiteGenerator::new(&graph, &config)
        .unwrap()
        .with_generated_at("2026-01-01 00:00 UTC")
        .render_index()
        .unwrap();

    assert!(html.contains("<h1>Grid Profile</h1>"));
    assert!(html.contains("Switching equipment"));
    assert!(html.contains("Classes: 4"));
    assert!(html.contains("Enumerations: 1"));
    assert!(html.contains("Generated 2026-01-01 00:00 UTC"));
}

#[test]
fn test_class_page_shows_inheritance_and_children() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    let site = SiteGenerator::new(&graph, &config).unwrap();

    let switch = site.class_page(graph.find("Switch").unwrap());
    let ancestors: Vec<&str> = switch.ancestors.iter().map(|l| l.id.as_str()).collect();
    let children: Vec<&str> = switch.children.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ancestors, vec!["cim:ConductingEquipment"]);
    assert_eq!(children, vec!["cim:Breaker"]);

    let equipment = site.class_page(graph.find("ConductingEquipment").unwrap());
    let used_in: Vec<&str> = equipment.used_in.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(used_in, vec!["cim:Terminal"]);
}

#[test]
fn test_png_diagrams_written_as_files() {
    let (_temp_dir, config, mut graph) = setup(OutputFormat::Png);
    for name in ["Breaker", "Switch"] {
        let id = graph.find(name).unwrap();
        graph.get_mut(id).diagram = RenderStatus::Rendered(DiagramImage {
            format: OutputFormat::Png,
            bytes: vec![0x89, b'P', b'N', b'G'],
        });
    }

    let summary = SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();

    assert_eq!(summary.images, 2);
    assert!(config.output_path.join("classes/cim:Breaker.png").exists());
    assert!(config.output_path.join("classes/cim:Switch.png").exists());
    assert!(!config.output_path.join("classes/cim:Terminal.png").exists());
}

#[test]
fn test_namespaced_property_display() {
    let (_temp_dir, mut config, graph) = setup(OutputFormat::Svg);
    config.use_namespace_for_properties = true;
    let site = SiteGenerator::new(&graph, &config).unwrap();

    let page = site.class_page(graph.find("Terminal").unwrap());
    let names: Vec<&str> = page.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["cim:ConductingEquipment", "cim:phases"]);
}

#[test]
fn test_regeneration_overwrites_existing_site() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    let site = SiteGenerator::new(&graph, &config).unwrap();

    let first = site.generate().unwrap();
    let second = site.generate().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_datatype_property_pages_written() {
    let (_temp_dir, config, _) = setup(OutputFormat::Svg);
    let graph = GraphBuilder::build(
        "cim",
        vec![
            Declaration::class("ActivePower").stereotype("CIMDatatype").into(),
            Declaration::property("ActivePower.value", "ActivePower").range("Float").into(),
            Declaration::class("Float").stereotype("Primitive").into(),
        ],
    );

    let summary = SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();
    assert_eq!(summary.property_pages, 1);

    let root = &config.output_path;
    let datatype = fs::read_to_string(root.join("datatypes/cim:ActivePower.html")).unwrap();
    assert!(datatype.contains("cim:ActivePower.value.html"));

    let property = fs::read_to_string(root.join("properties/cim:ActivePower.value.html")).unwrap();
    assert!(property.contains("cim:ActivePower.value"));
    assert!(property.contains("datatypes"));
}

#[test]
fn test_every_linked_property_page_exists() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();

    let root = &config.output_path;
    for (_, class) in graph.iter() {
        for property in class.properties.values() {
            let page = root.join(format!("properties/{}.html", property.id()));
            assert!(page.exists(), "missing page for {}", property.id());
        }
    }
}

#[test]
fn test_search_script_written_and_loaded() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();

    let root = &config.output_path;
    let script = fs::read_to_string(root.join("assets/js/search.js")).unwrap();
    assert!(script.contains("/assets/search-index.json"));

    for page in ["index.html", "classes/cim:Switch.html", "properties/cim:Switch.normalOpen.html"] {
        let html = fs::read_to_string(root.join(page)).unwrap();
        assert!(html.contains("search.js\"></script>"), "{} does not load search", page);
        assert!(html.contains("id=\"searchInput\""));
    }
}

#[test]
fn test_pages_carry_category_navigation() {
    let (_temp_dir, config, graph) = setup(OutputFormat::Svg);
    SiteGenerator::new(&graph, &config).unwrap().generate().unwrap();

    let html = fs::read_to_string(config.output_path.join("enums/cim:PhaseCode.html")).unwrap();
    assert!(html.contains("<summary>Class (4)</summary>"));
    assert!(html.contains("<details open>\n        <summary>Enum (1)</summary>"));
    assert!(html.contains(">Breaker</a>"));
}
