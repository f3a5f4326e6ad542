//! Graph Builder Contract Tests
//!
//! These tests pin the INVARIANTS of graph construction: one instance per class
//! name, order-independent results, and enumeration values that always make
//! their owner an Enum.

use std::collections::BTreeMap;

use rdfsdoc_core::{Declaration, GraphBuilder, Ontology, Stereotype};

type PropertySnapshot = (String, Option<String>, String);

#[derive(Debug, PartialEq, Eq)]
struct ClassSnapshot {
    stereotype: Stereotype,
    label: String,
    parent: Option<String>,
    properties: Vec<PropertySnapshot>,
    values: Vec<String>,
}

/// Name-keyed view of a graph, independent of arena order and declaration order
fn snapshot(graph: &Ontology) -> BTreeMap<String, ClassSnapshot> {
    graph
        .iter()
        .map(|(_, class)| {
            let mut properties: Vec<PropertySnapshot> = class
                .properties
                .values()
                .map(|p| {
                    (
                        p.name.clone(),
                        p.range.map(|r| graph.get(r).name.clone()),
                        p.multiplicity.clone(),
                    )
                })
                .collect();
            properties.sort();

            let mut values: Vec<String> = class.descriptions.keys().cloned().collect();
            values.sort();

            (
                class.name.clone(),
                ClassSnapshot {
                    stereotype: class.stereotype,
                    label: class.label.clone(),
                    parent: class.sub_class.map(|p| graph.get(p).name.clone()),
                    properties,
                    values,
                },
            )
        })
        .collect()
}

fn schema() -> Vec<Declaration> {
    vec![
        Declaration::class("IdentifiedObject").label("IdentifiedObject").into(),
        Declaration::class("Equipment")
            .label("Equipment")
            .parent("IdentifiedObject")
            .into(),
        Declaration::class("Switch").label("Switch").parent("Equipment").into(),
        Declaration::property("Switch.normalOpen", "Switch")
            .label("normalOpen")
            .range("Boolean")
            .multiplicity("M:1..1")
            .into(),
        Declaration::property("Equipment.phases", "Equipment")
            .label("phases")
            .range("PhaseCode")
            .multiplicity("M:0..1")
            .into(),
        Declaration::property("Switch.Terminals", "Switch")
            .label("Terminals")
            .range("Terminal")
            .multiplicity("M:0..n")
            .inverse_role_name("#Terminal.ConductingEquipment")
            .into(),
        Declaration::class("Terminal").label("Terminal").into(),
        Declaration::class("Boolean").stereotype("http://iec.ch/TC57/NonStandard/UML#Primitive").into(),
        Declaration::class("PhaseCode").label("PhaseCode").into(),
        Declaration::description("PhaseCode.ABC").label("ABC").into(),
        Declaration::description("PhaseCode.N").label("N").into(),
    ]
}

/// WHY: Graph content must not depend on where declarations appear in the file
/// REASON: RDFS files are unordered sets of statements; forward references are normal
/// BREAKS: Documentation differs between two serializations of the same schema
#[test]
fn declaration_order_does_not_change_graph() {
    let forward = GraphBuilder::build("cim", schema());

    let mut reversed_decls = schema();
    reversed_decls.reverse();
    let reversed = GraphBuilder::build("cim", reversed_decls);

    let mut rotated_decls = schema();
    rotated_decls.rotate_left(4);
    let rotated = GraphBuilder::build("cim", rotated_decls);

    assert_eq!(snapshot(&forward), snapshot(&reversed));
    assert_eq!(snapshot(&forward), snapshot(&rotated));
}

/// WHY: A class referenced before its declaration is the same instance afterwards
/// REASON: Parent links and property ranges are ClassIds into one arena
/// BREAKS: Inheritance and "used in" listings point at orphan stubs
#[test]
fn forward_reference_yields_single_instance() {
    let graph = GraphBuilder::build(
        "cim",
        vec![
            Declaration::property("Switch.Terminals", "Switch").range("Terminal").into(),
            Declaration::class("Breaker").parent("Switch").into(),
            Declaration::class("Terminal").label("Terminal").comment("Connection point").into(),
            Declaration::class("Switch").label("Switch").into(),
        ],
    );

    assert_eq!(graph.len(), 3);

    let switch = graph.find("Switch").unwrap();
    let terminal = graph.find("Terminal").unwrap();
    let breaker = graph.find("Breaker").unwrap();

    assert_eq!(graph.get(breaker).sub_class, Some(switch));
    assert_eq!(graph.get(switch).properties["Terminals"].range, Some(terminal));
    assert_eq!(graph.get(terminal).comment, "Connection point");
    assert_eq!(graph.get(switch).label, "Switch");
}

/// WHY: Any class owning enumeration values is an Enum
/// REASON: Enum values arrive as separate Description statements in any order
/// BREAKS: Enum pages land under /classes and diagrams use the wrong member token
#[test]
fn description_forces_enum_in_any_order() {
    let before = GraphBuilder::build(
        "cim",
        vec![
            Declaration::description("UnitSymbol.W").into(),
            Declaration::class("UnitSymbol").stereotype("Class").into(),
        ],
    );
    let after = GraphBuilder::build(
        "cim",
        vec![
            Declaration::class("UnitSymbol").stereotype("Class").into(),
            Declaration::description("UnitSymbol.W").into(),
        ],
    );

    assert_eq!(before.lookup("UnitSymbol").unwrap().stereotype, Stereotype::Enum);
    assert_eq!(after.lookup("UnitSymbol").unwrap().stereotype, Stereotype::Enum);
}

/// WHY: Re-applying a declaration never changes the graph
/// REASON: Profiles are often merged from overlapping files
/// BREAKS: Duplicate rows on pages and duplicate diagram members
#[test]
fn reapplying_declarations_is_idempotent() {
    let once = GraphBuilder::build("cim", schema());

    let mut twice_decls = schema();
    twice_decls.extend(schema());
    let mut builder = GraphBuilder::new("cim");
    builder.extend(twice_decls);
    let stats = builder.stats();
    let twice = builder.finish();

    assert_eq!(snapshot(&once), snapshot(&twice));
    assert_eq!(stats.duplicates, 5);
    assert_eq!(stats.dropped, 0);
}

/// WHY: A property whose id does not name its domain is dropped, not re-homed
/// REASON: The id's first segment and rdfs:domain must agree
/// BREAKS: Properties silently attach to the wrong class
#[test]
fn mismatched_property_owner_is_dropped() {
    let mut builder = GraphBuilder::new("cim");
    builder.extend(vec![
        Declaration::property("Terminal.sequenceNumber", "Switch").into(),
        Declaration::property("noDot", "Switch").into(),
    ]);
    let stats = builder.stats();
    let graph = builder.finish();

    assert_eq!(stats.dropped, 2);
    assert!(graph.lookup("Switch").unwrap().properties.is_empty());
    assert!(graph.find("Terminal").is_none());
}

/// WHY: Multiplicity is stored without its "M:" marker
/// REASON: Pages and diagrams print the bare cardinality
#[test]
fn multiplicity_prefix_is_stripped() {
    let graph = GraphBuilder::build("cim", schema());
    let switch = graph.lookup("Switch").unwrap();

    assert_eq!(switch.properties["normalOpen"].multiplicity, "1..1");
    assert_eq!(switch.properties["Terminals"].multiplicity, "0..n");
    assert_eq!(switch.properties["Terminals"].inverse_role_name, "#Terminal.ConductingEquipment");
}
