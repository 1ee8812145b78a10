//! Tests for assembling statements from fragments.

mod common;
use common::*;

use sqlsplice_core::{
    ClauseMap, ClauseSlot, Fragment, Marker, Param, Query, Section, SpliceError, SqlValue,
};

fn value(value: i64, offset: usize) -> Marker {
    Marker::new(Param::Value(SqlValue::Int(value)), offset)
}

fn subquery(value: i64, offset: usize) -> Marker {
    Marker::new(
        Param::Subquery(Query::new("SELECT ?", vec![SqlValue::Int(value)])),
        offset,
    )
}

fn assert_builds(map: &ClauseMap, sql: &str, parameters: &[i64]) {
    assert_eq!(map.build_sql().unwrap(), sql);
    assert_eq!(map.build_parameters().unwrap(), ints(parameters));
}

#[test]
fn empty_map_cannot_be_built() {
    let map = ClauseMap::new();

    assert_eq!(map.build_sql().unwrap_err(), SpliceError::NoSection);
    assert_eq!(map.build_parameters().unwrap_err(), SpliceError::NoSection);
    assert_eq!(map.build().unwrap_err().to_string(), "no section provided yet");
}

#[test]
fn set_section() {
    let mut map = ClauseMap::new();

    map.set_section_for(
        ClauseSlot::Columns,
        Fragment::with_markers("v + ?", vec![value(5, 4)]),
    );
    assert_builds(&map, "SELECT v + ?", &[5]);

    map.set_section_for(ClauseSlot::Columns, "id, name");
    assert_builds(&map, "SELECT id, name", &[]);

    map.set_section_for(ClauseSlot::Tables, "user");
    assert_builds(&map, "SELECT id, name FROM user", &[]);
}

#[test]
fn append_to_empty_section_ignores_glue() {
    let mut map = ClauseMap::new();

    map.append_section_to(
        ClauseSlot::Columns,
        Fragment::with_markers("v + ?", vec![value(5, 4)]),
        " should-be-ignored ",
    );

    assert_builds(&map, "SELECT v + ?", &[5]);
}

#[test]
fn append_to_existing_section() {
    let mut map = ClauseMap::new();
    map.set_section_for(ClauseSlot::Columns, "id, name");

    map.append_section_to(
        ClauseSlot::Columns,
        Fragment::with_markers("money, ?", vec![value(5, 7)]),
        ", ",
    );

    assert_builds(&map, "SELECT id, name, money, ?", &[5]);
}

#[test]
fn where_is_parenthesized_on_first_append_only() {
    let mut map = ClauseMap::new();
    map.set_section_for(ClauseSlot::Where, "a = 1");
    assert_builds(&map, "SELECT WHERE a = 1", &[]);

    map.append_section_to(ClauseSlot::Where, "b = 1", " AND ");
    assert_builds(&map, "SELECT WHERE (a = 1) AND b = 1", &[]);

    map.append_section_to(ClauseSlot::Where, "c = 1", " AND ");
    assert_builds(&map, "SELECT WHERE (a = 1) AND b = 1 AND c = 1", &[]);
}

#[test]
fn subqueries_are_injected() {
    let mut map = ClauseMap::new();

    map.set_section_for(
        ClauseSlot::Where,
        Fragment::with_markers("a = ?", vec![subquery(10, 4)]),
    );
    assert_builds(&map, "SELECT WHERE a = (SELECT ?)", &[10]);

    map.append_section_to(
        ClauseSlot::Where,
        Fragment::with_markers("b = ?", vec![subquery(20, 4)]),
        " AND ",
    );
    assert_builds(
        &map,
        "SELECT WHERE (a = (SELECT ?)) AND b = (SELECT ?)",
        &[10, 20],
    );

    map.append_section_to(
        ClauseSlot::Where,
        Fragment::with_markers("c = ?", vec![subquery(30, 4)]),
        " AND ",
    );
    assert_builds(
        &map,
        "SELECT WHERE (a = (SELECT ?)) AND b = (SELECT ?) AND c = (SELECT ?)",
        &[10, 20, 30],
    );
}

#[test]
fn nested_subqueries_flatten() {
    let innermost = Query::new("SELECT id FROM c WHERE k = ?", vec![SqlValue::Int(3)]);

    let mut inner = ClauseMap::new();
    inner.set_section_for(ClauseSlot::Columns, "id");
    inner.set_section_for(ClauseSlot::Tables, "b");
    inner.set_section_for(
        ClauseSlot::Where,
        Fragment::with_markers(
            "x = ? AND y IN ?",
            vec![value(2, 4), Marker::new(Param::Subquery(innermost), 15)],
        ),
    );
    let inner = inner.build().unwrap();

    let mut outer = ClauseMap::new();
    outer.set_section_for(ClauseSlot::Columns, "*");
    outer.set_section_for(ClauseSlot::Tables, "a");
    outer.set_section_for(
        ClauseSlot::Where,
        Fragment::with_markers(
            "p = ? AND q IN ? AND r = ?",
            vec![
                value(1, 4),
                Marker::new(Param::Subquery(inner), 15),
                value(4, 25),
            ],
        ),
    );

    assert_builds(
        &outer,
        "SELECT * FROM a WHERE p = ? AND q IN \
         (SELECT id FROM b WHERE x = ? AND y IN (SELECT id FROM c WHERE k = ?)) AND r = ?",
        &[1, 2, 3, 4],
    );
}

#[test]
fn requested_section_is_returned() {
    let mut map = ClauseMap::new();
    map.set_section_for(ClauseSlot::Columns, "id, name");

    assert_eq!(
        map.section_for(ClauseSlot::Columns).unwrap(),
        &Fragment::literal("id, name")
    );
    assert_eq!(chunk(&map, ClauseSlot::Columns), "id, name");
}

#[test]
fn missing_section_is_reported() {
    let map = ClauseMap::new();

    let error = map.section_for(ClauseSlot::Columns).unwrap_err();
    assert_eq!(error, SpliceError::SectionNotFound(ClauseSlot::Columns));
    assert_eq!(error.to_string(), "section COLUMNS not found");
}

#[test]
fn section_presence() {
    let mut map = ClauseMap::new();
    assert!(!map.has_section_for(ClauseSlot::Columns));

    map.set_section_for(ClauseSlot::Columns, "id, name");
    assert!(map.has_section_for(ClauseSlot::Columns));
    assert!(!map.has_section_for(ClauseSlot::Tables));
}

#[test]
fn copy_evolves_independently() {
    let mut map = ClauseMap::new();
    map.set_section_for(ClauseSlot::Columns, "1");
    let mut copy = map.copy();

    map.set_section_for(ClauseSlot::Tables, "t1");
    copy.set_section_for(ClauseSlot::Tables, "t2");

    assert_builds(&map, "SELECT 1 FROM t1", &[]);
    assert_builds(&copy, "SELECT 1 FROM t2", &[]);
}

#[test]
fn copy_of_composite_evolves_independently() {
    let mut map = ClauseMap::new();
    map.set_section_for(ClauseSlot::Where, "a = 1");
    map.append_section_to(ClauseSlot::Where, "b = 2", " AND ");
    let mut copy = map.copy();

    map.append_section_to(ClauseSlot::Where, "c = 3", " AND ");
    copy.append_section_to(ClauseSlot::Where, "d = 4", " OR ");

    assert_builds(&map, "SELECT WHERE (a = 1) AND b = 2 AND c = 3", &[]);
    assert_builds(&copy, "SELECT WHERE (a = 1) AND b = 2 OR d = 4", &[]);
    assert!(map.section_for(ClauseSlot::Where).unwrap().is_composite());
}

#[test]
fn markers_follow_composition() {
    let mut map = ClauseMap::new();
    map.set_section_for(
        ClauseSlot::Where,
        Fragment::with_markers("a = ?", vec![value(1, 4)]),
    );
    map.append_section_to(
        ClauseSlot::Where,
        Fragment::with_markers("b = ?", vec![value(2, 4)]).parenthesized(),
        " AND ",
    );

    let fragment = map.section_for(ClauseSlot::Where).unwrap();
    assert_eq!(fragment.chunk(), "(a = ?) AND (b = ?)");
    assert_eq!(
        fragment
            .markers()
            .iter()
            .map(|marker| marker.offset)
            .collect::<Vec<_>>(),
        vec![5, 17]
    );
}
