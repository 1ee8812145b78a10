#![allow(dead_code)]

use sqlsplice_core::{
    ClauseMap, ClauseParser, ClauseSlot, Param, Query, QueryBuilder, QueryEnvironment, Section,
    SpliceError, SqlValue,
};

pub fn environment() -> QueryEnvironment<ClauseParser> {
    QueryEnvironment::new(ClauseParser::new())
}

pub fn builder<'p>(
    environment: &'p QueryEnvironment<ClauseParser>,
    sql: &str,
    parameters: Vec<Param>,
) -> QueryBuilder<'p, ClauseParser> {
    environment
        .builder_from_str(sql, parameters)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn build(builder: &QueryBuilder<'_, ClauseParser>) -> Query {
    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build\nError: {e:?}"))
}

pub fn parse_err(sql: &str, parameters: Vec<Param>) -> SpliceError {
    environment()
        .builder_from_str(sql, parameters)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn chunk(map: &ClauseMap, slot: ClauseSlot) -> String {
    map.section_for(slot)
        .unwrap_or_else(|e| panic!("Missing {slot}: {e}"))
        .chunk()
        .into_owned()
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}

pub fn int_params(values: &[i64]) -> Vec<Param> {
    values
        .iter()
        .copied()
        .map(|value| Param::Value(SqlValue::Int(value)))
        .collect()
}
