//! SQL compiler that renders a component as the lookup a relational store runs, using sea-query.

use crate::ast::{Command, Component, ComponentSet};
use crate::config::SearchConfig;
use sea_query::{Asterisk, Expr, Iden, PostgresQueryBuilder, Query, SelectStatement, Value};
use thiserror::Error;

/// Table identifier wrapper
#[derive(Debug, Clone)]
pub struct TableName(pub String);

impl Iden for TableName {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = write!(s, "{}", self.0);
    }
}

/// Column identifier wrapper
#[derive(Debug, Clone)]
pub struct ColumnName(pub String);

impl Iden for ColumnName {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = write!(s, "{}", self.0);
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("command '{command}' is not yet supported in {component}")]
    UnsupportedCommand { component: String, command: Command },
    #[error("{0} has no value to compare against")]
    MissingValue(String),
}

/// Compiles components into single-row lookup statements
pub struct LookupCompiler {
    config: SearchConfig,
}

impl LookupCompiler {
    pub fn new() -> Self {
        Self::from_config(SearchConfig::default())
    }

    pub fn from_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Build the select statement for one component
    pub fn statement(&self, component: &Component) -> Result<SelectStatement, CompileError> {
        if component.command != Command::Equals {
            return Err(CompileError::UnsupportedCommand {
                component: component.to_string(),
                command: component.command,
            });
        }
        let value = component
            .value
            .ok_or_else(|| CompileError::MissingValue(component.to_string()))?;

        let table = self.config.get_table_name(component.species.name());
        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(TableName(table))
            .and_where(Expr::col(ColumnName(component.column.0.clone())).eq(Value::BigInt(Some(value))))
            .limit(1);
        Ok(select)
    }

    /// Compile one component into Postgres SQL
    pub fn compile(&self, component: &Component) -> Result<String, CompileError> {
        Ok(self.statement(component)?.to_string(PostgresQueryBuilder))
    }

    /// Compile every component of a set, ordered by species name
    pub fn compile_set(&self, components: &ComponentSet) -> Vec<(String, Result<String, CompileError>)> {
        let mut compiled: Vec<_> = components
            .iter()
            .map(|c| (c.species.0.clone(), self.compile(c)))
            .collect();
        compiled.sort_by(|a, b| a.0.cmp(&b.0));
        compiled
    }
}

impl Default for LookupCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Column, Species};
    use crate::parser::parse;
    use std::collections::HashMap;

    fn component(species: &str, column: &str, command: Command, value: Option<i64>) -> Component {
        Component::new(
            Species(species.to_string()),
            Column(column.to_string()),
            command,
            value,
        )
    }

    #[test]
    fn test_job_lookup_compilation() {
        let compiler = LookupCompiler::new();
        let sql = compiler
            .compile(&component("Job", "id", Command::Equals, Some(412)))
            .unwrap();

        assert!(sql.contains(r#"FROM "jobs""#));
        assert!(sql.contains(r#""id" = 412"#));
        assert!(sql.contains("LIMIT"));
    }

    #[test]
    fn test_table_mapping_from_config() {
        let mut tables = HashMap::new();
        tables.insert("Task".to_string(), "todo_items".to_string());
        let config = SearchConfig {
            tables,
            ..SearchConfig::default()
        };
        let compiler = LookupCompiler::from_config(config);

        let sql = compiler
            .compile(&component("Task", "job_id", Command::Equals, Some(3)))
            .unwrap();
        assert!(sql.contains("todo_items"));
        assert!(sql.contains("job_id"));
    }

    #[test]
    fn test_unsupported_command() {
        let compiler = LookupCompiler::new();
        let result = compiler.compile(&component("Job", "id", Command::Div, Some(2)));
        assert!(matches!(
            result,
            Err(CompileError::UnsupportedCommand { command: Command::Div, .. })
        ));
    }

    #[test]
    fn test_missing_value() {
        let compiler = LookupCompiler::new();
        let result = compiler.compile(&component("Job", "id", Command::Equals, None));
        assert_eq!(result, Err(CompileError::MissingValue("@Job.id=?".to_string())));
    }

    #[test]
    fn test_compile_set_is_ordered() {
        let compiler = LookupCompiler::new();
        let compiled = compiler.compile_set(&parse("@task.id=2 @company.id=1 @job.id=3"));

        let species: Vec<_> = compiled.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(species, vec!["Company", "Job", "Task"]);
        assert!(compiled[0].1.as_ref().unwrap().contains(r#""companies""#));
        assert!(compiled.iter().all(|(_, sql)| sql.is_ok()));
    }
}
