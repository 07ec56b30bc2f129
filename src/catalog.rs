//! Schema and object listing built on plain SQL queries.
//!
//! Filesystem plugins (`dfs`, `cp`) are listed with `SHOW FILES`; every other
//! plugin is assumed to be an RDBMS connection and listed with `SHOW TABLES`,
//! falling back to the Oracle-style `SYS.ALL_OBJECTS` view when that yields
//! nothing. Schema identifiers are interpolated verbatim.

use crate::{
    error::Result,
    models::{CatalogEntry, CellValue, Table},
};
use log::debug;

/// Anything that can run a SQL statement and return a typed table.
pub trait SqlExecutor {
    fn execute(&self, sql: &str) -> Result<Table>;
}

/// Storage family of a plugin root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    FileSystem,
    Rdbms,
}

const FILESYSTEM_PLUGINS: &[&str] = &["dfs", "cp"];

/// Dot-delimited schema identifier, e.g. `dfs.root` or `oracle.HR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> SchemaPath<'a> {
    /// Split on `.`; no other validation.
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            segments: raw.split('.').collect(),
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// First segment: the storage or connection name.
    pub fn plugin_root(&self) -> &'a str {
        self.segments.first().copied().unwrap_or("")
    }

    /// Second segment, if any: the namespace or owner inside the plugin.
    pub fn owner(&self) -> Option<&'a str> {
        self.segments.get(1).copied()
    }

    pub fn plugin_kind(&self) -> PluginKind {
        let root = self.plugin_root();
        if FILESYSTEM_PLUGINS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(root))
        {
            PluginKind::FileSystem
        } else {
            PluginKind::Rdbms
        }
    }
}

pub fn list_schemas_sql() -> &'static str {
    "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA ORDER BY SCHEMA_NAME"
}

pub fn show_files_sql(schema: &SchemaPath<'_>) -> String {
    format!("SHOW FILES IN `{}`", schema.as_str())
}

pub fn show_tables_sql(schema: &SchemaPath<'_>) -> String {
    format!("SHOW TABLES IN `{}`", schema.as_str())
}

/// Object listing through the connection's `SYS.ALL_OBJECTS` view.
pub fn all_objects_sql(schema: &SchemaPath<'_>) -> String {
    let owner_filter = match schema.owner() {
        Some(owner) => format!("= '{}'", owner.to_uppercase()),
        None => "IS NOT NULL".to_string(),
    };
    format!(
        "SELECT OWNER || '.' || OBJECT_NAME AS NAME, OBJECT_TYPE AS TYPE \
         FROM `{}`.SYS.ALL_OBJECTS \
         WHERE OBJECT_TYPE IN ('TABLE', 'VIEW', 'SYNONYM') \
         AND OWNER {} \
         AND OWNER NOT IN ('SYS', 'SYSTEM') \
         ORDER BY OWNER, OBJECT_NAME",
        schema.plugin_root(),
        owner_filter
    )
}

/// Schema names in engine order; empty when the query fails.
///
/// Null `SCHEMA_NAME` cells are skipped rather than rendered as `"null"`.
pub fn list_schemas<E: SqlExecutor + ?Sized>(executor: &E) -> Vec<String> {
    let Ok(table) = executor.execute(list_schemas_sql()) else {
        return Vec::new();
    };

    table
        .column("SCHEMA_NAME")
        .map(|values| {
            values
                .into_iter()
                .filter(|v| !v.is_null())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Objects inside `schema`; empty when every attempted query fails.
pub fn list_objects<E: SqlExecutor + ?Sized>(executor: &E, schema: &str) -> Vec<CatalogEntry> {
    let path = SchemaPath::parse(schema);
    match path.plugin_kind() {
        PluginKind::FileSystem => list_files(executor, &path),
        PluginKind::Rdbms => list_tables(executor, &path),
    }
}

fn list_files<E: SqlExecutor + ?Sized>(executor: &E, path: &SchemaPath<'_>) -> Vec<CatalogEntry> {
    let Ok(table) = executor.execute(&show_files_sql(path)) else {
        return Vec::new();
    };

    table
        .rows_as_maps()
        .into_iter()
        .map(|row| {
            let name = row.get("name").cloned().unwrap_or(CellValue::Null);
            CatalogEntry::from([
                ("NAME".to_string(), name),
                ("TYPE".to_string(), CellValue::from("FILE/VIEW")),
            ])
        })
        .collect()
}

fn list_tables<E: SqlExecutor + ?Sized>(executor: &E, path: &SchemaPath<'_>) -> Vec<CatalogEntry> {
    // A failed SHOW TABLES is treated the same as an empty one
    if let Ok(mut table) = executor.execute(&show_tables_sql(path)) {
        if !table.is_empty() {
            table.rename_column("TABLE_NAME", "NAME");
            return table.into_records();
        }
    }

    debug!(
        "[DRILL_CATALOG] SHOW TABLES empty for '{}', falling back to ALL_OBJECTS",
        path.as_str()
    );
    match executor.execute(&all_objects_sql(path)) {
        Ok(table) => table.into_records(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillLinkError;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned results and records the SQL it was asked to run.
    struct ScriptedExecutor {
        results: RefCell<VecDeque<Result<Table>>>,
        issued: RefCell<Vec<String>>,
    }

    impl ScriptedExecutor {
        fn new(results: Vec<Result<Table>>) -> Self {
            Self {
                results: RefCell::new(results.into()),
                issued: RefCell::new(Vec::new()),
            }
        }
    }

    impl SqlExecutor for ScriptedExecutor {
        fn execute(&self, sql: &str) -> Result<Table> {
            self.issued.borrow_mut().push(sql.to_string());
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(DrillLinkError::NoSession))
        }
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn failed() -> Result<Table> {
        Err(DrillLinkError::QueryFailed {
            status_code: 500,
            message: "boom".into(),
        })
    }

    #[test]
    fn test_schema_path_parts() {
        let path = SchemaPath::parse("oracle.hr.extra");
        assert_eq!(path.plugin_root(), "oracle");
        assert_eq!(path.owner(), Some("hr"));
        assert_eq!(path.plugin_kind(), PluginKind::Rdbms);

        assert_eq!(SchemaPath::parse("DFS.tmp").plugin_kind(), PluginKind::FileSystem);
        assert_eq!(SchemaPath::parse("cp").plugin_kind(), PluginKind::FileSystem);
        assert_eq!(SchemaPath::parse("cp").owner(), None);
    }

    #[test]
    fn test_all_objects_sql_owner_filter() {
        let sql = all_objects_sql(&SchemaPath::parse("oracle.hr"));
        assert_eq!(
            sql,
            "SELECT OWNER || '.' || OBJECT_NAME AS NAME, OBJECT_TYPE AS TYPE \
             FROM `oracle`.SYS.ALL_OBJECTS \
             WHERE OBJECT_TYPE IN ('TABLE', 'VIEW', 'SYNONYM') \
             AND OWNER = 'HR' \
             AND OWNER NOT IN ('SYS', 'SYSTEM') \
             ORDER BY OWNER, OBJECT_NAME"
        );

        let sql = all_objects_sql(&SchemaPath::parse("oracle"));
        assert!(sql.contains("AND OWNER IS NOT NULL AND"));
    }

    #[test]
    fn test_list_schemas_returns_column_values() {
        let executor = ScriptedExecutor::new(vec![Ok(table(
            &["SCHEMA_NAME"],
            vec![vec!["cp.default".into()], vec!["dfs.root".into()]],
        ))]);

        assert_eq!(list_schemas(&executor), vec!["cp.default", "dfs.root"]);
        assert_eq!(executor.issued.borrow()[0], list_schemas_sql());
    }

    #[test]
    fn test_list_schemas_skips_null_names() {
        let executor = ScriptedExecutor::new(vec![Ok(table(
            &["SCHEMA_NAME"],
            vec![vec!["cp.default".into()], vec![CellValue::Null], vec!["sys".into()]],
        ))]);

        assert_eq!(list_schemas(&executor), vec!["cp.default", "sys"]);
    }

    #[test]
    fn test_list_schemas_swallows_failure() {
        let executor = ScriptedExecutor::new(vec![failed()]);
        assert!(list_schemas(&executor).is_empty());
    }

    #[test]
    fn test_list_files_maps_names() {
        let executor = ScriptedExecutor::new(vec![Ok(table(
            &["name", "isDirectory"],
            vec![
                vec!["a.csv".into(), CellValue::Bool(false)],
                vec!["logs".into(), CellValue::Bool(true)],
            ],
        ))]);

        let entries = list_objects(&executor, "dfs.root");

        assert_eq!(executor.issued.borrow().as_slice(), ["SHOW FILES IN `dfs.root`"]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["NAME"], CellValue::from("a.csv"));
        assert_eq!(entries[0]["TYPE"], CellValue::from("FILE/VIEW"));
        assert_eq!(entries[1].len(), 2);
    }

    #[test]
    fn test_list_files_failure_is_empty() {
        let executor = ScriptedExecutor::new(vec![failed()]);
        assert!(list_objects(&executor, "cp.default").is_empty());
        assert_eq!(executor.issued.borrow().len(), 1);
    }

    #[test]
    fn test_show_tables_renames_table_name() {
        let executor = ScriptedExecutor::new(vec![Ok(table(
            &["TABLE_SCHEMA", "TABLE_NAME"],
            vec![vec!["pg.public".into(), "orders".into()]],
        ))]);

        let entries = list_objects(&executor, "pg.public");

        assert_eq!(executor.issued.borrow().as_slice(), ["SHOW TABLES IN `pg.public`"]);
        assert_eq!(entries[0]["NAME"], CellValue::from("orders"));
        assert_eq!(entries[0]["TABLE_SCHEMA"], CellValue::from("pg.public"));
        assert!(!entries[0].contains_key("TABLE_NAME"));
    }

    #[test]
    fn test_empty_show_tables_falls_back() {
        let executor = ScriptedExecutor::new(vec![
            Ok(Table::default()),
            Ok(table(
                &["NAME", "TYPE"],
                vec![vec!["HR.EMPLOYEES".into(), "TABLE".into()]],
            )),
        ]);

        let entries = list_objects(&executor, "oracle.HR");

        let issued = executor.issued.borrow();
        assert_eq!(issued.len(), 2);
        assert!(issued[1].contains("FROM `oracle`.SYS.ALL_OBJECTS"));
        assert!(issued[1].contains("AND OWNER = 'HR'"));
        assert_eq!(entries[0]["NAME"], CellValue::from("HR.EMPLOYEES"));
    }

    #[test]
    fn test_failed_show_tables_falls_back() {
        let executor = ScriptedExecutor::new(vec![failed(), failed()]);

        assert!(list_objects(&executor, "oracle").is_empty());

        let issued = executor.issued.borrow();
        assert_eq!(issued.len(), 2);
        assert!(issued[1].contains("AND OWNER IS NOT NULL"));
    }
}
