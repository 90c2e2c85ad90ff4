//! The hospital configuration document and its dotted-path resolver.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{error, warn};

use warddata_core::{DbmsFamily, PaginationStyle, ParamMarker, Row, RowExt, SqlValue, WardError};

use crate::ConfigError;
use crate::template::QueryTemplate;

/// Default alias of the episode table in configured templates.
const DEFAULT_EPISODE_ALIAS: &str = "i";
/// Default alias of the patient (demographics) table in configured templates.
const DEFAULT_PATIENT_ALIAS: &str = "d";

/// Why a dotted path could not be followed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LookupFailure {
    /// A segment does not exist in its parent.
    Missing { segment: String },
    /// A segment's parent is a scalar, or an array indexed by a non-number.
    NotAContainer { segment: String },
}

/// Runtime configuration of the query layer.
#[derive(Debug, Clone)]
pub struct HospitalConfig {
    document: Value,
    family: DbmsFamily,
    marker: ParamMarker,
}

impl HospitalConfig {
    /// Builds the configuration from a parsed document.
    ///
    /// `dbms.family` selects the engine family (PostgreSQL when absent) and
    /// `dbms.param_marker` may override the family's marker style.
    pub fn new(document: Value) -> Result<Self, ConfigError> {
        if !document.is_object() {
            return Err(ConfigError::validation(
                "hospital configuration must be a table",
            ));
        }

        let family = match document.pointer("/dbms/family") {
            Some(Value::String(name)) => DbmsFamily::from(name.clone()),
            Some(other) => {
                return Err(ConfigError::validation(format!(
                    "dbms.family must be a string, got {other}"
                )));
            }
            None => {
                warn!("dbms.family not configured; assuming postgres");
                DbmsFamily::default()
            }
        };

        let marker = match document.pointer("/dbms/param_marker") {
            Some(Value::String(style)) => style.parse().map_err(ConfigError::validation)?,
            Some(other) => {
                return Err(ConfigError::validation(format!(
                    "dbms.param_marker must be a string, got {other}"
                )));
            }
            None => family.default_marker(),
        };

        Ok(Self {
            document,
            family,
            marker,
        })
    }

    /// Parses a TOML document, e.g. a standalone mapping file.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let document: Value = toml::from_str(source)
            .map_err(|e| ConfigError::parse(format!("TOML parse error: {e}")))?;
        Self::new(document)
    }

    /// The raw document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    #[must_use]
    pub fn family(&self) -> &DbmsFamily {
        &self.family
    }

    #[must_use]
    pub fn marker(&self) -> ParamMarker {
        self.marker
    }

    #[must_use]
    pub fn pagination_style(&self) -> Option<PaginationStyle> {
        self.family.pagination_style()
    }

    fn lookup(&self, key_path: &str) -> Result<&Value, LookupFailure> {
        let mut value = &self.document;
        for segment in key_path.split('.') {
            value = match value {
                Value::Object(map) => map.get(segment).ok_or_else(|| LookupFailure::Missing {
                    segment: segment.to_string(),
                })?,
                Value::Array(items) => {
                    let index: usize =
                        segment
                            .parse()
                            .map_err(|_| LookupFailure::NotAContainer {
                                segment: segment.to_string(),
                            })?;
                    items.get(index).ok_or_else(|| LookupFailure::Missing {
                        segment: segment.to_string(),
                    })?
                }
                _ => {
                    return Err(LookupFailure::NotAContainer {
                        segment: segment.to_string(),
                    });
                }
            };
        }
        Ok(value)
    }

    /// Resolves a dot-separated path, e.g. `columns.episode_pk`.
    ///
    /// A missing segment logs a warning and a path through a scalar logs an
    /// error; both yield `None` and never fail the caller.
    pub fn resolve(&self, key_path: &str) -> Option<&Value> {
        match self.lookup(key_path) {
            Ok(value) => Some(value),
            Err(LookupFailure::Missing { segment }) => {
                warn!(key = %key_path, segment = %segment, "Config key not found; using default");
                None
            }
            Err(LookupFailure::NotAContainer { segment }) => {
                error!(key = %key_path, segment = %segment, "Config path traverses a non-table value; using default");
                None
            }
        }
    }

    /// Resolves and deserializes a value, falling back to `default`.
    pub fn get<T: DeserializeOwned>(&self, key_path: &str, default: T) -> T {
        let Some(value) = self.resolve(key_path) else {
            return default;
        };
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(key = %key_path, error = %e, "Config value has an unexpected shape; using default");
                default
            }
        }
    }

    /// Resolves a string value.
    pub fn get_str(&self, key_path: &str) -> Option<&str> {
        self.resolve(key_path).and_then(Value::as_str)
    }

    /// True when `queries.<key>` is present, without logging when it is not.
    #[must_use]
    pub fn has_query(&self, key: &str) -> bool {
        self.lookup(&format!("queries.{key}")).is_ok()
    }

    /// The template stored at `queries.<key>`.
    ///
    /// # Errors
    ///
    /// Returns `WardError::Configuration` when the template is absent, empty
    /// or malformed.
    pub fn query(&self, key: &str) -> Result<QueryTemplate, WardError> {
        let path = format!("queries.{key}");
        let value = self.resolve(&path).ok_or_else(|| {
            WardError::configuration(format!("Query not configured for key: {key}"))
        })?;

        let template: QueryTemplate = serde_json::from_value(value.clone()).map_err(|e| {
            WardError::configuration(format!("Query template '{key}' is malformed: {e}"))
        })?;

        if template.is_empty() {
            return Err(WardError::configuration(format!(
                "Query template is empty for key: {key}"
            )));
        }
        Ok(template)
    }

    /// View over the `columns` mapping.
    #[must_use]
    pub fn columns(&self) -> ColumnMap<'_> {
        ColumnMap {
            section: self.resolve("columns").and_then(Value::as_object),
        }
    }

    /// The sort-key table `sorting.<list>`: logical key to column name.
    #[must_use]
    pub fn sort_columns(&self, list: &str) -> Option<&Map<String, Value>> {
        self.resolve(&format!("sorting.{list}"))
            .and_then(Value::as_object)
    }

    /// A semantic constant from `parameters.<name>` as a bind value.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<SqlValue> {
        self.resolve(&format!("parameters.{name}"))
            .map(SqlValue::from_json)
            .filter(|v| !v.is_null())
    }

    /// Alias of the episode table used in the configured templates.
    #[must_use]
    pub fn episode_alias(&self) -> &str {
        self.alias("episode", DEFAULT_EPISODE_ALIAS)
    }

    /// Alias of the patient table used in the configured templates.
    #[must_use]
    pub fn patient_alias(&self) -> &str {
        self.alias("patient", DEFAULT_PATIENT_ALIAS)
    }

    fn alias<'a>(&'a self, entity: &str, default: &'a str) -> &'a str {
        self.lookup(&format!("aliases.{entity}"))
            .ok()
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Checks that every column and sort entry is a plain SQL identifier.
    ///
    /// These names are spliced into statements, so anything else is rejected
    /// before a statement is ever built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(columns) = self.lookup("columns").ok().and_then(Value::as_object) {
            for (field, name) in columns {
                check_identifier(&format!("columns.{field}"), name)?;
            }
        }

        if let Some(lists) = self.lookup("sorting").ok().and_then(Value::as_object) {
            for (list, keys) in lists {
                let Some(keys) = keys.as_object() else {
                    return Err(ConfigError::validation(format!(
                        "sorting.{list} must be a table"
                    )));
                };
                for (key, name) in keys {
                    check_identifier(&format!("sorting.{list}.{key}"), name)?;
                }
            }
        }

        for alias in [self.episode_alias(), self.patient_alias()] {
            if !is_identifier(alias) || alias.contains('.') {
                return Err(ConfigError::validation(format!(
                    "table alias '{alias}' is not a plain identifier"
                )));
            }
        }
        Ok(())
    }
}

fn check_identifier(path: &str, value: &Value) -> Result<(), ConfigError> {
    match value.as_str() {
        Some(name) if is_identifier(name) => Ok(()),
        _ => Err(ConfigError::validation(format!(
            "{path} must be a column identifier, got {value}"
        ))),
    }
}

/// Letters, digits and underscores, optionally qualified once (`t.col`).
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut parts = name.split('.');
    let valid = |part: &str| {
        !part.is_empty()
            && !part.starts_with(|c: char| c.is_ascii_digit())
            && part.chars().all(|c| c.is_alphanumeric() || c == '_')
    };
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => valid(name),
        (Some(table), Some(column), None) => valid(table) && valid(column),
        _ => false,
    }
}

/// Logical-field to vendor-column mapping.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap<'a> {
    section: Option<&'a Map<String, Value>>,
}

impl<'a> ColumnMap<'a> {
    /// Vendor column name of a logical field.
    #[must_use]
    pub fn name(&self, field: &str) -> Option<&'a str> {
        self.section?.get(field)?.as_str()
    }

    /// Vendor column name of a logical field the caller cannot do without.
    ///
    /// # Errors
    ///
    /// Returns `WardError::Configuration` when the mapping is absent.
    pub fn require(&self, field: &str) -> Result<&'a str, WardError> {
        self.name(field).ok_or_else(|| {
            WardError::configuration(format!("Column mapping not configured: columns.{field}"))
        })
    }

    /// Non-null cell of `row` holding the logical field.
    #[must_use]
    pub fn cell<'r>(&self, row: &'r Row, field: &str) -> Option<&'r SqlValue> {
        row.value(self.name(field)?)
    }
}
