//! Avro-style JSON form of [`SchemaNode`].
//!
//! Supported: primitive names, `record`/`error`, `array`, `map`, unions as
//! JSON arrays and references to records defined earlier in the same
//! document. A full name may be defined only once per document. `enum` and
//! `fixed` are rejected as unknown types.

use std::collections::{HashMap, HashSet, hash_map::Entry};

use serde_json::{Map as JsonMap, Value as Json, json};

use super::{Field, PrimitiveKind, RecordSchema, SchemaNode};
use crate::error::SchemaError;

impl SchemaNode {
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let json: Json = serde_json::from_str(text)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &Json) -> Result<Self, SchemaError> {
        JsonSchemaParser::default().parse(json, None)
    }

    /// Render as Avro-style JSON. A named record is written out in full at
    /// its first use and referenced by full name afterwards.
    pub fn to_json(&self) -> Json {
        JsonSchemaWriter::default().write(self)
    }
}

#[derive(Default)]
struct JsonSchemaWriter {
    written: HashSet<String>,
}

impl JsonSchemaWriter {
    fn write(&mut self, node: &SchemaNode) -> Json {
        match node {
            SchemaNode::Primitive(kind) => Json::String(kind.type_name().to_string()),
            SchemaNode::Record(record) => {
                let full_name = record.full_name();
                if !self.written.insert(full_name.clone()) {
                    return Json::String(full_name);
                }
                let mut obj = JsonMap::new();
                obj.insert("type".into(), json!(node.type_name()));
                obj.insert("name".into(), json!(record.name()));
                if let Some(ns) = record.namespace() {
                    obj.insert("namespace".into(), json!(ns));
                }
                if let Some(doc) = record.doc() {
                    obj.insert("doc".into(), json!(doc));
                }
                let fields = record.fields().iter().map(|f| self.write_field(f)).collect();
                obj.insert("fields".into(), Json::Array(fields));
                Json::Object(obj)
            }
            SchemaNode::Array(element) => json!({ "type": "array", "items": self.write(element) }),
            SchemaNode::Map(value) => json!({ "type": "map", "values": self.write(value) }),
            SchemaNode::Union(branches) => {
                Json::Array(branches.iter().map(|branch| self.write(branch)).collect())
            }
        }
    }

    fn write_field(&mut self, field: &Field) -> Json {
        let mut obj = JsonMap::new();
        obj.insert("name".into(), json!(field.name()));
        obj.insert("type".into(), self.write(field.schema()));
        if let Some(doc) = field.doc() {
            obj.insert("doc".into(), json!(doc));
        }
        if let Some(default) = field.default_value() {
            obj.insert("default".into(), default.clone());
        }
        Json::Object(obj)
    }
}

/// Keeps the records defined so far so later types can refer to them by name.
#[derive(Default)]
struct JsonSchemaParser {
    named: HashMap<String, SchemaNode>,
}

impl JsonSchemaParser {
    fn parse(&mut self, json: &Json, namespace: Option<&str>) -> Result<SchemaNode, SchemaError> {
        match json {
            Json::String(name) => self.resolve_name(name, namespace),
            Json::Array(branches) => branches
                .iter()
                .map(|branch| self.parse(branch, namespace))
                .collect::<Result<Vec<_>, _>>()
                .map(SchemaNode::Union),
            Json::Object(obj) => self.parse_object(obj, namespace),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }

    fn resolve_name(&self, name: &str, namespace: Option<&str>) -> Result<SchemaNode, SchemaError> {
        if let Some(kind) = PrimitiveKind::from_name(name) {
            return Ok(kind.into());
        }
        let qualified = match namespace {
            Some(ns) if !ns.is_empty() && !name.contains('.') => format!("{ns}.{name}"),
            _ => name.to_string(),
        };
        self.named
            .get(&qualified)
            .or_else(|| self.named.get(name))
            .cloned()
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    fn parse_object(
        &mut self,
        obj: &JsonMap<String, Json>,
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        let ty = obj.get("type").ok_or_else(|| SchemaError::MissingAttribute {
            attribute: "type",
            context: Json::Object(obj.clone()).to_string(),
        })?;

        let Json::String(ty) = ty else {
            return self.parse(ty, namespace);
        };
        match ty.as_str() {
            "record" => self.parse_record(obj, false, namespace),
            "error" => self.parse_record(obj, true, namespace),
            "array" => {
                let items = obj.get("items").ok_or(SchemaError::MissingAttribute {
                    attribute: "items",
                    context: "array".to_string(),
                })?;
                Ok(SchemaNode::array(self.parse(items, namespace)?))
            }
            "map" => {
                let values = obj.get("values").ok_or(SchemaError::MissingAttribute {
                    attribute: "values",
                    context: "map".to_string(),
                })?;
                Ok(SchemaNode::map(self.parse(values, namespace)?))
            }
            other => self.resolve_name(other, namespace),
        }
    }

    fn parse_record(
        &mut self,
        obj: &JsonMap<String, Json>,
        is_error: bool,
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        let full_name = obj
            .get("name")
            .and_then(Json::as_str)
            .ok_or(SchemaError::MissingAttribute {
                attribute: "name",
                context: "record".to_string(),
            })?;
        let (own_namespace, name) = match full_name.rsplit_once('.') {
            Some((ns, name)) => (Some(ns.to_string()), name),
            None => (
                obj.get("namespace")
                    .and_then(Json::as_str)
                    .or(namespace)
                    .map(str::to_string),
                full_name,
            ),
        };

        let fields_json = obj
            .get("fields")
            .and_then(Json::as_array)
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "fields",
                context: format!("record '{full_name}'"),
            })?;

        let mut fields = Vec::with_capacity(fields_json.len());
        for field_json in fields_json {
            let field_name = field_json
                .get("name")
                .and_then(Json::as_str)
                .ok_or_else(|| SchemaError::MissingAttribute {
                    attribute: "name",
                    context: format!("field of record '{full_name}'"),
                })?;
            let field_type = field_json
                .get("type")
                .ok_or_else(|| SchemaError::MissingAttribute {
                    attribute: "type",
                    context: format!("field '{field_name}' of record '{full_name}'"),
                })?;

            let field_schema = self.parse(field_type, own_namespace.as_deref())?;
            let mut field = Field::new(field_name, field_schema);
            if let Some(doc) = field_json.get("doc").and_then(Json::as_str) {
                field = field.with_doc(doc);
            }
            if let Some(default) = field_json.get("default") {
                field = field.with_default(default.clone());
            }
            fields.push(field);
        }

        let mut record = RecordSchema::new(name, fields)?.with_error_flag(is_error);
        if let Some(ns) = own_namespace {
            record = record.with_namespace(ns);
        }
        if let Some(doc) = obj.get("doc").and_then(Json::as_str) {
            record = record.with_doc(doc);
        }

        match self.named.entry(record.full_name()) {
            Entry::Occupied(entry) => Err(SchemaError::DuplicateName(entry.key().clone())),
            Entry::Vacant(entry) => {
                let node = SchemaNode::Record(record);
                entry.insert(node.clone());
                Ok(node)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_record_name_sets_namespace() {
        let schema = SchemaNode::from_json_str(
            r#"{"type": "record", "name": "com.example.Point", "fields": []}"#,
        )
        .unwrap();
        let record = schema.as_record().unwrap();
        assert_eq!(record.name(), "Point");
        assert_eq!(record.namespace(), Some("com.example"));
    }

    #[test]
    fn nested_record_inherits_namespace_for_references() {
        let schema = SchemaNode::from_json_str(
            r#"{
                "type": "record", "name": "Outer", "namespace": "ns",
                "fields": [
                    {"name": "a", "type": {"type": "record", "name": "Inner", "fields": [
                        {"name": "x", "type": "int"}
                    ]}},
                    {"name": "b", "type": "Inner"}
                ]
            }"#,
        )
        .unwrap();
        let record = schema.as_record().unwrap();
        assert_eq!(record.fields()[0].schema(), record.fields()[1].schema());
    }

    #[test]
    fn unknown_reference_is_rejected() {
        let err = SchemaNode::from_json_str(r#""Missing""#).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType(name) if name == "Missing"));
    }
}
