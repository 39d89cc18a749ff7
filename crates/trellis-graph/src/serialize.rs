//! Mapping raw wire entities into canonical records.
//!
//! Serialization is total for well-formed driver output; the only failure
//! mode is input with required fields missing, reported as
//! [`GraphError::MalformedEntity`] naming the field. Properties pass
//! through verbatim — the driver already supplies typed values.

use trellis_core::{NodeRecord, RelationRecord};

use crate::client::GraphError;
use crate::executor::{RawNode, RawRelation};

/// Build a [`NodeRecord`] from a raw node.
///
/// A node with zero labels is well-formed; only a missing id is malformed.
pub fn node_record(raw: RawNode) -> Result<NodeRecord, GraphError> {
    let id = raw.id.ok_or(GraphError::MalformedEntity("id"))?;
    Ok(NodeRecord {
        id,
        labels: raw.labels,
        properties: raw.properties,
    })
}

/// Build a [`RelationRecord`] from a raw relationship.
pub fn relation_record(raw: RawRelation) -> Result<RelationRecord, GraphError> {
    let id = raw.id.ok_or(GraphError::MalformedEntity("id"))?;
    let rel_type = raw.rel_type.ok_or(GraphError::MalformedEntity("type"))?;
    let head_id = raw.head_id.ok_or(GraphError::MalformedEntity("head_id"))?;
    let tail_id = raw.tail_id.ok_or(GraphError::MalformedEntity("tail_id"))?;
    Ok(RelationRecord {
        id,
        rel_type,
        head_id,
        tail_id,
        properties: raw.properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::Value;

    #[test]
    fn test_node_record_passes_properties_verbatim() {
        let mut raw = RawNode {
            id: Some(42),
            labels: vec!["Person".to_string()],
            ..Default::default()
        };
        raw.properties
            .insert("name".to_string(), Value::from("Alice"));

        let record = node_record(raw).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.labels, vec!["Person"]);
        assert_eq!(record.properties["name"], Value::from("Alice"));
    }

    #[test]
    fn test_node_without_labels_is_well_formed() {
        let record = node_record(RawNode {
            id: Some(1),
            ..Default::default()
        })
        .unwrap();
        assert!(record.labels.is_empty());
    }

    #[test]
    fn test_node_missing_id_is_malformed() {
        let err = node_record(RawNode::default()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedEntity("id")));
    }

    #[test]
    fn test_relation_record() {
        let raw = RawRelation {
            id: Some(9),
            rel_type: Some("KNOWS".to_string()),
            head_id: Some(1),
            tail_id: Some(2),
            ..Default::default()
        };
        let record = relation_record(raw).unwrap();
        assert_eq!(record.rel_type, "KNOWS");
        assert_eq!((record.head_id, record.tail_id), (1, 2));
    }

    #[test]
    fn test_relation_missing_endpoint_names_the_field() {
        let raw = RawRelation {
            id: Some(9),
            rel_type: Some("KNOWS".to_string()),
            head_id: Some(1),
            ..Default::default()
        };
        let err = relation_record(raw).unwrap_err();
        assert!(matches!(err, GraphError::MalformedEntity("tail_id")));
    }
}
