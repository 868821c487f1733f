//! Snapshot persistence against the real filesystem.

use std::fs;

use netdash_core::{
    load_snapshot, read_graph, save_snapshot, CentralityTable, CoreError, GraphEdge, GraphNode,
    NetworkGraph,
};
use serde_json::json;
use tempfile::TempDir;

fn laid_out_graph() -> NetworkGraph {
    NetworkGraph::new(
        vec![
            GraphNode::new(0, "Nurse")
                .with_position(0.0, 1.0)
                .with_attribute("total_pop", json!(250.5)),
            GraphNode::new(1, "Welder")
                .with_position(2.0, -1.0)
                .with_attribute("total_pop", json!(12.0)),
        ],
        vec![GraphEdge::new(0, 1, 0.42)],
    )
}

#[test]
fn test_save_then_load_snapshot() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/labour.json");

    save_snapshot(&laid_out_graph(), &path).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    assert_eq!(loaded, laid_out_graph());
}

#[test]
fn test_missing_snapshot_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = load_snapshot(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CoreError::Io { .. }));
}

#[test]
fn test_corrupt_snapshot_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ \"nodes\": [").unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, CoreError::Parse { .. }));
}

#[test]
fn test_unplaced_graph_reads_but_does_not_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("raw.json");
    let mut graph = laid_out_graph();
    graph.nodes[1].x = None;
    graph.nodes[1].y = None;
    save_snapshot(&graph, &path).unwrap();

    assert!(read_graph(&path).is_ok());
    assert!(matches!(
        load_snapshot(&path),
        Err(CoreError::MissingPosition { .. })
    ));
}

#[test]
fn test_load_centrality_table_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("top100results.csv");
    fs::write(&path, "Threshold,ID,Centraility\n0,a,1.0\n0,b,0.5\n69,a,0.2\n").unwrap();

    let table = CentralityTable::load(&path).unwrap();
    assert_eq!(table.thresholds(), vec![0, 69]);
    assert_eq!(table.bucket(69).unwrap().len(), 1);
}
