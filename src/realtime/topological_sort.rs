use std::collections::HashMap;

use crate::commands::Id;

use super::graph::{Direction, Graph};

/// Orders nodes so every node comes after the nodes that feed it
///
/// Storage is reused between sorts. Nodes on a cycle, and anything downstream
/// of one, are left out of the order.
pub struct TopologicalSort {
    dependency_count: HashMap<Id, usize>,
    ready_to_process: Vec<Id>,
    order: Vec<Id>,
}

impl TopologicalSort {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dependency_count: HashMap::with_capacity(capacity),
            ready_to_process: Vec::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn sort<NodeData, EdgeData>(&mut self, graph: &Graph<NodeData, EdgeData>) {
        self.dependency_count.clear();
        self.ready_to_process.clear();
        self.order.clear();

        for node_id in graph.all_node_ids() {
            let count = graph.connection_count(*node_id, Direction::Incoming);

            if count == 0 {
                self.ready_to_process.push(*node_id);
            } else {
                self.dependency_count.insert(*node_id, count);
            }
        }

        while let Some(node_id) = self.ready_to_process.pop() {
            self.order.push(node_id);

            for next_node_id in graph.node_iter(node_id, Direction::Outgoing) {
                if let Some(count) = self.dependency_count.get_mut(&next_node_id) {
                    *count -= 1;

                    if *count == 0 {
                        self.dependency_count.remove(&next_node_id);
                        self.ready_to_process.push(next_node_id);
                    }
                }
            }
        }
    }

    pub fn get_sorted_graph(&self) -> &[Id] {
        &self.order
    }
}
