use std::collections::{hash_map::Keys, HashMap, HashSet};

use crate::commands::Id;

use super::{edge::Edge, node::Node};

pub type NodeMap<NodeData> = HashMap<Id, Node<NodeData>>;
pub type EdgeMap<EdgeData> = HashMap<Id, Edge<EdgeData>>;

#[derive(Clone, Copy)]
pub enum Direction {
    Outgoing,
    Incoming,
}

pub struct Graph<NodeData, EdgeData> {
    nodes: NodeMap<NodeData>,
    edges: EdgeMap<EdgeData>,
    search_stack: Vec<Id>,
    visited: HashSet<Id>,
}

impl<NodeData, EdgeData> Graph<NodeData, EdgeData> {
    pub fn with_capacity(number_of_nodes: usize, number_of_edges: usize) -> Self {
        Self {
            nodes: NodeMap::with_capacity(number_of_nodes),
            edges: EdgeMap::with_capacity(number_of_edges),
            search_stack: Vec::with_capacity(number_of_nodes),
            visited: HashSet::with_capacity(number_of_nodes),
        }
    }

    fn get_last_connected_edge_id(&self, node_id: Id, direction: Direction) -> Option<Id> {
        EdgeIterator::new(node_id, None, direction, &self.nodes, &self.edges).last()
    }

    /// Add an edge between two nodes
    ///
    /// Returns `None` if either node is missing or the nodes are already
    /// connected.
    pub fn add_edge(
        &mut self,
        from_node_id: Id,
        to_node_id: Id,
        with_edge_data: EdgeData,
    ) -> Option<Id> {
        if !self.nodes.contains_key(&from_node_id) || !self.nodes.contains_key(&to_node_id) {
            return None;
        }

        if self.find_edge_between_nodes(from_node_id, to_node_id).is_some() {
            return None;
        }

        let edge_id = Id::generate();

        match self.get_last_connected_edge_id(from_node_id, Direction::Outgoing) {
            Some(last_edge_id) => {
                if let Some(edge) = self.edges.get_mut(&last_edge_id) {
                    edge.next_out = Some(edge_id);
                }
            }
            None => {
                if let Some(node) = self.nodes.get_mut(&from_node_id) {
                    node.outgoing = Some(edge_id);
                }
            }
        }

        match self.get_last_connected_edge_id(to_node_id, Direction::Incoming) {
            Some(last_edge_id) => {
                if let Some(edge) = self.edges.get_mut(&last_edge_id) {
                    edge.next_in = Some(edge_id);
                }
            }
            None => {
                if let Some(node) = self.nodes.get_mut(&to_node_id) {
                    node.incoming = Some(edge_id);
                }
            }
        }

        self.edges
            .insert(edge_id, Edge::new(from_node_id, to_node_id, with_edge_data));

        Some(edge_id)
    }

    fn find_edge_between_nodes(&self, from_node_id: Id, to_node_id: Id) -> Option<Id> {
        EdgeIterator::new(
            from_node_id,
            None,
            Direction::Outgoing,
            &self.nodes,
            &self.edges,
        )
        .find(|edge_id| {
            self.edges
                .get(edge_id)
                .is_some_and(|edge| edge.to_node_id == to_node_id)
        })
    }

    fn remove_edge_with_id(&mut self, id: Id) -> Option<EdgeData> {
        let edge = self.edges.remove(&id)?;

        replace_connections(self, Direction::Outgoing, id, edge.next_out);
        replace_connections(self, Direction::Incoming, id, edge.next_in);

        Some(edge.edge_data)
    }

    pub fn remove_edge(&mut self, from_node_id: Id, to_node_id: Id) -> Option<EdgeData> {
        let id = self.find_edge_between_nodes(from_node_id, to_node_id)?;
        self.remove_edge_with_id(id)
    }

    /// Remove every edge to or from a node
    pub fn remove_node_edges(&mut self, node_id: Id) {
        while let Some(edge_id) = self.first_edge_of_node(node_id) {
            self.remove_edge_with_id(edge_id);
        }
    }

    fn first_edge_of_node(&self, node_id: Id) -> Option<Id> {
        let node = self.nodes.get(&node_id)?;
        node.outgoing.or(node.incoming)
    }

    /// Remove a node and its edges
    pub fn remove_node(&mut self, id: Id) -> Option<NodeData> {
        self.remove_node_edges(id);

        self.nodes.remove(&id).map(|node| {
            debug_assert!(node.incoming.is_none());
            debug_assert!(node.outgoing.is_none());
            node.node_data
        })
    }

    pub fn get_node(&self, id: Id) -> Option<&NodeData> {
        self.nodes.get(&id).map(|node| &node.node_data)
    }

    pub fn get_node_mut(&mut self, id: Id) -> Option<&mut NodeData> {
        self.nodes.get_mut(&id).map(|node| &mut node.node_data)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn add_node_with_id(&mut self, id: Id, node_data: NodeData) {
        assert!(!self.nodes.contains_key(&id));
        self.nodes.insert(id, Node::new(node_data));
    }

    #[cfg(test)]
    pub fn is_connected_to(&self, from_node_id: Id, to_node_id: Id) -> bool {
        self.node_iter(from_node_id, Direction::Outgoing)
            .any(|id| id == to_node_id)
    }

    /// Whether there is a path of one or more edges between two nodes
    pub fn is_reachable(&mut self, from_node_id: Id, to_node_id: Id) -> bool {
        self.search_stack.clear();
        self.visited.clear();

        self.search_stack.push(from_node_id);

        while let Some(node_id) = self.search_stack.pop() {
            if !self.visited.insert(node_id) {
                continue;
            }

            for next_node_id in
                NodeIterator::new(node_id, Direction::Outgoing, &self.nodes, &self.edges)
            {
                if next_node_id == to_node_id {
                    return true;
                }

                self.search_stack.push(next_node_id);
            }
        }

        false
    }

    pub fn node_iter(
        &self,
        node_id: Id,
        direction: Direction,
    ) -> NodeIterator<'_, NodeData, EdgeData> {
        NodeIterator::new(node_id, direction, &self.nodes, &self.edges)
    }

    #[cfg(test)]
    pub fn edge_iterator(
        &self,
        node_id: Id,
        direction: Direction,
    ) -> EdgeIterator<'_, NodeData, EdgeData> {
        EdgeIterator::new(node_id, None, direction, &self.nodes, &self.edges)
    }

    pub fn connection_count(&self, node_id: Id, direction: Direction) -> usize {
        self.node_iter(node_id, direction).count()
    }

    pub fn all_node_ids(&self) -> Keys<'_, Id, Node<NodeData>> {
        self.nodes.keys()
    }

    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn replace_edge_connections<N, E>(
    graph: &mut Graph<N, E>,
    direction: Direction,
    find_edge_id: Id,
    replace_edge_id: Option<Id>,
) {
    for edge in graph.edges.values_mut() {
        let next = match direction {
            Direction::Outgoing => &mut edge.next_out,
            Direction::Incoming => &mut edge.next_in,
        };

        if *next == Some(find_edge_id) {
            *next = replace_edge_id;
        }
    }
}

fn replace_node_connections<N, E>(
    graph: &mut Graph<N, E>,
    direction: Direction,
    find_edge_id: Id,
    replace_edge_id: Option<Id>,
) {
    for node in graph.nodes.values_mut() {
        let first = match direction {
            Direction::Outgoing => &mut node.outgoing,
            Direction::Incoming => &mut node.incoming,
        };

        if *first == Some(find_edge_id) {
            *first = replace_edge_id;
        }
    }
}

fn replace_connections<N, E>(
    graph: &mut Graph<N, E>,
    direction: Direction,
    find_edge_id: Id,
    replace_edge_id: Option<Id>,
) {
    replace_edge_connections(graph, direction, find_edge_id, replace_edge_id);
    replace_node_connections(graph, direction, find_edge_id, replace_edge_id);
}

pub struct EdgeIterator<'a, NodeData, EdgeData> {
    node_id: Id,
    edge_id: Option<Id>,
    nodes: &'a NodeMap<NodeData>,
    edges: &'a EdgeMap<EdgeData>,
    direction: Direction,
}

impl<NodeData, EdgeData> Iterator for EdgeIterator<'_, NodeData, EdgeData> {
    type Item = Id;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(&self.node_id)?;

        let next_edge_id = match self.edge_id {
            Some(edge_id) => {
                let edge = self.edges.get(&edge_id)?;

                match self.direction {
                    Direction::Outgoing => edge.next_out,
                    Direction::Incoming => edge.next_in,
                }
            }
            None => match self.direction {
                Direction::Outgoing => node.outgoing,
                Direction::Incoming => node.incoming,
            },
        };

        self.edge_id = next_edge_id;

        self.edge_id
    }
}

impl<'a, NodeData, EdgeData> EdgeIterator<'a, NodeData, EdgeData> {
    pub fn new(
        node_id: Id,
        edge_id: Option<Id>,
        direction: Direction,
        nodes: &'a NodeMap<NodeData>,
        edges: &'a EdgeMap<EdgeData>,
    ) -> Self {
        Self {
            node_id,
            edge_id,
            nodes,
            edges,
            direction,
        }
    }
}

pub struct NodeIterator<'a, NodeData, EdgeData> {
    node_id: Id,
    edge_id: Option<Id>,
    nodes: &'a NodeMap<NodeData>,
    edges: &'a EdgeMap<EdgeData>,
    direction: Direction,
}

impl<'a, NodeData, EdgeData> NodeIterator<'a, NodeData, EdgeData> {
    pub fn new(
        node_id: Id,
        direction: Direction,
        nodes: &'a NodeMap<NodeData>,
        edges: &'a EdgeMap<EdgeData>,
    ) -> Self {
        Self {
            node_id,
            edge_id: None,
            nodes,
            edges,
            direction,
        }
    }
}

impl<NodeData, EdgeData> Iterator for NodeIterator<'_, NodeData, EdgeData> {
    type Item = Id;

    fn next(&mut self) -> Option<Self::Item> {
        let next_edge_id = EdgeIterator::new(
            self.node_id,
            self.edge_id,
            self.direction,
            self.nodes,
            self.edges,
        )
        .next()?;

        self.edge_id = Some(next_edge_id);

        self.edges
            .get(&next_edge_id)
            .map(|edge| match self.direction {
                Direction::Outgoing => edge.to_node_id,
                Direction::Incoming => edge.from_node_id,
            })
    }
}
