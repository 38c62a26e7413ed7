use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{self, Error};

/// A dependency graph keyed by `T`, sorted topologically by Kahn's
/// algorithm. Shared by the Variable graph (edges follow `$(VAR)`
/// references) and the Target graph (edges follow prerequisites),
/// rather than two bespoke sorts.
///
/// Nodes are added implicitly by `depends_on`; an isolated node needs
/// an explicit `add_node` call.
#[derive(Debug, Default)]
pub struct Dag<T: Ord + Clone> {
    nodes: BTreeSet<T>,
    /// edge `a -> b` means "a depends on b" (b must be emitted/appear first).
    edges: BTreeMap<T, BTreeSet<T>>,
}

impl<T: Ord + Clone> Dag<T> {
    pub fn new() -> Self {
        Dag {
            nodes: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn add_node(&mut self, node: T) {
        self.nodes.insert(node);
    }

    pub fn depends_on(&mut self, from: T, to: T) {
        self.nodes.insert(from.clone());
        self.nodes.insert(to.clone());
        self.edges.entry(from).or_default().insert(to);
    }

    /// Returns nodes such that dependencies precede dependents
    /// ("forward" order: if A depends on B, B comes first).
    pub fn topo_sort_forward(&self) -> Result<Vec<T>, Error> {
        // in_degree[n] = number of nodes n depends on that have not yet been emitted.
        let mut in_degree: BTreeMap<T, usize> =
            self.nodes.iter().map(|n| (n.clone(), 0)).collect();
        // reverse adjacency: for each "to", list "from"s that depend on it.
        let mut dependents: BTreeMap<T, BTreeSet<T>> = BTreeMap::new();
        for (from, tos) in &self.edges {
            *in_degree.get_mut(from).unwrap() += tos.len();
            for to in tos {
                dependents.entry(to.clone()).or_default().insert(from.clone());
            }
        }

        let mut initial: Vec<T> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(n, _)| n.clone())
            .collect();
        initial.sort();
        let mut queue: VecDeque<T> = initial.into();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(node) = queue.pop_front() {
            order.push(node.clone());
            if let Some(deps) = dependents.get(&node) {
                let mut freed = Vec::new();
                for dependent in deps {
                    let deg = in_degree.get_mut(dependent).unwrap();
                    *deg -= 1;
                    if *deg == 0 {
                        freed.push(dependent.clone());
                    }
                }
                freed.sort();
                for node in freed {
                    queue.push_back(node);
                }
            }
        }

        if order.len() != self.nodes.len() {
            return error::CycleSnafu.fail();
        }
        Ok(order)
    }

    /// Reverse of `topo_sort_forward`: dependents precede dependencies.
    pub fn topo_sort_reverse(&self) -> Result<Vec<T>, Error> {
        let mut forward = self.topo_sort_forward()?;
        forward.reverse();
        Ok(forward)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn orders_dependencies_before_dependents() {
        let mut dag = Dag::new();
        dag.depends_on("app", "lib");
        dag.depends_on("lib", "util");

        let forward = dag.topo_sort_forward().unwrap();
        let pos = |n: &str| forward.iter().position(|x| *x == n).unwrap();
        assert!(pos("util") < pos("lib"));
        assert!(pos("lib") < pos("app"));
    }

    #[test]
    fn detects_cycles() {
        let mut dag = Dag::new();
        dag.depends_on("a", "b");
        dag.depends_on("b", "a");

        assert!(matches!(dag.topo_sort_forward(), Err(Error::Cycle)));
    }

    #[test]
    fn ties_break_by_name() {
        let mut dag: Dag<&str> = Dag::new();
        dag.add_node("b");
        dag.add_node("a");
        dag.add_node("c");

        assert_eq!(dag.topo_sort_forward().unwrap(), vec!["a", "b", "c"]);
    }
}
