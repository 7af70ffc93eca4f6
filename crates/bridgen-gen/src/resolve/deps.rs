//! Module dependency graph and cycle detection.

use indexmap::{IndexMap, IndexSet};

use bridgen_core::types::ModuleIr;
use bridgen_core::Interner;

use crate::Error;

/// Compute the processing order (dependencies first) for a set of extracted
/// modules, from their ExternalRef edges.
///
/// References to modules outside the set are ignored here; the project pass
/// reports them per referring module. A reference cycle is fatal for the
/// whole build and is reported before any output is produced.
pub fn dependency_order(modules: &[ModuleIr], interner: &Interner) -> Result<Vec<usize>, Error> {
    let by_name: IndexMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(i, m)| (m.name.as_str(), i))
        .collect();

    let deps: Vec<Vec<usize>> = modules
        .iter()
        .map(|m| {
            m.external_modules(interner)
                .iter()
                .filter_map(|name| by_name.get(name).copied())
                .collect()
        })
        .collect();

    let sccs = SccFinder::find(&deps);

    // SCCs come out in reverse topological order (leaves first), which is
    // exactly the processing order. Any multi-member SCC is a cycle.
    let mut order = Vec::with_capacity(modules.len());
    for scc in sccs {
        if scc.len() > 1 {
            let mut names: Vec<String> =
                scc.iter().map(|&i| modules[i].name.clone()).collect();
            names.sort();
            return Err(Error::CyclicExternalRef(names));
        }
        order.extend(scc);
    }
    Ok(order)
}

struct SccFinder<'a> {
    deps: &'a [Vec<usize>],
    index: usize,
    stack: Vec<usize>,
    on_stack: IndexSet<usize>,
    indices: IndexMap<usize, usize>,
    lowlinks: IndexMap<usize, usize>,
    sccs: Vec<Vec<usize>>,
}

impl<'a> SccFinder<'a> {
    fn find(deps: &'a [Vec<usize>]) -> Vec<Vec<usize>> {
        let mut finder = Self {
            deps,
            index: 0,
            stack: Vec::new(),
            on_stack: IndexSet::new(),
            indices: IndexMap::new(),
            lowlinks: IndexMap::new(),
            sccs: Vec::new(),
        };

        for node in 0..deps.len() {
            if !finder.indices.contains_key(&node) {
                finder.strongconnect(node);
            }
        }

        finder.sccs
    }

    fn strongconnect(&mut self, node: usize) {
        self.indices.insert(node, self.index);
        self.lowlinks.insert(node, self.index);
        self.index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);

        for &dep in &self.deps[node] {
            if !self.indices.contains_key(&dep) {
                self.strongconnect(dep);
                let dep_lowlink = self.lowlinks[&dep];
                let my_lowlink = self.lowlinks.get_mut(&node).unwrap();
                *my_lowlink = (*my_lowlink).min(dep_lowlink);
            } else if self.on_stack.contains(&dep) {
                let dep_index = self.indices[&dep];
                let my_lowlink = self.lowlinks.get_mut(&node).unwrap();
                *my_lowlink = (*my_lowlink).min(dep_index);
            }
        }

        if self.lowlinks[&node] == self.indices[&node] {
            let mut scc = Vec::new();
            loop {
                let w = self.stack.pop().unwrap();
                self.on_stack.swap_remove(&w);
                let done = w == node;
                scc.push(w);
                if done {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }
}
