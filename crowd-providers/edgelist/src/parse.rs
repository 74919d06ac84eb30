//! Line parser that interns vertex tokens and merges repeated edges.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::BufRead;
use std::sync::Arc;

use crowd_core::Direction;

use crate::errors::EdgeListError;

const COMMENT: char = '#';
const DEFAULT_WEIGHT: f64 = 1.0;

/// Edges gathered from one reader, with endpoints as dense ids.
#[derive(Debug, Default)]
pub(crate) struct ParsedEdges {
    pub(crate) labels: Vec<Arc<str>>,
    pub(crate) edges: Vec<(usize, usize, f64)>,
    pub(crate) weighted: bool,
}

#[derive(Debug)]
struct Interner {
    ids: HashMap<Arc<str>, usize>,
    labels: Vec<Arc<str>>,
}

impl Interner {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            labels: Vec::new(),
        }
    }

    fn intern(&mut self, token: &str) -> usize {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let label: Arc<str> = Arc::from(token);
        let id = self.labels.len();
        self.labels.push(Arc::clone(&label));
        self.ids.insert(label, id);
        id
    }
}

/// Reads every line of `reader`.
///
/// Undirected edges are keyed on their sorted endpoints so `a b` and `b a`
/// merge into one edge.
pub(crate) fn parse_edges<R: BufRead>(
    reader: R,
    direction: Direction,
) -> Result<ParsedEdges, EdgeListError> {
    let mut interner = Interner::new();
    let mut edges: Vec<(usize, usize, f64)> = Vec::new();
    let mut positions: HashMap<(usize, usize), usize> = HashMap::new();
    let mut weighted = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let content = line
            .split_once(COMMENT)
            .map_or(line.as_str(), |(before, _)| before);
        let mut tokens = content.split_whitespace();
        let Some(source) = tokens.next() else {
            continue;
        };
        let target = tokens
            .next()
            .ok_or_else(|| EdgeListError::parse(number, "missing target vertex"))?;
        let weight = match tokens.next() {
            Some(raw) => {
                weighted = true;
                parse_weight(number, raw)?
            }
            None => DEFAULT_WEIGHT,
        };
        if let Some(extra) = tokens.next() {
            return Err(EdgeListError::parse(
                number,
                format!("unexpected token `{extra}`"),
            ));
        }

        let source = interner.intern(source);
        let target = interner.intern(target);
        if source == target {
            continue;
        }
        let key = match direction {
            Direction::Directed => (source, target),
            Direction::Undirected => (source.min(target), source.max(target)),
        };
        match positions.entry(key) {
            Entry::Occupied(slot) => {
                weighted = true;
                edges[*slot.get()].2 += weight;
            }
            Entry::Vacant(slot) => {
                slot.insert(edges.len());
                edges.push((source, target, weight));
            }
        }
    }

    Ok(ParsedEdges {
        labels: interner.labels,
        edges,
        weighted,
    })
}

fn parse_weight(line: usize, raw: &str) -> Result<f64, EdgeListError> {
    let weight: f64 = raw
        .parse()
        .map_err(|_| EdgeListError::parse(line, format!("weight `{raw}` is not a number")))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(EdgeListError::parse(
            line,
            format!("weight `{raw}` must be finite and non-negative"),
        ));
    }
    Ok(weight)
}
