use std::collections::{BTreeSet, HashMap};

use crate::topology::complex::FilteredSimplex;

#[derive(Debug, Clone, Copy)]
pub struct PersistenceInterval {
    pub dimension: usize,
    pub birth: f64,
    pub death: f64,
}

impl PersistenceInterval {
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    pub fn lifetime(&self) -> f64 {
        if self.is_essential() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersistenceDiagram {
    pub intervals: Vec<PersistenceInterval>,
}

impl PersistenceDiagram {
    pub fn in_dimension(&self, dimension: usize) -> Vec<&PersistenceInterval> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == dimension)
            .collect()
    }

    pub fn finite_count(&self, dimension: usize) -> usize {
        self.intervals
            .iter()
            .filter(|i| i.dimension == dimension && !i.is_essential())
            .count()
    }

    pub fn essential_count(&self, dimension: usize) -> usize {
        self.intervals
            .iter()
            .filter(|i| i.dimension == dimension && i.is_essential())
            .count()
    }

    // Maximum finite lifetime in a dimension, 0 when no finite interval
    // exists there.
    pub fn max_finite_lifetime(&self, dimension: usize) -> f64 {
        self.intervals
            .iter()
            .filter(|i| i.dimension == dimension && !i.is_essential())
            .map(|i| i.lifetime())
            .fold(0.0, f64::max)
    }
}

// One column of the boundary matrix over Z/2; addition is symmetric
// difference and the pivot is the largest row index.
#[derive(Debug, Clone)]
struct BoundaryColumn {
    rows: BTreeSet<usize>,
}

impl BoundaryColumn {
    fn new() -> Self {
        Self {
            rows: BTreeSet::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    fn pivot(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    fn add_assign(&mut self, other: &BoundaryColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

// Standard persistence reduction over the filtration order. `filtration`
// must already be sorted as produced by `rips_filtration`. Finite intervals
// shorter than `min_persistence` are dropped; essential intervals (features
// alive at the filtration cap) are always kept.
pub fn compute_persistence(
    filtration: &[FilteredSimplex],
    min_persistence: f64,
) -> PersistenceDiagram {
    let m = filtration.len();

    let mut index_of: HashMap<&[usize], usize> = HashMap::with_capacity(m);
    for (idx, simplex) in filtration.iter().enumerate() {
        index_of.insert(simplex.vertices.as_slice(), idx);
    }

    let mut columns: Vec<BoundaryColumn> = Vec::with_capacity(m);
    let mut pivot_owner: HashMap<usize, usize> = HashMap::new();

    for simplex in filtration {
        let mut column = BoundaryColumn::new();
        if simplex.dimension() > 0 {
            let mut face = Vec::with_capacity(simplex.vertices.len() - 1);
            for omit in 0..simplex.vertices.len() {
                face.clear();
                face.extend(
                    simplex
                        .vertices
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != omit)
                        .map(|(_, &v)| v),
                );
                if let Some(&face_idx) = index_of.get(face.as_slice()) {
                    column.toggle(face_idx);
                }
            }
        }

        while let Some(pivot) = column.pivot() {
            match pivot_owner.get(&pivot) {
                Some(&owner) => column.add_assign(&columns[owner]),
                None => break,
            }
        }

        if let Some(pivot) = column.pivot() {
            pivot_owner.insert(pivot, columns.len());
        }
        columns.push(column);
    }

    let mut intervals = Vec::new();
    let mut paired = vec![false; m];

    for (death_idx, column) in columns.iter().enumerate() {
        if let Some(birth_idx) = column.pivot() {
            paired[birth_idx] = true;
            paired[death_idx] = true;
            let birth = filtration[birth_idx].birth;
            let death = filtration[death_idx].birth;
            if death - birth >= min_persistence {
                intervals.push(PersistenceInterval {
                    dimension: filtration[birth_idx].dimension(),
                    birth,
                    death,
                });
            }
        }
    }

    for (idx, simplex) in filtration.iter().enumerate() {
        if !paired[idx] && columns[idx].is_zero() {
            intervals.push(PersistenceInterval {
                dimension: simplex.dimension(),
                birth: simplex.birth,
                death: f64::INFINITY,
            });
        }
    }

    PersistenceDiagram { intervals }
}

#[cfg(test)]
#[path = "../../tests/src_inline/topology/persistence.rs"]
mod tests;
