//! Lattice invariant test helpers.
//!
//! These functions verify the structural invariants every built lattice
//! must satisfy. Reused across the builder, lattice, and traversal test
//! modules.

use indexmap::IndexSet;
use latticework_core::CoordVector;

use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::relation::Relation;

/// Assert that `c.next(d) == x` implies `x.previous(d) == c`, and the
/// converse, for every reachable cell and axis.
pub fn assert_links_symmetric<S>(lattice: &Lattice<S>) {
    for id in lattice.iter() {
        let cell = lattice.cell(id).expect("reachable cell must exist");
        for (axis, links) in cell.links().iter().enumerate() {
            if let Relation::Present(x) = links.next {
                let back = lattice.cell(x).expect("linked cell must exist").previous(axis);
                assert_eq!(
                    back,
                    Ok(Relation::Present(id)),
                    "{id}.next({axis}) = {x} but {x}.previous({axis}) = {back:?}"
                );
            }
            if let Relation::Present(x) = links.previous {
                let back = lattice.cell(x).expect("linked cell must exist").next(axis);
                assert_eq!(
                    back,
                    Ok(Relation::Present(id)),
                    "{id}.previous({axis}) = {x} but {x}.next({axis}) = {back:?}"
                );
            }
        }
    }
}

/// Assert that every reachable cell's coordinate has one entry per axis
/// and all cells share the origin's dimension count.
pub fn assert_coords_match_dimensions<S>(lattice: &Lattice<S>) {
    let dims = lattice
        .cell(lattice.origin())
        .expect("origin must exist")
        .dimension_count();
    for id in lattice.iter() {
        let cell = lattice.cell(id).expect("reachable cell must exist");
        assert_eq!(cell.dimension_count(), dims, "{id} has a different dimension count");
        assert_eq!(cell.coord().len(), dims, "{id} coordinate length mismatch");
    }
}

/// Assert that no two reachable cells share a coordinate.
pub fn assert_coords_unique<S>(lattice: &Lattice<S>) {
    let coords: Vec<CoordVector> = lattice
        .iter()
        .map(|id| lattice.cell(id).expect("reachable cell must exist").coord().clone())
        .collect();
    let unique: IndexSet<&CoordVector> = coords.iter().collect();
    assert_eq!(unique.len(), coords.len(), "duplicate coordinates in lattice");
}

/// Assert that one step along `+e_i` followed by one along `-e_i` (and
/// the reverse) returns to the start, wherever both steps exist.
pub fn assert_relative_unit_steps_invert<S>(lattice: &Lattice<S>) {
    for id in lattice.iter() {
        let dims = lattice.cell(id).expect("reachable cell must exist").dimension_count();
        for axis in 0..dims {
            for sign in [1, -1] {
                let mut step = vec![0; dims];
                step[axis] = sign;
                let there = match lattice.relative_cell(id, &step) {
                    Ok(c) => c,
                    Err(LatticeError::EdgeReached { .. }) => continue,
                    Err(e) => panic!("relative_cell({id}, {step:?}) failed: {e}"),
                };
                step[axis] = -sign;
                let back = lattice
                    .relative_cell(there, &step)
                    .expect("reverse step must exist when forward step does");
                assert_eq!(back, id, "unit steps on axis {axis} do not invert at {id}");
            }
        }
    }
}

/// Run all compliance checks on a lattice.
pub fn run_full_compliance<S>(lattice: &Lattice<S>) {
    assert_links_symmetric(lattice);
    assert_coords_match_dimensions(lattice);
    assert_coords_unique(lattice);
    assert_relative_unit_steps_invert(lattice);
}
