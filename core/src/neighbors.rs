use crate::*;

/// Adds one to the neighbor count of every cell adjacent to each mine.
///
/// Counts accumulate, so this must run exactly once per freshly planted grid.
pub fn compute_neighbor_counts(grid: &mut Grid, mine_locations: &MineLocations) {
    for mine in mine_locations.iter() {
        for pos in grid.iter_neighbors(mine) {
            let cell = grid.cell_mut(pos);
            cell.neighbor_mine_count = cell.neighbor_mine_count.saturating_add(1);
        }
    }
}
