use crate::arena::Arena;
use crate::body::{Body, Pose};
use crate::vector::Vector2D;

/// Most cells the grid will lay along one axis; bigger arenas get bigger cells.
const MAX_UNITS: f32 = 1024.0;

/// Uniform grid over the arena, with one ring of border cells so bodies
/// sitting exactly on an edge still land in a real cell.
pub struct SpatialGrid {
    cell_size: f32,
    x_units: i32,
    y_units: i32,
    sections: Vec<Vec<Section>>,
    out_of_bounds: Section,
}

#[derive(Default)]
pub struct Section {
    pub items: Vec<usize>,
}

impl SpatialGrid {
    /// Cells are at least `cell_size` wide, and wider when the arena would
    /// otherwise need more than `MAX_UNITS` of them per axis.
    pub fn new(cell_size: f32, arena: &Arena) -> SpatialGrid {
        let longest = arena.width().max(arena.height());
        let cell_size = cell_size.max(1.0).max(longest / MAX_UNITS);
        let x_units = (arena.width() / cell_size).ceil().min(MAX_UNITS) as i32 + 2;
        let y_units = (arena.height() / cell_size).ceil().min(MAX_UNITS) as i32 + 2;
        let sections = (0..x_units)
            .map(|_| (0..y_units).map(|_| Section::default()).collect())
            .collect();
        SpatialGrid {
            cell_size,
            x_units,
            y_units,
            sections,
            out_of_bounds: Section::default(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell coordinates of `p`. Anything far off the grid is pinned to one
    /// cell past its edge so the arithmetic around it can't overflow.
    fn unit(&self, p: Vector2D) -> (i32, i32) {
        let x = (p.x / self.cell_size).floor() + 1.0;
        let y = (p.y / self.cell_size).floor() + 1.0;
        (
            x.clamp(-1.0, self.x_units as f32) as i32,
            y.clamp(-1.0, self.y_units as f32) as i32,
        )
    }

    fn get_section(&self, x: i32, y: i32) -> Option<&Section> {
        if x < 0 || x >= self.x_units || y < 0 || y >= self.y_units {
            return None;
        }
        Some(&self.sections[x as usize][y as usize])
    }

    pub fn clear(&mut self) {
        for column in &mut self.sections {
            for section in column {
                section.items.clear();
            }
        }
        self.out_of_bounds.items.clear();
    }

    pub fn insert(&mut self, index: usize, position: Vector2D) {
        let (x, y) = self.unit(position);
        if x < 0 || x >= self.x_units || y < 0 || y >= self.y_units {
            self.out_of_bounds.items.push(index);
        } else {
            self.sections[x as usize][y as usize].items.push(index);
        }
    }

    /// Indices in the cell containing `position` and its eight neighbours.
    /// Anything filed out of bounds is always included.
    pub fn nearby(&self, position: Vector2D) -> Vec<usize> {
        let (cx, cy) = self.unit(position);
        let mut result = self.out_of_bounds.items.clone();
        for x in (cx - 1)..=(cx + 1) {
            for y in (cy - 1)..=(cy + 1) {
                if let Some(section) = self.get_section(x, y) {
                    result.extend_from_slice(&section.items);
                }
            }
        }
        result
    }
}

/// Every body's pose frozen before a step, indexed in a grid.
///
/// Neighbour queries only ever see these pre-step poses, so the order bodies
/// are updated in cannot change what any of them observes.
pub struct Snapshot<'g> {
    poses: Vec<Pose>,
    grid: &'g SpatialGrid,
    radius: f32,
}

impl<'g> Snapshot<'g> {
    /// Refill `grid` from the current bodies. The grid's cells must be at
    /// least `radius` wide.
    pub fn capture(bodies: &[Body], grid: &'g mut SpatialGrid, radius: f32) -> Snapshot<'g> {
        grid.clear();
        let poses: Vec<Pose> = bodies.iter().map(Body::pose).collect();
        for (i, pose) in poses.iter().enumerate() {
            grid.insert(i, pose.position);
        }
        Snapshot { poses, grid, radius }
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn pose(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Other bodies within `radius` of body `index`, by pre-step position.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let Some(me) = self.poses.get(index) else {
            return Vec::new();
        };
        let r_sq = self.radius * self.radius;
        let mut found: Vec<usize> = self
            .grid
            .nearby(me.position)
            .into_iter()
            .filter(|&j| j != index && me.position.distance_squared(self.poses[j].position) <= r_sq)
            .collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(100.0, 100.0).unwrap()
    }

    #[test]
    fn nearby_covers_adjacent_cells() {
        let mut grid = SpatialGrid::new(10.0, &arena());
        grid.insert(0, Vector2D::new(5.0, 5.0));
        grid.insert(1, Vector2D::new(14.0, 14.0));
        grid.insert(2, Vector2D::new(55.0, 55.0));
        grid.insert(3, Vector2D::new(100.0, 100.0));

        let mut near = grid.nearby(Vector2D::new(9.0, 9.0));
        near.sort();
        assert_eq!(near, vec![0, 1]);
        assert_eq!(grid.nearby(Vector2D::new(99.0, 99.0)), vec![3]);

        grid.clear();
        assert!(grid.nearby(Vector2D::new(9.0, 9.0)).is_empty());
    }

    #[test]
    fn far_positions_go_out_of_bounds() {
        let mut grid = SpatialGrid::new(10.0, &arena());
        grid.insert(7, Vector2D::new(-500.0, 50.0));
        assert_eq!(grid.nearby(Vector2D::new(50.0, 50.0)), vec![7]);
    }

    #[test]
    fn neighbors_use_radius_and_skip_self() {
        let arena = arena();
        let bodies: Vec<Body> = [(50.0, 50.0), (58.0, 50.0), (50.0, 66.0), (90.0, 90.0)]
            .into_iter()
            .map(|(x, y)| Body::new(arena, x, y))
            .collect();
        let mut grid = SpatialGrid::new(10.0, &arena);
        let snapshot = Snapshot::capture(&bodies, &mut grid, 10.0);
        assert_eq!(snapshot.radius(), 10.0);
        assert_eq!(snapshot.poses().len(), 4);
        assert_eq!(snapshot.pose(1).map(|p| p.position), Some(Vector2D::new(58.0, 50.0)));
        assert!(snapshot.pose(4).is_none());
        assert_eq!(snapshot.neighbors(0), vec![1]);
        assert_eq!(snapshot.neighbors(1), vec![0]);
        assert!(snapshot.neighbors(3).is_empty());
        assert!(snapshot.neighbors(99).is_empty());
    }

    #[test]
    fn capture_refills_the_same_grid() {
        let arena = arena();
        let mut grid = SpatialGrid::new(10.0, &arena);
        let first = vec![Body::new(arena, 10.0, 10.0), Body::new(arena, 15.0, 10.0)];
        assert_eq!(Snapshot::capture(&first, &mut grid, 10.0).neighbors(0), vec![1]);

        let second = vec![Body::new(arena, 80.0, 80.0), Body::new(arena, 10.0, 10.0)];
        let snapshot = Snapshot::capture(&second, &mut grid, 10.0);
        assert!(snapshot.neighbors(0).is_empty());
        assert!(snapshot.neighbors(1).is_empty());
    }

    #[test]
    fn extreme_positions_do_not_overflow() {
        let mut grid = SpatialGrid::new(10.0, &arena());
        grid.insert(0, Vector2D::new(1e12, 50.0));
        grid.insert(1, Vector2D::new(-1e12, -1e12));
        grid.insert(2, Vector2D::new(f32::MAX, f32::MIN));
        grid.insert(3, Vector2D::new(f32::INFINITY, 50.0));
        grid.insert(4, Vector2D::new(50.0, 50.0));

        let mut near = grid.nearby(Vector2D::new(50.0, 50.0));
        near.sort();
        assert_eq!(near, vec![0, 1, 2, 3, 4]);

        let mut far = grid.nearby(Vector2D::new(f32::MAX, f32::MAX));
        far.sort();
        assert_eq!(far, vec![0, 1, 2, 3]);
        assert!(grid.nearby(Vector2D::new(f32::NAN, f32::NAN)).len() >= 4);
    }

    #[test]
    fn huge_arenas_get_wider_cells() {
        let arena = Arena::new(3e9, 10.0).unwrap();
        let mut grid = SpatialGrid::new(1.0, &arena);
        assert!(grid.cell_size() >= 3e9 / MAX_UNITS);
        assert!(grid.x_units <= MAX_UNITS as i32 + 2);

        grid.insert(0, Vector2D::new(1.5e9, 5.0));
        assert_eq!(grid.nearby(Vector2D::new(1.5e9, 5.0)), vec![0]);
    }

    #[test]
    fn small_arenas_keep_the_requested_cell_size() {
        let grid = SpatialGrid::new(16.0, &arena());
        assert_eq!(grid.cell_size(), 16.0);
        assert_eq!(SpatialGrid::new(0.25, &arena()).cell_size(), 1.0);
    }
}
