//! Pure helpers over [`Vector`] coordinates.
//!
//! Everything here takes and returns values; no function keeps or hands out
//! references into caller state.

use crate::{Direction, Vector};

/// Ray order used by [`line`] and [`view_line`].
const RAY_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// Component-wise sum.
#[must_use]
pub fn add(v1: Vector, v2: Vector) -> Vector {
    v1 + v2
}

/// Component-wise difference `v1 - v2`.
#[must_use]
pub fn subtract(v1: Vector, v2: Vector) -> Vector {
    v1 - v2
}

/// Flips the sign of both components.
#[must_use]
pub fn negate(v: Vector) -> Vector {
    -v
}

/// Component-wise sign removal.
#[must_use]
pub fn abs(v: Vector) -> Vector {
    v.abs()
}

/// Component-wise equality.
#[must_use]
pub fn equals(v1: Vector, v2: Vector) -> bool {
    v1 == v2
}

/// Reports whether `v` appears in `set`.
#[must_use]
pub fn contains(v: Vector, set: &[Vector]) -> bool {
    set.iter().any(|candidate| *candidate == v)
}

/// Coordinates on the four axis rays leaving `origin`, out to `range` tiles.
///
/// The origin itself is excluded. Rays are emitted left, right, up, down and
/// each ray is ordered by increasing distance, so the result holds exactly
/// `4 * range` coordinates for a positive range and nothing otherwise.
/// Obstructions and grid bounds are ignored.
#[must_use]
pub fn line(origin: Vector, range: i32) -> Vec<Vector> {
    let reach = range.max(0);
    let mut coordinates = Vec::with_capacity(4 * usize::try_from(reach).unwrap_or(0));

    for direction in RAY_ORDER {
        let step = direction.vector();
        let mut cursor = origin;
        for _ in 0..reach {
            cursor = cursor + step;
            coordinates.push(cursor);
        }
    }

    coordinates
}

/// Like [`line`], but each ray stops before the first coordinate rejected by
/// `is_valid`.
///
/// The rejected coordinate is not included and nothing beyond it on the same
/// ray is visited. Used for "what can be seen or hit without obstruction".
#[must_use]
pub fn view_line<F>(origin: Vector, range: i32, mut is_valid: F) -> Vec<Vector>
where
    F: FnMut(Vector) -> bool,
{
    let mut coordinates = Vec::new();

    for direction in RAY_ORDER {
        let step = direction.vector();
        let mut cursor = origin;
        for _ in 0..range.max(0) {
            cursor = cursor + step;
            if !is_valid(cursor) {
                break;
            }
            coordinates.push(cursor);
        }
    }

    coordinates
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn arithmetic_helpers_operate_component_wise() {
        let a = Vector::new(3, -2);
        let b = Vector::new(-1, 5);

        assert_eq!(add(a, b), Vector::new(2, 3));
        assert_eq!(subtract(a, b), Vector::new(4, -7));
        assert_eq!(negate(a), Vector::new(-3, 2));
        assert_eq!(abs(a), Vector::new(3, 2));
        assert!(equals(a, Vector::new(3, -2)));
        assert!(!equals(a, b));
    }

    #[test]
    fn contains_searches_by_value() {
        let set = [Vector::new(0, 0), Vector::new(2, 1)];
        assert!(contains(Vector::new(2, 1), &set));
        assert!(!contains(Vector::new(1, 2), &set));
        assert!(!contains(Vector::new(0, 0), &[]));
    }

    #[test]
    fn line_orders_rays_left_right_up_down() {
        let origin = Vector::new(5, 5);

        assert_eq!(
            line(origin, 2),
            vec![
                Vector::new(4, 5),
                Vector::new(3, 5),
                Vector::new(6, 5),
                Vector::new(7, 5),
                Vector::new(5, 4),
                Vector::new(5, 3),
                Vector::new(5, 6),
                Vector::new(5, 7),
            ]
        );
    }

    #[test]
    fn line_with_non_positive_range_is_empty() {
        assert!(line(Vector::ZERO, 0).is_empty());
        assert!(line(Vector::ZERO, -3).is_empty());
    }

    #[test]
    fn view_line_stops_each_ray_at_first_rejection() {
        let origin = Vector::new(2, 2);
        let wall = Vector::new(3, 2);
        let pillar = Vector::new(2, 0);

        let visible = view_line(origin, 2, |cell| cell != wall && cell != pillar);

        assert_eq!(
            visible,
            vec![
                Vector::new(1, 2),
                Vector::new(0, 2),
                Vector::new(2, 1),
                Vector::new(2, 3),
                Vector::new(2, 4),
            ]
        );
    }

    #[test]
    fn view_line_never_probes_past_a_blocked_cell() {
        let mut probed = Vec::new();
        let _ = view_line(Vector::ZERO, 3, |cell| {
            probed.push(cell);
            false
        });

        assert_eq!(
            probed,
            vec![
                Vector::new(-1, 0),
                Vector::new(1, 0),
                Vector::new(0, -1),
                Vector::new(0, 1),
            ]
        );
    }

    #[quickcheck]
    fn line_holds_four_rays_of_range_length(x: i8, y: i8, range: u8) -> bool {
        let origin = Vector::new(i32::from(x), i32::from(y));
        let range = i32::from(range % 16);
        let coordinates = line(origin, range);

        coordinates.len() == 4 * range as usize
            && coordinates.iter().all(|cell| {
                let offset = (*cell - origin).abs();
                (offset.x == 0) != (offset.y == 0)
                    && offset.x.max(offset.y) >= 1
                    && offset.x.max(offset.y) <= range
            })
    }

    #[quickcheck]
    fn view_line_is_a_prefix_subset_of_line(
        x: i8,
        y: i8,
        range: u8,
        blocked: Vec<(i8, i8)>,
    ) -> bool {
        let origin = Vector::new(i32::from(x), i32::from(y));
        let range = i32::from(range % 8);
        let blocked: Vec<Vector> = blocked
            .into_iter()
            .map(|(bx, by)| Vector::new(i32::from(bx), i32::from(by)))
            .collect();

        let full = line(origin, range);
        let visible = view_line(origin, range, |cell| !contains(cell, &blocked));

        visible.iter().all(|cell| contains(*cell, &full) && !contains(*cell, &blocked))
    }
}
