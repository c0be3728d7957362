//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float + std::ops::AddAssign
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    // Sum all elements of the points
    let mut sum = T::from(0).unwrap();

    for i in 0..point_0.len() {
        sum += (point_0[i] - point_1[i]).powi(2);
    }

    // Return the squareroot of the sum
    Some(sum.sqrt())
}

/// Wrap an angle in degrees into the range (-180, 180].
///
/// Any real input is accepted, including values many revolutions outside the
/// principal range.
pub fn wrap_angle_deg<T>(angle: T) -> T
where
    T: Float + std::ops::Rem
{
    let half_turn = T::from(180.0).unwrap();
    let full_turn = T::from(360.0).unwrap();

    let wrapped = rem_euclid(angle + half_turn, full_turn) - half_turn;

    // rem_euclid gives [-180, 180), the principal range is (-180, 180]
    if wrapped == -half_turn {
        half_turn
    }
    else {
        wrapped
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float + std::ops::Rem
{
    let r = lhs % rhs;
    if r < T::from(0.0).unwrap() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrap_angle_deg() {
        assert_eq!(wrap_angle_deg(0f64), 0f64);
        assert_eq!(wrap_angle_deg(45f64), 45f64);
        assert_eq!(wrap_angle_deg(-45f64), -45f64);
        assert_eq!(wrap_angle_deg(180f64), 180f64);
        assert_eq!(wrap_angle_deg(-180f64), 180f64);
        assert_eq!(wrap_angle_deg(360f64), 0f64);
        assert_eq!(wrap_angle_deg(540f64), 180f64);
        assert_eq!(wrap_angle_deg(-540f64), 180f64);
        assert_eq!(wrap_angle_deg(725f64), 5f64);
        assert_eq!(wrap_angle_deg(-725f64), -5f64);
    }

    #[test]
    fn test_wrap_angle_deg_range() {
        // Sweep a wide range of inputs and check the principal range holds
        let mut angle = -1000f64;
        while angle < 1000f64 {
            let wrapped = wrap_angle_deg(angle);
            assert!(
                wrapped > -180f64 && wrapped <= 180f64,
                "wrap_angle_deg({}) = {} out of range", angle, wrapped
            );
            angle += 0.37;
        }
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[0f64, 0f64], &[3f64, 4f64]), Some(5f64));
        assert_eq!(norm(&[1f64], &[1f64, 2f64]), None);
    }
}
