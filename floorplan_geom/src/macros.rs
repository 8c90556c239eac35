/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing the point list macros. Used for extracting macro repetition count
/// for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a point list (ring or open path) from (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::points;
/// # use floorplan_geom::core::math::Vector2;
/// let ring: Vec<Vector2<f64>> = points![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)];
/// assert_eq!(ring.len(), 3);
/// assert_eq!(ring[2], Vector2::new(4.0, 3.0));
/// ```
#[macro_export]
macro_rules! points {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut points = ::std::vec::Vec::with_capacity(size);
            $(
                points.push($crate::core::math::Vector2::new($x.0, $x.1));
            )*
            points
        }
    };
}
