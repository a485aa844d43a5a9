/// Computes `Σ value·weight / Σ weight` over `(value, weight)` pairs.
///
/// Returns `(average, total_weight)`. The average is 0.0 when the total
/// weight is not positive, including for empty input. Weights are not
/// validated here; callers reject negative weights first.
pub fn weighted_average<I>(pairs: I) -> (f64, f64)
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted_total, weight_sum) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(total, sum), (value, weight)| {
            (total + value * weight, sum + weight)
        });

    let average = if weight_sum > 0.0 {
        weighted_total / weight_sum
    } else {
        0.0
    };

    (average, weight_sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_average_empty() {
        assert_eq!(weighted_average(Vec::new()), (0.0, 0.0));
    }

    #[test]
    fn test_weighted_average_zero_weight() {
        assert_eq!(weighted_average([(3.5, 0.0), (2.0, 0.0)]), (0.0, 0.0));
    }

    #[test]
    fn test_weighted_average_normal_values() {
        let (avg, total) = weighted_average([(4.0, 1.0), (2.0, 3.0)]);
        assert_eq!(total, 4.0);
        assert_eq!(avg, 2.5);
    }

    #[test]
    fn test_weighted_average_ignores_order() {
        let pairs = vec![(3.33, 3.0), (2.66, 4.0), (1.0, 2.0), (4.0, 1.5), (0.0, 3.0)];
        let (expected, expected_total) = weighted_average(pairs.clone());

        let mut reversed = pairs.clone();
        reversed.reverse();
        let mut rotated = pairs.clone();
        rotated.rotate_left(2);

        for permutation in [reversed, rotated] {
            let (avg, total) = weighted_average(permutation);
            assert!((avg - expected).abs() < 1e-12);
            assert!((total - expected_total).abs() < 1e-12);
        }
    }
}
