use serde::Serialize;

use crate::shared::box_size::BoxSize;

/// A cluster center annotated for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Anchor {
    pub width: f64,
    pub height: f64,
    /// Height over width.
    pub aspect_ratio: f64,
}

impl From<BoxSize> for Anchor {
    fn from(b: BoxSize) -> Self {
        Self {
            width: b.width,
            height: b.height,
            aspect_ratio: b.aspect_ratio(),
        }
    }
}

/// Orders cluster centers from smallest to largest area and attaches
/// each one's aspect ratio. Equal areas keep their input order.
pub fn sort_by_area(clusters: &[BoxSize]) -> Vec<Anchor> {
    let mut sorted = clusters.to_vec();
    sorted.sort_by(|a, b| a.area().total_cmp(&b.area()));
    sorted.into_iter().map(Anchor::from).collect()
}

/// [`sort_by_area`] with each anchor paired to its member count.
///
/// `sizes[i]` is the number of boxes assigned to `clusters[i]`, as returned
/// by `Clustering::cluster_sizes`.
pub fn sort_with_members(clusters: &[BoxSize], sizes: &[usize]) -> Vec<(Anchor, usize)> {
    let mut rows: Vec<(BoxSize, usize)> = clusters
        .iter()
        .copied()
        .zip(sizes.iter().copied())
        .collect();
    rows.sort_by(|(a, _), (b, _)| a.area().total_cmp(&b.area()));
    rows.into_iter().map(|(c, n)| (Anchor::from(c), n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sorts_by_area_and_appends_ratio() {
        let clusters = vec![
            BoxSize::new(10.0, 5.0),
            BoxSize::new(2.0, 2.0),
            BoxSize::new(4.0, 8.0),
        ];
        let anchors = sort_by_area(&clusters);

        let sizes: Vec<(f64, f64)> = anchors.iter().map(|a| (a.width, a.height)).collect();
        assert_eq!(sizes, vec![(2.0, 2.0), (4.0, 8.0), (10.0, 5.0)]);

        let ratios: Vec<f64> = anchors.iter().map(|a| a.aspect_ratio).collect();
        assert_relative_eq!(ratios[0], 1.0);
        assert_relative_eq!(ratios[1], 2.0);
        assert_relative_eq!(ratios[2], 0.5);
    }

    #[test]
    fn test_equal_areas_keep_input_order() {
        let clusters = vec![BoxSize::new(4.0, 1.0), BoxSize::new(1.0, 4.0)];
        let anchors = sort_by_area(&clusters);
        assert_relative_eq!(anchors[0].width, 4.0);
        assert_relative_eq!(anchors[1].width, 1.0);
    }

    #[test]
    fn test_input_left_untouched() {
        let clusters = vec![BoxSize::new(3.0, 3.0), BoxSize::new(1.0, 1.0)];
        sort_by_area(&clusters);
        assert_eq!(clusters[0], BoxSize::new(3.0, 3.0));
    }

    #[test]
    fn test_member_counts_follow_their_cluster() {
        let clusters = vec![
            BoxSize::new(10.0, 5.0),
            BoxSize::new(2.0, 2.0),
            BoxSize::new(4.0, 8.0),
        ];
        let rows = sort_with_members(&clusters, &[7, 3, 5]);

        let widths: Vec<f64> = rows.iter().map(|(a, _)| a.width).collect();
        let counts: Vec<usize> = rows.iter().map(|&(_, n)| n).collect();
        assert_eq!(widths, vec![2.0, 4.0, 10.0]);
        assert_eq!(counts, vec![3, 5, 7]);
    }

    #[test]
    fn test_empty() {
        assert!(sort_by_area(&[]).is_empty());
    }
}
