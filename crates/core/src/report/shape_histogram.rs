//! Text histograms of the box-shape distribution.
//!
//! Bins are equal-width over `[min, max]`; the last bin is closed.

use crate::dataset::domain::dataset::Dataset;

const BAR_CHAR: char = '#';

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeHistogram {
    pub title: String,
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl ShapeHistogram {
    pub fn compute(title: &str, values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Self {
                title: title.to_string(),
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let step = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / (hi - lo)) * bins as f64) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self {
            title: title.to_string(),
            edges,
            counts,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Renders one line per bin with bars scaled to at most `bar_width` chars.
    pub fn render(&self, bar_width: usize) -> String {
        let mut lines = vec![format!("{} ({} values)", self.title, self.total())];
        let max_count = self.counts.iter().copied().max().unwrap_or(0);

        for (i, &count) in self.counts.iter().enumerate() {
            let bar_len = if max_count > 0 {
                (count * bar_width + max_count - 1) / max_count
            } else {
                0
            };
            let bar: String = std::iter::repeat(BAR_CHAR).take(bar_len).collect();
            lines.push(format!(
                "{:>9.3} - {:<9.3} |{bar} {count}",
                self.edges[i],
                self.edges[i + 1]
            ));
        }
        lines.join("\n")
    }
}

/// Width, height and aspect-ratio histograms of a dataset.
pub struct ShapeHistograms {
    pub width: ShapeHistogram,
    pub height: ShapeHistogram,
    pub aspect_ratio: ShapeHistogram,
}

impl ShapeHistograms {
    pub fn compute(dataset: &Dataset, bins: usize) -> Self {
        Self {
            width: ShapeHistogram::compute("Distribution of width", &dataset.widths(), bins),
            height: ShapeHistogram::compute("Distribution of height", &dataset.heights(), bins),
            aspect_ratio: ShapeHistogram::compute(
                "Distribution of aspect ratio (height / width)",
                &dataset.aspect_ratios(),
                bins,
            ),
        }
    }

    pub fn render(&self, bar_width: usize) -> String {
        [&self.width, &self.height, &self.aspect_ratio]
            .iter()
            .map(|h| h.render(bar_width))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::box_size::BoxSize;
    use approx::assert_relative_eq;

    #[test]
    fn test_edges_span_min_to_max() {
        let h = ShapeHistogram::compute("w", &[1.0, 2.0, 5.0], 4);
        assert_eq!(h.edges.len(), 5);
        assert_relative_eq!(h.edges[0], 1.0);
        assert_relative_eq!(h.edges[1], 2.0);
        assert_relative_eq!(h.edges[4], 5.0);
    }

    #[test]
    fn test_last_bin_is_closed() {
        let h = ShapeHistogram::compute("w", &[0.0, 0.5, 1.0, 1.0], 2);
        assert_eq!(h.counts, vec![1, 3]);
    }

    #[test]
    fn test_counts_sum_to_input() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64).sqrt()).collect();
        let h = ShapeHistogram::compute("w", &values, 7);
        assert_eq!(h.total(), 100);
    }

    #[test]
    fn test_constant_values_get_unit_range() {
        let h = ShapeHistogram::compute("w", &[3.0, 3.0], 2);
        assert_relative_eq!(h.edges[0], 2.5);
        assert_relative_eq!(h.edges[2], 3.5);
        assert_eq!(h.counts, vec![0, 2]);
    }

    #[test]
    fn test_empty_and_non_finite() {
        let h = ShapeHistogram::compute("w", &[f64::NAN, f64::INFINITY], 5);
        assert!(h.counts.is_empty());
        assert_eq!(h.render(10), "w (0 values)");
    }

    #[test]
    fn test_render_scales_bars() {
        let h = ShapeHistogram::compute("Widths", &[0.0, 1.0, 1.0, 1.0, 1.0], 2);
        let text = h.render(4);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Widths (5 values)");
        assert!(lines[1].ends_with("|# 1"));
        assert!(lines[2].ends_with("|#### 4"));
    }

    #[test]
    fn test_dataset_histograms() {
        let dataset: Dataset = vec![BoxSize::new(1.0, 2.0), BoxSize::new(2.0, 2.0)].into();
        let hists = ShapeHistograms::compute(&dataset, 3);
        assert_eq!(hists.width.total(), 2);
        assert_eq!(hists.height.counts, vec![0, 2, 0]);
        assert_relative_eq!(hists.aspect_ratio.edges[0], 1.0);
        assert_eq!(hists.render(5).split("\n\n").count(), 3);
    }
}
