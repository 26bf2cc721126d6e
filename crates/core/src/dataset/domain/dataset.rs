use crate::shared::box_size::BoxSize;

/// Ordered, read-only collection of ground-truth box sizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    boxes: Vec<BoxSize>,
}

impl Dataset {
    pub fn new(boxes: Vec<BoxSize>) -> Self {
        Self { boxes }
    }

    pub fn boxes(&self) -> &[BoxSize] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn widths(&self) -> Vec<f64> {
        self.boxes.iter().map(|b| b.width).collect()
    }

    pub fn heights(&self) -> Vec<f64> {
        self.boxes.iter().map(|b| b.height).collect()
    }

    pub fn aspect_ratios(&self) -> Vec<f64> {
        self.boxes.iter().map(BoxSize::aspect_ratio).collect()
    }

    pub fn extend(&mut self, other: Dataset) {
        self.boxes.extend(other.boxes);
    }
}

impl From<Vec<BoxSize>> for Dataset {
    fn from(boxes: Vec<BoxSize>) -> Self {
        Self::new(boxes)
    }
}

impl FromIterator<BoxSize> for Dataset {
    fn from_iter<I: IntoIterator<Item = BoxSize>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dataset() -> Dataset {
        vec![BoxSize::new(2.0, 1.0), BoxSize::new(3.0, 6.0)].into()
    }

    #[test]
    fn test_columns() {
        let d = dataset();
        assert_eq!(d.widths(), vec![2.0, 3.0]);
        assert_eq!(d.heights(), vec![1.0, 6.0]);
        let ratios = d.aspect_ratios();
        assert_relative_eq!(ratios[0], 0.5);
        assert_relative_eq!(ratios[1], 2.0);
    }

    #[test]
    fn test_extend_appends_in_order() {
        let mut d = dataset();
        d.extend(Dataset::from_iter([BoxSize::new(9.0, 9.0)]));
        assert_eq!(d.len(), 3);
        assert_eq!(d.boxes()[2], BoxSize::new(9.0, 9.0));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Dataset::default().is_empty());
    }
}
