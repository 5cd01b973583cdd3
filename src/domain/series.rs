//! Named date-aligned series with explicit undefined points.
//!
//! Every derived series keeps the date alignment of its source; warmup
//! points where a rolling window has insufficient history are `None`,
//! never a placeholder number. Defined values always form a contiguous
//! suffix (indicators only ever extend the undefined prefix).

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Build a series from parallel date and value slices.
    pub fn from_values(
        name: impl Into<String>,
        dates: &[NaiveDate],
        values: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        let points = dates
            .iter()
            .zip(values)
            .map(|(&date, value)| SeriesPoint { date, value })
            .collect();
        Self::new(name, points)
    }

    /// Build a series where every point is defined.
    pub fn fully_defined(name: impl Into<String>, dates: &[NaiveDate], values: &[f64]) -> Self {
        Self::from_values(name, dates, values.iter().copied().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    pub fn first_defined_index(&self) -> Option<usize> {
        self.points.iter().position(|p| p.value.is_some())
    }

    /// Index of the first defined point plus the defined values themselves.
    /// `None` when the series has no defined point at all.
    pub fn defined_suffix(&self) -> Option<(usize, Vec<f64>)> {
        let start = self.first_defined_index()?;
        let values = self.points[start..]
            .iter()
            .map(|p| p.value.unwrap_or(f64::NAN))
            .collect();
        Some((start, values))
    }

    pub fn last_defined(&self) -> Option<(NaiveDate, f64)> {
        self.points
            .iter()
            .rev()
            .find_map(|p| p.value.map(|v| (p.date, v)))
    }

    /// The last two defined values, oldest first.
    pub fn last_two_defined(&self) -> Option<(f64, f64)> {
        let mut it = self.points.iter().rev().filter_map(|p| p.value);
        let last = it.next()?;
        let prev = it.next()?;
        Some((prev, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
            .collect()
    }

    #[test]
    fn from_values_aligns_dates() {
        let d = dates(3);
        let s = Series::from_values("test", &d, vec![None, Some(1.0), Some(2.0)]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.points[0].date, d[0]);
        assert_eq!(s.value(0), None);
        assert_eq!(s.value(2), Some(2.0));
    }

    #[test]
    fn defined_count_and_first_index() {
        let d = dates(4);
        let s = Series::from_values("test", &d, vec![None, None, Some(1.0), Some(2.0)]);
        assert_eq!(s.defined_count(), 2);
        assert_eq!(s.first_defined_index(), Some(2));
    }

    #[test]
    fn defined_suffix() {
        let d = dates(4);
        let s = Series::from_values("test", &d, vec![None, None, Some(1.0), Some(2.0)]);
        let (start, values) = s.defined_suffix().unwrap();
        assert_eq!(start, 2);
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn defined_suffix_all_undefined() {
        let d = dates(2);
        let s = Series::from_values("test", &d, vec![None, None]);
        assert!(s.defined_suffix().is_none());
    }

    #[test]
    fn last_defined_and_last_two() {
        let d = dates(4);
        let s = Series::from_values("test", &d, vec![None, Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(s.last_defined(), Some((d[3], 3.0)));
        assert_eq!(s.last_two_defined(), Some((2.0, 3.0)));
    }

    #[test]
    fn last_two_needs_two_points() {
        let d = dates(2);
        let s = Series::from_values("test", &d, vec![None, Some(1.0)]);
        assert_eq!(s.last_two_defined(), None);
    }
}
