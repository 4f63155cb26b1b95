//! Library statistics, derived on the client from the library list.

use std::collections::BTreeMap;

use gametracker_shared::LibraryEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    pub completed: usize,
    /// `round(100 * completed / total)`, 0 for an empty library.
    pub completion_percentage: u32,
    /// Mean over entries that carry a rating; 0 when none do.
    pub average_rating: f64,
    pub rated: usize,
    pub by_platform: BTreeMap<String, usize>,
    pub by_genre: BTreeMap<String, usize>,
}

/// One slice of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
    /// Fraction of the series total, `0.0..=1.0`.
    pub share: f64,
}

impl LibraryStats {
    pub fn from_entries(entries: &[LibraryEntry]) -> Self {
        let total = entries.len();
        let completed = entries.iter().filter(|e| e.completed).count();

        let ratings: Vec<f64> = entries
            .iter()
            .filter_map(|e| e.rating)
            .filter(|r| r.is_finite())
            .collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        let mut by_platform = BTreeMap::new();
        let mut by_genre = BTreeMap::new();
        for entry in entries {
            *by_platform
                .entry(entry.platform_label().to_string())
                .or_insert(0) += 1;
            *by_genre.entry(entry.genre_label().to_string()).or_insert(0) += 1;
        }

        Self {
            total,
            completed,
            completion_percentage: percentage(completed, total),
            average_rating,
            rated: ratings.len(),
            by_platform,
            by_genre,
        }
    }

    /// Games not completed yet.
    pub fn active(&self) -> usize {
        self.total - self.completed
    }

    pub fn average_rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }

    pub fn platform_series(&self) -> Vec<ChartPoint> {
        series(&self.by_platform)
    }

    pub fn genre_series(&self) -> Vec<ChartPoint> {
        series(&self.by_genre)
    }
}

/// Integer percentage, rounding halves up.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 * 100.0 / total as f64) + 0.5).floor() as u32
}

/// Largest first, ties by name.
fn series(counts: &BTreeMap<String, usize>) -> Vec<ChartPoint> {
    let sum: usize = counts.values().sum();
    let mut points: Vec<ChartPoint> = counts
        .iter()
        .map(|(name, value)| ChartPoint {
            name: name.clone(),
            value: *value,
            share: if sum == 0 {
                0.0
            } else {
                *value as f64 / sum as f64
            },
        })
        .collect();
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametracker_shared::{Genre, Platform, UNKNOWN_GENRE, UNKNOWN_PLATFORM};

    fn entry(completed: bool) -> LibraryEntry {
        LibraryEntry {
            completed,
            ..Default::default()
        }
    }

    #[test]
    fn two_of_three_completed() {
        let stats = LibraryStats::from_entries(&[entry(true), entry(false), entry(true)]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.completion_percentage, 67);
        assert_eq!(stats.active(), 1);
    }

    #[test]
    fn empty_library() {
        let stats = LibraryStats::from_entries(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_percentage, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.average_rating_label(), "0.0");
        assert!(stats.platform_series().is_empty());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(3, 3), 100);
        for total in 1..20 {
            for part in 0..=total {
                let expected = (100.0 * part as f64 / total as f64).round() as u32;
                assert_eq!(percentage(part, total), expected);
            }
        }
    }

    #[test]
    fn average_skips_unrated_entries() {
        let mut a = entry(false);
        a.rating = Some(4.0);
        let mut b = entry(false);
        b.rating = Some(3.0);
        let c = entry(true);

        let stats = LibraryStats::from_entries(&[a, b, c]);
        assert_eq!(stats.rated, 2);
        assert_eq!(stats.average_rating_label(), "3.5");
    }

    #[test]
    fn missing_fields_fall_into_unknown_buckets() {
        let mut pc = entry(false);
        pc.platform = Some(Platform::Pc);
        pc.genre = Some(Genre::Rpg);
        let bare = entry(false);

        let stats = LibraryStats::from_entries(&[pc, bare]);
        assert_eq!(stats.by_platform.get("PC"), Some(&1));
        assert_eq!(stats.by_platform.get(UNKNOWN_PLATFORM), Some(&1));
        assert_eq!(stats.by_genre.get(UNKNOWN_GENRE), Some(&1));
    }

    #[test]
    fn series_is_sorted_by_count_then_name() {
        let mut entries = Vec::new();
        for platform in [Platform::Xbox, Platform::Pc, Platform::Pc, Platform::Nintendo] {
            let mut e = entry(false);
            e.platform = Some(platform);
            entries.push(e);
        }

        let series = LibraryStats::from_entries(&entries).platform_series();
        let names: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PC", "Nintendo", "Xbox"]);
        assert_eq!(series[0].share, 0.5);
    }
}
