//! Bounded color history and CSV export

use std::collections::VecDeque;

use crate::color::rgb_to_hsl;
use crate::models::{ColorHsl, ColorSample};

/// CSV header row for history exports
pub const CSV_HEADER: &str = "Name,HEX,RGB,R,G,B,HSL,H,S,L";

/// Ordered sequence of color samples, most recent first
///
/// Insertion prepends; entries past the bound are dropped oldest-first. The
/// same color may appear multiple times.
#[derive(Debug, Clone)]
pub struct ColorHistory {
    entries: VecDeque<ColorSample>,
    limit: usize,
}

impl ColorHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, sample: ColorSample) {
        self.entries.push_front(sample);
        self.entries.truncate(self.limit);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn get(&self, index: usize) -> Option<&ColorSample> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorSample> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<ColorSample> {
        self.entries.iter().cloned().collect()
    }

    /// Serialize the history as CSV, most recent entry first
    ///
    /// The composite RGB/HSL display fields contain commas and are
    /// double-quoted; the remaining fields are plain.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);

        for entry in &self.entries {
            let hsl = match &entry.hsl {
                Some(hsl) => hsl.clone(),
                None => ColorHsl::from(rgb_to_hsl(entry.color())),
            };

            csv.push('\n');
            csv.push_str(&format!(
                "{},{},\"{}\",{},{},{},\"{}\",{},{},{}",
                entry.name.value,
                entry.hex.value,
                entry.rgb.value,
                entry.rgb.r,
                entry.rgb.g,
                entry.rgb.b,
                hsl.value,
                hsl.h,
                hsl.s,
                hsl.l,
            ));
        }

        csv
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Color;

    use super::*;

    fn sample(r: u8) -> ColorSample {
        ColorSample::from_color(Color::new(r, 0, 0))
    }

    /// Split a CSV row on commas, honoring double quotes
    fn fields(row: &str) -> Vec<String> {
        let mut fields = vec![String::new()];
        let mut quoted = false;

        for c in row.chars() {
            match c {
                '"' => quoted = !quoted,
                ',' if !quoted => fields.push(String::new()),
                other => {
                    if let Some(last) = fields.last_mut() {
                        last.push(other);
                    }
                }
            }
        }

        fields
    }

    #[test]
    fn insertion_is_most_recent_first() {
        let mut history = ColorHistory::new(20);
        history.push(sample(1));
        history.push(sample(2));
        history.push(sample(3));

        let reds: Vec<u8> = history.iter().map(|entry| entry.rgb.r).collect();
        assert_eq!(reds, vec![3, 2, 1]);
    }

    #[test]
    fn bound_evicts_oldest() {
        let mut history = ColorHistory::new(3);

        for r in 1..=5u8 {
            history.push(sample(r));
        }

        assert_eq!(history.len(), 3);
        let reds: Vec<u8> = history.iter().map(|entry| entry.rgb.r).collect();
        assert_eq!(reds, vec![5, 4, 3]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut history = ColorHistory::new(20);
        history.push(sample(1));
        history.push(sample(1));

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn csv_shape() {
        let mut history = ColorHistory::new(20);
        history.push(sample(255).with_hsl());
        history.push(sample(0));

        let csv = history.to_csv();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], CSV_HEADER);
        assert_eq!(fields(rows[0]).len(), 10);

        for row in &rows[1..] {
            assert_eq!(fields(row).len(), 10, "malformed row: {}", row);
        }

        // Entries lacking HSL are enriched during export
        assert_eq!(
            fields(rows[1]),
            vec![
                "Fallback Color",
                "#000000",
                "rgb(0, 0, 0)",
                "0",
                "0",
                "0",
                "hsl(0, 0%, 0%)",
                "0",
                "0",
                "0"
            ]
        );
        assert_eq!(
            fields(rows[2]),
            vec![
                "Fallback Color",
                "#FF0000",
                "rgb(255, 0, 0)",
                "255",
                "0",
                "0",
                "hsl(0, 100%, 50%)",
                "0",
                "100",
                "50"
            ]
        );
    }
}
