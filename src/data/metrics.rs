use super::model::CovidTable;

/// Headline figures shown above the views.
///
/// Always computed from the full table so the sidebar filters never move them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryMetrics {
    /// Largest `total_cases` in any row.
    pub global_cases: Option<f64>,
    /// Largest non-missing `total_deaths` in any row.
    pub global_deaths: Option<f64>,
    /// `sum(total_deaths) / sum(total_cases) * 100`.
    pub fatality_rate: Option<f64>,
}

impl SummaryMetrics {
    pub fn compute(table: &CovidTable) -> Self {
        let global_cases = table.iter().map(|o| o.total_cases).reduce(f64::max);
        let global_deaths = table.iter().filter_map(|o| o.total_deaths).reduce(f64::max);

        let case_sum: f64 = table.iter().map(|o| o.total_cases).sum();
        let death_sum: f64 = table.iter().filter_map(|o| o.total_deaths).sum();
        let fatality_rate = (case_sum > 0.0).then(|| death_sum / case_sum * 100.0);

        Self {
            global_cases,
            global_deaths,
            fatality_rate,
        }
    }

    pub fn cases_label(&self) -> String {
        self.global_cases.map_or_else(missing, format_count)
    }

    pub fn deaths_label(&self) -> String {
        self.global_deaths.map_or_else(missing, format_count)
    }

    pub fn fatality_label(&self) -> String {
        self.fatality_rate
            .map_or_else(missing, |rate| format!("{}%", format_grouped(rate, 2)))
    }
}

fn missing() -> String {
    "–".to_string()
}

/// Round to an integer and group thousands: `1234567.6` → `"1,234,568"`.
pub fn format_count(value: f64) -> String {
    format_grouped(value, 0)
}

/// Group the integer digits in threes, keeping any sign in front.
fn format_grouped(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, FilterState};
    use crate::data::model::fixtures::{date, obs, two_countries};

    #[test]
    fn computes_max_and_rate_over_all_rows() {
        let m = SummaryMetrics::compute(&two_countries());
        assert_eq!(m.global_cases, Some(100.0));
        assert_eq!(m.global_deaths, Some(4.0));
        // deaths 1+2+1+4 = 8, cases 10+5+50+20+100 = 185
        let rate = m.fatality_rate.unwrap();
        assert!((rate - 8.0 / 185.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn unaffected_by_filters() {
        let table = two_countries();
        let before = SummaryMetrics::compute(&table);

        let filters = FilterState {
            locations: ["Otherland".to_string()].into(),
            dates: vec![date("2021-03-01"), date("2021-03-01")],
        };
        let _filtered = apply_filter(&table, &filters);
        assert_eq!(SummaryMetrics::compute(&table), before);
        assert_eq!(before.global_cases, Some(100.0));
    }

    #[test]
    fn undefined_figures_are_absent() {
        let empty = SummaryMetrics::compute(&CovidTable::default());
        assert_eq!(empty, SummaryMetrics::default());
        assert_eq!(empty.cases_label(), "–");

        let zero = CovidTable::from_rows(vec![obs("Nowhere", "2020-01-01", 0.0, None)]);
        let m = SummaryMetrics::compute(&zero);
        assert_eq!(m.global_cases, Some(0.0));
        assert_eq!(m.global_deaths, None);
        assert_eq!(m.fatality_rate, None);
    }

    #[test]
    fn labels_group_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(775_866_783.0), "775,866,783");
        assert_eq!(format_count(1_234_567.6), "1,234,568");

        let m = SummaryMetrics {
            global_cases: Some(12_345.0),
            global_deaths: Some(7_057_132.0),
            fatality_rate: Some(1.0123),
        };
        assert_eq!(m.cases_label(), "12,345");
        assert_eq!(m.deaths_label(), "7,057,132");
        assert_eq!(m.fatality_label(), "1.01%");
    }

    #[test]
    fn negative_values_keep_the_sign_outside_the_groups() {
        assert_eq!(format_count(-123.0), "-123");
        assert_eq!(format_count(-1234.0), "-1,234");
        assert_eq!(format_count(-123_456.0), "-123,456");
        assert_eq!(format_grouped(-9876.543, 2), "-9,876.54");
    }
}
