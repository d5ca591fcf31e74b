//! Writes `sample_covid_data.csv`, a synthetic dataset shaped like
//! `owid-covid-data.csv`, for running the dashboard offline:
//!
//! ```toml
//! # dashboard.toml
//! dataset_url = "file://sample_covid_data.csv"
//! ```

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Logistic curve: cumulative count after `day` days.
fn logistic(day: f64, capacity: f64, rate: f64, midpoint: f64) -> f64 {
    capacity / (1.0 + (-rate * (day - midpoint)).exp())
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Country {
    iso_code: &'static str,
    continent: &'static str,
    location: &'static str,
    population: i64,
    /// Share of the population eventually infected.
    attack_rate: f64,
    fatality: f64,
    /// Day of the first reported case.
    onset: i64,
}

const COUNTRIES: &[Country] = &[
    Country { iso_code: "ARG", continent: "South America", location: "Argentina", population: 45_510_324, attack_rate: 0.22, fatality: 0.013, onset: 62 },
    Country { iso_code: "AUS", continent: "Oceania", location: "Australia", population: 26_177_410, attack_rate: 0.40, fatality: 0.0018, onset: 24 },
    Country { iso_code: "BRA", continent: "South America", location: "Brazil", population: 215_313_504, attack_rate: 0.17, fatality: 0.019, onset: 56 },
    Country { iso_code: "DEU", continent: "Europe", location: "Germany", population: 83_369_840, attack_rate: 0.45, fatality: 0.0045, onset: 27 },
    Country { iso_code: "IND", continent: "Asia", location: "India", population: 1_417_173_120, attack_rate: 0.03, fatality: 0.012, onset: 29 },
    Country { iso_code: "JPN", continent: "Asia", location: "Japan", population: 123_951_696, attack_rate: 0.27, fatality: 0.0022, onset: 15 },
    Country { iso_code: "KEN", continent: "Africa", location: "Kenya", population: 54_027_484, attack_rate: 0.006, fatality: 0.017, onset: 72 },
    Country { iso_code: "USA", continent: "North America", location: "United States", population: 333_287_552, attack_rate: 0.31, fatality: 0.011, onset: 21 },
];

/// One output line; field order is the CSV column order.
#[derive(Serialize)]
struct Record<'a> {
    iso_code: &'a str,
    continent: &'a str,
    location: &'a str,
    date: NaiveDate,
    total_cases: Option<f64>,
    new_cases: Option<f64>,
    total_deaths: Option<f64>,
    new_deaths: Option<f64>,
    population: i64,
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start date");
    let days = 3 * 365;

    let output_path = "sample_covid_data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut world_cases = vec![0.0f64; days as usize];
    let mut world_deaths = vec![0.0f64; days as usize];
    let mut rows = 0usize;

    for country in COUNTRIES {
        let capacity = country.population as f64 * country.attack_rate;
        let rate = 0.012 + rng.next_f64() * 0.01;
        let midpoint = 400.0 + rng.next_f64() * 300.0;

        let mut prev_cases = 0.0;
        let mut prev_deaths: Option<f64> = None;

        for day in 0..days {
            let mut record = Record {
                iso_code: country.iso_code,
                continent: country.continent,
                location: country.location,
                date: start + Duration::days(day),
                total_cases: None,
                new_cases: None,
                total_deaths: None,
                new_deaths: None,
                population: country.population,
            };

            // Before the first case OWID leaves total_cases empty.
            if day < country.onset {
                writer.serialize(&record)?;
                continue;
            }

            let modelled = logistic(day as f64, capacity, rate, midpoint).round();
            let cases = modelled.max(prev_cases + 1.0);
            // Deaths are reported with a lag and start as missing.
            let deaths = (day >= country.onset + 14)
                .then(|| (cases * country.fatality).round().max(prev_deaths.unwrap_or(0.0)));

            let idx = day as usize;
            world_cases[idx] += cases;
            world_deaths[idx] += deaths.unwrap_or(0.0);

            record.total_cases = Some(cases);
            record.new_cases = Some(cases - prev_cases);
            record.total_deaths = deaths;
            record.new_deaths = deaths.map(|d| d - prev_deaths.unwrap_or(0.0));
            writer.serialize(&record)?;

            prev_cases = cases;
            prev_deaths = deaths;
            rows += 1;
        }
    }

    // World aggregate, as OWID publishes alongside the countries.
    let world_population: i64 = COUNTRIES.iter().map(|c| c.population).sum();
    for (idx, (&cases, &deaths)) in world_cases.iter().zip(&world_deaths).enumerate() {
        if cases == 0.0 {
            continue;
        }
        writer.serialize(Record {
            iso_code: "OWID_WRL",
            continent: "",
            location: "World",
            date: start + Duration::days(idx as i64),
            total_cases: Some(cases),
            new_cases: None,
            total_deaths: Some(deaths),
            new_deaths: None,
            population: world_population,
        })?;
        rows += 1;
    }

    writer.flush()?;
    println!(
        "Wrote {rows} observations for {} locations to {output_path}",
        COUNTRIES.len() + 1
    );
    Ok(())
}
