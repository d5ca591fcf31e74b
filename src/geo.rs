//! Approximate country centroids for placing map markers by ISO-3 code.
//!
//! `OWID_*` aggregates (continents, income groups, World) have no entry.

/// (ISO 3166-1 alpha-3, latitude, longitude)
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("ABW", 12.5, -69.97),
    ("AFG", 33.0, 65.0),
    ("AGO", -12.5, 18.5),
    ("AIA", 18.22, -63.05),
    ("ALB", 41.0, 20.0),
    ("AND", 42.5, 1.5),
    ("ARE", 24.0, 54.0),
    ("ARG", -34.0, -64.0),
    ("ARM", 40.0, 45.0),
    ("ASM", -14.33, -170.0),
    ("ATG", 17.05, -61.8),
    ("AUS", -25.0, 135.0),
    ("AUT", 47.33, 13.33),
    ("AZE", 40.5, 47.5),
    ("BDI", -3.5, 30.0),
    ("BEL", 50.83, 4.0),
    ("BEN", 9.5, 2.25),
    ("BES", 12.18, -68.25),
    ("BFA", 13.0, -2.0),
    ("BGD", 24.0, 90.0),
    ("BGR", 43.0, 25.0),
    ("BHR", 26.0, 50.55),
    ("BHS", 24.25, -76.0),
    ("BIH", 44.0, 18.0),
    ("BLR", 53.0, 28.0),
    ("BLZ", 17.25, -88.75),
    ("BMU", 32.33, -64.75),
    ("BOL", -17.0, -65.0),
    ("BRA", -10.0, -55.0),
    ("BRB", 13.17, -59.53),
    ("BRN", 4.5, 114.67),
    ("BTN", 27.5, 90.5),
    ("BWA", -22.0, 24.0),
    ("CAF", 7.0, 21.0),
    ("CAN", 60.0, -95.0),
    ("CHE", 47.0, 8.0),
    ("CHL", -30.0, -71.0),
    ("CHN", 35.0, 105.0),
    ("CIV", 8.0, -5.0),
    ("CMR", 6.0, 12.0),
    ("COD", 0.0, 25.0),
    ("COG", -1.0, 15.0),
    ("COK", -21.23, -159.77),
    ("COL", 4.0, -72.0),
    ("COM", -12.17, 44.25),
    ("CPV", 16.0, -24.0),
    ("CRI", 10.0, -84.0),
    ("CUB", 21.5, -80.0),
    ("CUW", 12.17, -69.0),
    ("CYM", 19.5, -80.5),
    ("CYP", 35.0, 33.0),
    ("CZE", 49.75, 15.5),
    ("DEU", 51.0, 9.0),
    ("DJI", 11.5, 43.0),
    ("DMA", 15.42, -61.33),
    ("DNK", 56.0, 10.0),
    ("DOM", 19.0, -70.67),
    ("DZA", 28.0, 3.0),
    ("ECU", -2.0, -77.5),
    ("EGY", 27.0, 30.0),
    ("ERI", 15.0, 39.0),
    ("ESP", 40.0, -4.0),
    ("EST", 59.0, 26.0),
    ("ETH", 8.0, 38.0),
    ("FIN", 64.0, 26.0),
    ("FJI", -18.0, 175.0),
    ("FLK", -51.75, -59.0),
    ("FRA", 46.0, 2.0),
    ("FRO", 62.0, -7.0),
    ("FSM", 6.92, 158.25),
    ("GAB", -1.0, 11.75),
    ("GBR", 54.0, -2.0),
    ("GEO", 42.0, 43.5),
    ("GGY", 49.47, -2.58),
    ("GHA", 8.0, -2.0),
    ("GIB", 36.13, -5.35),
    ("GIN", 11.0, -10.0),
    ("GMB", 13.47, -16.57),
    ("GNB", 12.0, -15.0),
    ("GNQ", 2.0, 10.0),
    ("GRC", 39.0, 22.0),
    ("GRD", 12.12, -61.67),
    ("GRL", 72.0, -40.0),
    ("GTM", 15.5, -90.25),
    ("GUM", 13.47, 144.78),
    ("GUY", 5.0, -59.0),
    ("HKG", 22.25, 114.17),
    ("HND", 15.0, -86.5),
    ("HRV", 45.17, 15.5),
    ("HTI", 19.0, -72.42),
    ("HUN", 47.0, 20.0),
    ("IDN", -5.0, 120.0),
    ("IMN", 54.23, -4.55),
    ("IND", 20.0, 77.0),
    ("IRL", 53.0, -8.0),
    ("IRN", 32.0, 53.0),
    ("IRQ", 33.0, 44.0),
    ("ISL", 65.0, -18.0),
    ("ISR", 31.5, 34.75),
    ("ITA", 42.83, 12.83),
    ("JAM", 18.25, -77.5),
    ("JEY", 49.21, -2.13),
    ("JOR", 31.0, 36.0),
    ("JPN", 36.0, 138.0),
    ("KAZ", 48.0, 68.0),
    ("KEN", 1.0, 38.0),
    ("KGZ", 41.0, 75.0),
    ("KHM", 13.0, 105.0),
    ("KIR", 1.42, 173.0),
    ("KNA", 17.33, -62.75),
    ("KOR", 37.0, 127.5),
    ("KWT", 29.34, 47.66),
    ("LAO", 18.0, 105.0),
    ("LBN", 33.83, 35.83),
    ("LBR", 6.5, -9.5),
    ("LBY", 25.0, 17.0),
    ("LCA", 13.88, -61.13),
    ("LIE", 47.17, 9.53),
    ("LKA", 7.0, 81.0),
    ("LSO", -29.5, 28.5),
    ("LTU", 56.0, 24.0),
    ("LUX", 49.75, 6.17),
    ("LVA", 57.0, 25.0),
    ("MAC", 22.17, 113.55),
    ("MAR", 32.0, -5.0),
    ("MCO", 43.73, 7.4),
    ("MDA", 47.0, 29.0),
    ("MDG", -20.0, 47.0),
    ("MDV", 3.25, 73.0),
    ("MEX", 23.0, -102.0),
    ("MHL", 9.0, 168.0),
    ("MKD", 41.83, 22.0),
    ("MLI", 17.0, -4.0),
    ("MLT", 35.83, 14.58),
    ("MMR", 22.0, 98.0),
    ("MNE", 42.5, 19.3),
    ("MNG", 46.0, 105.0),
    ("MNP", 15.2, 145.75),
    ("MOZ", -18.25, 35.0),
    ("MRT", 20.0, -12.0),
    ("MSR", 16.75, -62.2),
    ("MUS", -20.28, 57.55),
    ("MWI", -13.5, 34.0),
    ("MYS", 2.5, 112.5),
    ("NAM", -22.0, 17.0),
    ("NCL", -21.5, 165.5),
    ("NER", 16.0, 8.0),
    ("NGA", 10.0, 8.0),
    ("NIC", 13.0, -85.0),
    ("NIU", -19.03, -169.87),
    ("NLD", 52.5, 5.75),
    ("NOR", 62.0, 10.0),
    ("NPL", 28.0, 84.0),
    ("NRU", -0.53, 166.92),
    ("NZL", -41.0, 174.0),
    ("OMN", 21.0, 57.0),
    // Kosovo, as coded by OWID.
    ("OWID_KOS", 42.67, 21.17),
    ("PAK", 30.0, 70.0),
    ("PAN", 9.0, -80.0),
    ("PER", -10.0, -76.0),
    ("PHL", 13.0, 122.0),
    ("PLW", 7.5, 134.5),
    ("PNG", -6.0, 147.0),
    ("POL", 52.0, 20.0),
    ("PRI", 18.25, -66.5),
    ("PRK", 40.0, 127.0),
    ("PRT", 39.5, -8.0),
    ("PRY", -23.0, -58.0),
    ("PSE", 32.0, 35.25),
    ("PYF", -15.0, -140.0),
    ("QAT", 25.5, 51.25),
    ("ROU", 46.0, 25.0),
    ("RUS", 60.0, 100.0),
    ("RWA", -2.0, 30.0),
    ("SAU", 25.0, 45.0),
    ("SDN", 15.0, 30.0),
    ("SEN", 14.0, -14.0),
    ("SGP", 1.37, 103.8),
    ("SHN", -15.93, -5.7),
    ("SLB", -8.0, 159.0),
    ("SLE", 8.5, -11.5),
    ("SLV", 13.83, -88.92),
    ("SMR", 43.77, 12.42),
    ("SOM", 10.0, 49.0),
    ("SPM", 46.83, -56.33),
    ("SRB", 44.0, 21.0),
    ("SSD", 7.0, 30.0),
    ("STP", 1.0, 7.0),
    ("SUR", 4.0, -56.0),
    ("SVK", 48.67, 19.5),
    ("SVN", 46.12, 14.82),
    ("SWE", 62.0, 15.0),
    ("SWZ", -26.5, 31.5),
    ("SXM", 18.03, -63.05),
    ("SYC", -4.58, 55.67),
    ("SYR", 35.0, 38.0),
    ("TCA", 21.75, -71.58),
    ("TCD", 15.0, 19.0),
    ("TGO", 8.0, 1.17),
    ("THA", 15.0, 100.0),
    ("TJK", 39.0, 71.0),
    ("TKL", -9.0, -172.0),
    ("TKM", 40.0, 60.0),
    ("TLS", -8.55, 125.52),
    ("TON", -20.0, -175.0),
    ("TTO", 11.0, -61.0),
    ("TUN", 34.0, 9.0),
    ("TUR", 39.0, 35.0),
    ("TUV", -8.0, 178.0),
    ("TWN", 23.5, 121.0),
    ("TZA", -6.0, 35.0),
    ("UGA", 1.0, 32.0),
    ("UKR", 49.0, 32.0),
    ("URY", -33.0, -56.0),
    ("USA", 38.0, -97.0),
    ("UZB", 41.0, 64.0),
    ("VAT", 41.9, 12.45),
    ("VCT", 13.25, -61.2),
    ("VEN", 8.0, -66.0),
    ("VGB", 18.5, -64.5),
    ("VIR", 18.34, -64.93),
    ("VNM", 16.0, 106.0),
    ("VUT", -16.0, 167.0),
    ("WLF", -13.3, -176.2),
    ("WSM", -13.58, -172.33),
    ("YEM", 15.0, 48.0),
    ("ZAF", -29.0, 24.0),
    ("ZMB", -15.0, 30.0),
    ("ZWE", -20.0, 30.0),
];

/// `(longitude, latitude)` for an ISO-3 code, ready to use as plot `[x, y]`.
pub fn centroid(iso_code: &str) -> Option<[f64; 2]> {
    CENTROIDS
        .binary_search_by(|(code, _, _)| (*code).cmp(iso_code))
        .ok()
        .map(|i| {
            let (_, lat, lon) = CENTROIDS[i];
            [lon, lat]
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(CENTROIDS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn looks_up_countries_and_skips_aggregates() {
        assert_eq!(centroid("DEU"), Some([9.0, 51.0]));
        assert_eq!(centroid("OWID_KOS"), Some([21.17, 42.67]));
        assert_eq!(centroid("OWID_WRL"), None);
        assert_eq!(centroid(""), None);
    }

    #[test]
    fn coordinates_are_on_the_globe() {
        for (code, lat, lon) in CENTROIDS {
            assert!((-90.0..=90.0).contains(lat), "{code}");
            assert!((-180.0..=180.0).contains(lon), "{code}");
        }
    }
}
