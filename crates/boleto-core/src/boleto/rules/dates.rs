//! Date normalization and due-date selection.

use chrono::NaiveDate;
use tracing::trace;

use super::FieldExtractor;
use super::patterns::DATE_ANY;

/// Canonical date layout.
pub const CANONICAL_DATE_FORMAT: &str = "%d/%m/%Y";

/// Finds dates in free text and rewrites them as `dd/mm/yyyy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer;

impl DateNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Lazily yield every recognized date in order of appearance.
    ///
    /// `dd/mm/yyyy` is passed through untouched. `dd mmm yy` is rewritten
    /// with the month number and a `20` century prefix; occurrences whose
    /// month abbreviation is unknown are skipped. Duplicates are kept.
    pub fn normalize<'t>(&self, text: &'t str) -> impl Iterator<Item = String> + use<'t> {
        DATE_ANY.captures_iter(text).filter_map(|caps| {
            if let Some(literal) = caps.get(1) {
                return Some(literal.as_str().to_string());
            }

            let day = &caps[2];
            let abbrev = &caps[3];
            let year = &caps[4];

            match portuguese_month_to_number(abbrev) {
                Some(month) => Some(format!("{}/{}/20{}", day, month, year)),
                None => {
                    trace!("Skipping date with unknown month '{}'", abbrev);
                    None
                }
            }
        })
    }
}

/// Normalize every date in `text`.
pub fn normalize_dates(text: &str) -> impl Iterator<Item = String> + '_ {
    DateNormalizer::new().normalize(text)
}

/// Parse a canonical `dd/mm/yyyy` date.
pub fn parse_canonical_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, CANONICAL_DATE_FORMAT).ok()
}

/// Pick the chronologically latest date; strings that are not real calendar
/// dates are ignored.
pub fn latest_date<I>(dates: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    dates
        .into_iter()
        .filter_map(|date| parse_canonical_date(&date).map(|parsed| (parsed, date)))
        .max_by_key(|(parsed, _)| *parsed)
        .map(|(_, date)| date)
}

/// Due date extractor: the latest date printed on the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DueDateExtractor {
    normalizer: DateNormalizer,
}

impl DueDateExtractor {
    pub const fn new() -> Self {
        Self {
            normalizer: DateNormalizer,
        }
    }
}

impl FieldExtractor for DueDateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        latest_date(self.normalizer.normalize(text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.normalizer.normalize(text).collect()
    }
}

fn portuguese_month_to_number(abbrev: &str) -> Option<&'static str> {
    match abbrev.to_lowercase().as_str() {
        "jan" => Some("01"),
        "fev" => Some("02"),
        "mar" => Some("03"),
        "abr" => Some("04"),
        "mai" => Some("05"),
        "jun" => Some("06"),
        "jul" => Some("07"),
        "ago" => Some("08"),
        "set" => Some("09"),
        "out" => Some("10"),
        "nov" => Some("11"),
        "dez" => Some("12"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slash_date_passes_through() {
        let dates: Vec<_> = normalize_dates("Emitido em 07/11/2023.").collect();
        assert_eq!(dates, vec!["07/11/2023"]);
    }

    #[test]
    fn test_abbreviated_month() {
        let dates: Vec<_> = normalize_dates("Vencimento 05 mar 24").collect();
        assert_eq!(dates, vec!["05/03/2024"]);

        let dates: Vec<_> = normalize_dates("Leitura 18 DEZ 23").collect();
        assert_eq!(dates, vec!["18/12/2023"]);
    }

    #[test]
    fn test_unknown_month_is_dropped() {
        let dates: Vec<_> = normalize_dates("05 xyz 24 e 10/10/2024").collect();
        assert_eq!(dates, vec!["10/10/2024"]);
    }

    #[test]
    fn test_order_and_duplicates_kept() {
        let text = "01/02/2024 05 jan 24 01/02/2024";
        let dates: Vec<_> = normalize_dates(text).collect();
        assert_eq!(dates, vec!["01/02/2024", "05/01/2024", "01/02/2024"]);
    }

    #[test]
    fn test_latest_date_is_chronological() {
        let text = "01/01/2024 15/06/2024 03/02/2024";
        assert_eq!(DueDateExtractor::new().extract(text), Some("15/06/2024".to_string()));

        // Lexically "31/01/2024" sorts after "01/12/2024", chronologically it does not.
        let text = "31/01/2024 01/12/2024";
        assert_eq!(DueDateExtractor::new().extract(text), Some("01/12/2024".to_string()));
    }

    #[test]
    fn test_latest_date_mixed_formats() {
        let text = "Emissão 20/02/2024\nVencimento 05 mar 24";
        assert_eq!(DueDateExtractor::new().extract(text), Some("05/03/2024".to_string()));
    }

    #[test]
    fn test_invalid_calendar_dates_ignored() {
        assert_eq!(
            latest_date(vec!["31/02/2024".to_string(), "10/01/2024".to_string()]),
            Some("10/01/2024".to_string())
        );
        assert_eq!(latest_date(vec!["99/99/9999".to_string()]), None);
    }

    #[test]
    fn test_sequence_outlives_normalizer() {
        let dates = {
            let normalizer = DateNormalizer::new();
            normalizer.normalize("05 MAR 24 10 abr 2024 x 31 dez 99")
        };
        assert_eq!(
            dates.collect::<Vec<_>>(),
            vec!["05/03/2024", "10/04/2020", "31/12/2099"]
        );
    }

    #[test]
    fn test_latest_date_tie() {
        let text = "31/12/2023 01/01/2024 01/01/2024";
        assert_eq!(DueDateExtractor::new().extract(text), Some("01/01/2024".to_string()));
    }

    #[test]
    fn test_no_dates() {
        let extractor = DueDateExtractor::new();
        assert_eq!(extractor.extract("sem datas aqui"), None);
        assert!(extractor.extract_all("sem datas aqui").is_empty());
    }
}
