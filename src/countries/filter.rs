//! Region filtering over reduced country rows
//!
//! The full country list is too large for an LLM context window, so the
//! region resources reduce it to a sorted list of common names.

use crate::countries::types::RegionRow;

/// Common names of the countries whose region matches exactly, sorted
///
/// Rows with a missing name or region, or an empty common name, are dropped.
pub fn names_in_region(rows: &[RegionRow], region: &str) -> Vec<String> {
    let mut names: Vec<String> = rows
        .iter()
        .filter(|row| row.region.as_deref() == Some(region))
        .filter_map(|row| row.name.as_ref().map(|name| name.common.clone()))
        .filter(|name| !name.is_empty())
        .collect();

    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::types::CountryName;

    fn row(name: Option<&str>, region: Option<&str>) -> RegionRow {
        RegionRow {
            name: name.map(|common| CountryName {
                common: common.to_string(),
                official: String::new(),
            }),
            region: region.map(str::to_string),
        }
    }

    #[test]
    fn test_filter_and_project() {
        let rows = vec![
            row(Some("A"), Some("Europe")),
            row(Some("B"), Some("Asia")),
            row(Some("C"), Some("Europe")),
        ];

        assert_eq!(names_in_region(&rows, "Europe"), vec!["A", "C"]);
    }

    #[test]
    fn test_results_are_sorted() {
        let rows = vec![
            row(Some("Spain"), Some("Europe")),
            row(Some("France"), Some("Europe")),
            row(Some("Andorra"), Some("Europe")),
        ];

        assert_eq!(
            names_in_region(&rows, "Europe"),
            vec!["Andorra", "France", "Spain"]
        );
    }

    #[test]
    fn test_missing_and_empty_names_dropped() {
        let rows = vec![
            row(None, Some("Europe")),
            row(Some(""), Some("Europe")),
            row(Some("France"), Some("Europe")),
        ];

        assert_eq!(names_in_region(&rows, "Europe"), vec!["France"]);
    }

    #[test]
    fn test_region_match_is_exact() {
        let rows = vec![
            row(Some("France"), Some("Europe")),
            row(Some("Fiji"), Some("Oceania")),
            row(Some("Egypt"), Some("africa")),
        ];

        assert_eq!(names_in_region(&rows, "Africa"), Vec::<String>::new());
        assert_eq!(names_in_region(&rows, "Oceania"), vec!["Fiji"]);
    }
}
