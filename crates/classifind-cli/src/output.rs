//! Plain-text rendering of search results.

use classifind_catalog::CountryCount;
use classifind_core::ProductRecord;
use classifind_search::ReconciledResult;

const TITLE_WIDTH: usize = 48;

pub(crate) fn print_result(result: &ReconciledResult) {
    println!("{} ({} listings)", result.applied_label, result.items.len());
    println!("{:<12}{:<50}{:<20}LOCATION", "ID", "TITLE", "CATEGORY");
    for item in &result.items {
        println!("{}", format_row(item));
    }
}

pub(crate) fn print_countries(countries: &[CountryCount]) {
    if countries.is_empty() {
        println!("no countries with active listings");
        return;
    }
    println!("{:<9}LISTINGS", "COUNTRY");
    for row in countries {
        println!("{:<9}{}", row.country, row.total);
    }
}

fn format_row(item: &ProductRecord) -> String {
    let id = item
        .id
        .as_deref()
        .or(item.product_id.as_deref())
        .unwrap_or("-");
    let title = truncate(item.title.as_deref().unwrap_or("(untitled)"), TITLE_WIDTH);
    let category = item.category.as_deref().unwrap_or("-");
    let location = [&item.city, &item.state, &item.country]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{id:<12}{title:<50}{category:<20}{location}")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_shows_location_parts_present() {
        let item = ProductRecord::from_value(json!({
            "id": 7,
            "title": "Casa com quintal",
            "category": "Imóveis",
            "cidade": "Natal",
            "uf": "RN"
        }))
        .unwrap();
        let row = format_row(&item);
        assert!(row.starts_with("7 "));
        assert!(row.ends_with("Natal, RN"));
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        let title = "á".repeat(60);
        let shown = truncate(&title, TITLE_WIDTH);
        assert_eq!(shown.chars().count(), TITLE_WIDTH);
        assert!(shown.ends_with("..."));
    }
}
