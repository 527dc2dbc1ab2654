use chrono::NaiveDate;
use serde::Serialize;

/// One normalized metric value pulled from a sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractedRecord {
    /// Category name, e.g. "Sales Price" or "EBIT LOSS"
    pub category: String,
    /// Row label taken verbatim (trimmed) from the sheet
    pub subcategory: String,
    /// Normalized metric label, e.g. "Quoted" or "Plex_Cost"
    pub metric: String,
    /// Always finite
    pub value: f64,
    /// Date found in the metric's header, serialized as YYYY-MM-DD
    pub date: Option<NaiveDate>,
    pub plant: Option<String>,
    pub part_name: Option<String>,
}

/// Sheet-wide details attached identically to every record of one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Enrichment {
    pub plant: Option<String>,
    pub part_name: Option<String>,
}

impl Enrichment {
    pub(crate) fn record(
        &self,
        category: &str,
        subcategory: &str,
        metric: &str,
        value: f64,
        date: Option<NaiveDate>,
    ) -> ExtractedRecord {
        ExtractedRecord {
            category: category.to_owned(),
            subcategory: subcategory.to_owned(),
            metric: metric.to_owned(),
            value,
            date,
            plant: self.plant.clone(),
            part_name: self.part_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_sheet_column_names() {
        let enrichment = Enrichment {
            plant: Some("Wellington".to_owned()),
            part_name: None,
        };
        let record = enrichment.record(
            "Sales Price",
            "Tooling A",
            "Quoted",
            12.5,
            NaiveDate::from_ymd_opt(2024, 3, 1),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Category": "Sales Price",
                "Subcategory": "Tooling A",
                "Metric": "Quoted",
                "Value": 12.5,
                "Date": "2024-03-01",
                "Plant": "Wellington",
                "PartName": null,
            })
        );
    }
}
