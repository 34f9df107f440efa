use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Usable survey measurement attributed to a province or territory.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SurveyRecord {
    pub(crate) province_code: String,
    pub(crate) concentration: f64,
}

/// Parse survey rows, dropping rows without a province or a positive reading.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<SurveyRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<SurveyRow>() {
        let row = record?;
        let Some(province_code) = row.province else {
            continue;
        };
        let Some(concentration) = row.concentration.as_deref().and_then(parse_concentration)
        else {
            continue;
        };

        records.push(SurveyRecord {
            province_code,
            concentration,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct SurveyRow {
    #[serde(
        rename = "ProvinceTerritory",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    province: Option<String>,
    #[serde(
        rename = "AverageRadonConcentrationInBqPerM3",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    concentration: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Readings below the detection limit are reported as `<N`; keep `N`.
fn parse_concentration(value: &str) -> Option<f64> {
    let parsed = value.replace('<', "").trim().parse::<f64>().ok()?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_concentration_strips_detection_limit_marker() {
        assert_eq!(parse_concentration("<15"), Some(15.0));
        assert_eq!(parse_concentration(" 212.5 "), Some(212.5));
        assert_eq!(parse_concentration("0"), None);
        assert_eq!(parse_concentration("-4"), None);
        assert_eq!(parse_concentration("n/a"), None);
    }

    #[test]
    fn rows_without_province_or_reading_are_skipped() {
        let csv = "ResultNumber,ProvinceTerritory,AverageRadonConcentrationInBqPerM3\n\
1,AB,120\n\
2,,80\n\
3,BC,\n\
4,MB,<15\n";
        let records = parse_records(Cursor::new(csv)).expect("parse");
        assert_eq!(
            records,
            vec![
                SurveyRecord {
                    province_code: "AB".to_string(),
                    concentration: 120.0,
                },
                SurveyRecord {
                    province_code: "MB".to_string(),
                    concentration: 15.0,
                },
            ]
        );
    }
}
