use super::parser::SurveyRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Summary of survey readings for a single province or territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceStats {
    pub name: String,
    pub code: String,
    pub average: u32,
    pub median: u32,
    pub count: usize,
    pub min: u32,
    pub max: u32,
}

/// Full name for a two-letter province or territory code.
pub fn province_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "NL" => "Newfoundland and Labrador",
        "PE" => "Prince Edward Island",
        "NS" => "Nova Scotia",
        "NB" => "New Brunswick",
        "QC" => "Quebec",
        "ON" => "Ontario",
        "MB" => "Manitoba",
        "SK" => "Saskatchewan",
        "AB" => "Alberta",
        "BC" => "British Columbia",
        "YT" => "Yukon",
        "NT" => "Northwest Territories",
        "NU" => "Nunavut",
        _ => return None,
    };
    Some(name)
}

/// Group readings by province and summarize, highest average first.
pub(crate) fn province_stats(records: &[SurveyRecord]) -> Vec<ProvinceStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<f64>> = HashMap::new();

    for record in records {
        let code = record.province_code.as_str();
        grouped
            .entry(code)
            .or_insert_with(|| {
                order.push(code);
                Vec::new()
            })
            .push(record.concentration);
    }

    let mut stats: Vec<ProvinceStats> = order
        .into_iter()
        .filter_map(|code| {
            let readings = grouped.remove(code)?;
            summarize(code, readings)
        })
        .collect();

    stats.sort_by(|a, b| b.average.cmp(&a.average));
    stats
}

fn summarize(code: &str, mut readings: Vec<f64>) -> Option<ProvinceStats> {
    readings.sort_by(f64::total_cmp);
    let count = readings.len();
    let min = *readings.first()?;
    let max = *readings.last()?;

    let sum: f64 = readings.iter().sum();
    let median = if count % 2 == 0 {
        (readings[count / 2 - 1] + readings[count / 2]) / 2.0
    } else {
        readings[count / 2]
    };

    Some(ProvinceStats {
        name: province_name(code).unwrap_or(code).to_string(),
        code: code.to_string(),
        average: whole(sum / count as f64),
        median: whole(median),
        count,
        min: whole(min),
        max: whole(max),
    })
}

fn whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
