use crate::color::{series_colors, Rgb};
use crate::data::rank::EntitySummary;

/// One named series of metric totals, shared by the radar and grouped-bar charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub color: Rgb,
    /// Axis labels, one per metric.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One series per summary, coloured in selection order.
pub fn comparison_series(summaries: &[&EntitySummary]) -> Vec<ChartSeries> {
    summaries
        .iter()
        .zip(series_colors(summaries.len()))
        .map(|(summary, color)| ChartSeries {
            name: summary.entity.to_string(),
            color,
            labels: summary.totals.iter().map(|t| t.metric.clone()).collect(),
            values: summary.values(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rank::MetricTotal;

    fn summary(name: &str, goals: f64) -> EntitySummary {
        EntitySummary {
            entity: name.into(),
            rows: 1,
            totals: vec![MetricTotal {
                metric: "Goles".to_string(),
                total: goals,
            }],
        }
    }

    #[test]
    fn series_follow_selection_order() {
        let a = summary("Ana", 4.0);
        let b = summary("Bea", 9.0);
        let series = comparison_series(&[&a, &b]);
        assert_eq!(series[0].name, "Ana");
        assert_eq!(series[0].color, Rgb::DARK_BLUE);
        assert_eq!(series[1].color, Rgb::ORANGE);
        assert_eq!(series[1].labels, vec!["Goles"]);
        assert_eq!(series[1].values, vec![9.0]);
    }
}
