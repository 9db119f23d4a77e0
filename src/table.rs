use crate::badges::BadgeIndex;
use crate::config::ColumnNames;
use crate::data::model::Dataset;

pub const BADGE_HEADER: &str = "Escudo";

/// A dataset flattened to display strings, with a leading badge column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Badge first, then the preferred columns that exist, then the rest in
    /// source order. Teams without a badge get an empty badge cell.
    pub fn build(dataset: &Dataset, columns: &ColumnNames, badges: &BadgeIndex) -> Self {
        let mut order: Vec<&str> = columns
            .preferred_order()
            .into_iter()
            .filter(|c| dataset.has_column(c))
            .collect();
        for col in &dataset.column_names {
            if !order.contains(&col.as_str()) {
                order.push(col);
            }
        }

        let mut headers = Vec::with_capacity(order.len() + 1);
        headers.push(BADGE_HEADER.to_string());
        headers.extend(order.iter().map(|c| c.to_string()));

        let rows = dataset
            .records
            .iter()
            .map(|rec| {
                let badge = badges.url_for(rec.get(&columns.team)).unwrap_or_default();
                std::iter::once(badge.to_string())
                    .chain(order.iter().map(|c| rec.get(c).to_string()))
                    .collect::<Vec<String>>()
            })
            .collect();

        TableView { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn preferred_columns_lead_and_extras_follow() {
        let ds = Dataset::new(
            vec!["Posicion".into(), "Goles".into(), "Equipo".into(), "Nombre".into()],
            vec![Record::new()
                .with("Posicion", "DC")
                .with("Goles", 4i64)
                .with("Equipo", "X")
                .with("Nombre", "Ana")],
        );
        let badge_table = Dataset::from_records(vec![Record::new()
            .with("Equipo", "X")
            .with("url_escudo", "x.png")]);
        let badges = BadgeIndex::from_dataset(&badge_table, "Equipo", "url_escudo").unwrap();

        let table = TableView::build(&ds, &ColumnNames::default(), &badges);
        assert_eq!(table.headers, vec!["Escudo", "Nombre", "Equipo", "Goles", "Posicion"]);
        assert_eq!(table.rows[0], vec!["x.png", "Ana", "X", "4", "DC"]);
    }

    #[test]
    fn missing_badge_renders_blank() {
        let ds =
            Dataset::from_records(vec![Record::new().with("Nombre", "Ana").with("Equipo", "Y")]);
        let table = TableView::build(&ds, &ColumnNames::default(), &BadgeIndex::default());
        assert_eq!(table.rows[0][0], "");
    }
}
