use vegalite_common::data::table::DataTable;
use vegalite_core::chart::{Chart, Properties};
use vegalite_core::spec::encoding::Encoding;

pub const ANSCOMBE: &str = "anscombe";

/// Anscombe's quartet: one small circle scatter plot per `Series`, side by side.
///
/// Neither axis is forced to include zero so each panel zooms to its points.
pub fn anscombe_chart(table: DataTable, width: f64, height: f64) -> Chart {
    Chart::new(table)
        .mark_circle()
        .encode(vec![
            Encoding::x("X").zero(false),
            Encoding::y("Y").zero(false),
            Encoding::column("Series"),
        ])
        .properties(Properties::new().width(width).height(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vegalite_core::chart::SerializeOpts;
    use vegalite_core::spec::encoding::Channel;
    use vegalite_core::spec::mark::MarkType;

    #[test]
    fn test_anscombe_chart() {
        let table = DataTable::from_json(&json!([
            {"Series": "I", "X": 10, "Y": 8.04},
            {"Series": "II", "X": 10, "Y": 9.14},
        ]))
        .unwrap();
        let chart = anscombe_chart(table, 150.0, 150.0);

        assert_eq!(chart.mark_type(), MarkType::Circle);
        let channels: Vec<_> = chart.encodings().iter().map(|enc| enc.channel()).collect();
        assert_eq!(channels, vec![Channel::X, Channel::Y, Channel::Column]);
        assert!(chart.missing_fields().is_empty());

        let value = chart.to_json(&SerializeOpts::default()).unwrap();
        assert_eq!(
            value["encoding"],
            json!({
                "x": {"field": "X", "type": "quantitative", "scale": {"zero": false}},
                "y": {"field": "Y", "type": "quantitative", "scale": {"zero": false}},
                "column": {"field": "Series", "type": "nominal"}
            })
        );
        assert_eq!(value["width"], json!(150));
        assert_eq!(value["height"], json!(150));
    }

    #[test]
    fn test_anscombe_chart_without_rows() {
        let chart = anscombe_chart(DataTable::empty(), 200.0, 100.0);
        let spec = chart.to_spec(&SerializeOpts::default()).unwrap();
        assert_eq!(spec.data_values(), Some(&json!([])));
        assert_eq!(spec.encoding.len(), 3);
        assert_eq!(spec.width, Some(200.0));
        assert_eq!(spec.height, Some(100.0));
    }
}
