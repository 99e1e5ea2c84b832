use rstest::rstest;
use serde_json::json;
use vegalite_core::chart::{dataset_name, Chart, Properties, SerializeOpts};
use vegalite_core::data::table::DataTable;
use vegalite_core::spec::chart::{default_schema, ChartSpec};
use vegalite_core::spec::encoding::{Channel, Encoding};
use vegalite_core::spec::mark::MarkType;
use vegalite_core::spec::scale::ScaleSpec;

fn xy_series_table() -> DataTable {
    DataTable::from_json(&json!([
        {"Series": "I", "X": 10, "Y": 8.04},
        {"Series": "I", "X": 8, "Y": 6.95},
        {"Series": "II", "X": 10, "Y": 9.14},
        {"Series": "III", "X": 10, "Y": 7.46},
        {"Series": "IV", "X": 8, "Y": 6.58},
    ]))
    .unwrap()
}

fn faceted_scatter(table: DataTable) -> Chart {
    Chart::new(table)
        .mark_circle()
        .encode(vec![
            Encoding::x("X").scale(ScaleSpec::new().zero(false)),
            Encoding::y("Y").scale(ScaleSpec::new().zero(false)),
            Encoding::column("Series"),
        ])
        .properties(Properties::new().width(150.0).height(150.0))
}

#[test]
fn test_faceted_scatter_scenario() {
    let chart = faceted_scatter(xy_series_table());

    assert_eq!(chart.mark_type(), MarkType::Circle);
    assert_eq!(chart.encodings().len(), 3);
    let bindings: Vec<_> = chart
        .encodings()
        .iter()
        .map(|enc| (enc.field().unwrap(), enc.channel()))
        .collect();
    assert_eq!(
        bindings,
        vec![
            ("X", Channel::X),
            ("Y", Channel::Y),
            ("Series", Channel::Column)
        ]
    );
    assert_eq!(chart.layout().width, Some(150.0));
    assert_eq!(chart.layout().height, Some(150.0));
    assert_eq!(chart.layout().title, None);
    assert_eq!(
        chart.encodings()[0].def.scale.as_ref().unwrap().zero,
        Some(false)
    );
    assert_eq!(chart.encodings()[2].def.scale, None);
}

#[test]
fn test_faceted_scatter_document() {
    let table = xy_series_table();
    let values = table.to_json().unwrap();
    let name = dataset_name(&values);

    let document = faceted_scatter(table)
        .to_json(&SerializeOpts::default())
        .unwrap();

    let mut expected = json!({
        "$schema": default_schema(),
        "config": {"view": {"width": 400, "height": 300}},
        "data": {"name": name},
        "mark": "circle",
        "encoding": {
            "x": {"field": "X", "type": "quantitative", "scale": {"zero": false}},
            "y": {"field": "Y", "type": "quantitative", "scale": {"zero": false}},
            "column": {"field": "Series", "type": "nominal"}
        },
        "width": 150,
        "height": 150,
        "datasets": {}
    });
    expected["datasets"][name.as_str()] = values;

    assert_eq!(document, expected);
}

#[test]
fn test_document_keeps_encoding_order() {
    let text = faceted_scatter(xy_series_table())
        .to_string_pretty(&SerializeOpts::default())
        .unwrap();
    let x = text.find("\"x\":").unwrap();
    let y = text.find("\"y\":").unwrap();
    let column = text.find("\"column\":").unwrap();
    assert!(x < y && y < column);
}

#[test]
fn test_building_twice_is_value_equal() {
    let first = faceted_scatter(xy_series_table());
    let second = faceted_scatter(xy_series_table());
    assert_eq!(first, second);

    let opts = SerializeOpts::default();
    assert_eq!(first.to_spec(&opts).unwrap(), second.to_spec(&opts).unwrap());
}

#[test]
fn test_empty_dataset_is_well_formed() {
    let chart = faceted_scatter(DataTable::empty());
    assert_eq!(chart.encodings().len(), 3);
    assert_eq!(chart.table().unwrap().num_rows(), 0);

    let spec = chart.to_spec(&SerializeOpts::default()).unwrap();
    assert_eq!(spec.data_values(), Some(&json!([])));
    assert_eq!(spec.encoding.len(), 3);
    assert_eq!(spec.width, Some(150.0));
}

#[rstest(
    channels,
    case(vec![Channel::X]),
    case(vec![Channel::Y, Channel::X]),
    case(vec![Channel::Column, Channel::Color, Channel::Y, Channel::X]),
    case(vec![Channel::Row, Channel::Column, Channel::Size, Channel::Tooltip, Channel::Shape])
)]
fn test_encodings_keep_length_and_order(channels: Vec<Channel>) {
    let fields = ["Series", "X", "Y"];
    let encodings: Vec<_> = channels
        .iter()
        .enumerate()
        .map(|(i, channel)| Encoding::new(*channel, fields[i % fields.len()]))
        .collect();

    let chart = Chart::new(xy_series_table()).encode(encodings.clone());
    assert_eq!(chart.encodings(), encodings.as_slice());

    let spec = chart.to_spec(&SerializeOpts::default()).unwrap();
    let spec_channels: Vec<_> = spec.encoding.iter().map(|enc| enc.channel).collect();
    assert_eq!(spec_channels, channels);
}

#[test]
fn test_document_round_trips_through_json() {
    let spec = faceted_scatter(xy_series_table())
        .to_spec(&SerializeOpts::default())
        .unwrap();
    let text = serde_json::to_string(&spec).unwrap();
    let parsed: ChartSpec = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, spec);
}

#[test]
fn test_missing_column_is_not_an_error() {
    let chart = Chart::new(xy_series_table())
        .mark_point()
        .encode(vec![Encoding::x("Missing")]);
    assert_eq!(chart.missing_fields(), vec!["Missing".to_string()]);
    assert!(chart.to_spec(&SerializeOpts::default()).is_ok());
}
