use plotedit_common::types::{AxisKey, ScaleKind};
use plotedit_model::artist::{Axes, NO_LEGEND_LABEL};
use plotedit_model::colormap::{Colormap, ColormapRegistry};
use plotedit_model::converter::{same_converter, DateConverter, NumberConverter, UnitConverter};
use plotedit_model::error::ModelError;
use plotedit_model::memory::{MemoryAxes, MemoryLine, MemoryMappable};
use rstest::rstest;
use std::sync::Arc;

#[test]
fn test_navigation_checkpoint_records_every_axis() {
    let mut axes = MemoryAxes::with_axes(&[AxisKey::X, AxisKey::Y, AxisKey::Z])
        .with_axis(AxisKey::Z, |axis| axis.with_limits(-1.0, 1.0));
    axes.push_navigation_checkpoint();
    axes.axis_mut(AxisKey::X).unwrap().set_limits(2.0, 3.0).unwrap();
    axes.push_navigation_checkpoint();

    assert_eq!(axes.history.len(), 2);
    assert_eq!(
        axes.history[0],
        vec![
            (AxisKey::X, (0.0, 1.0)),
            (AxisKey::Y, (0.0, 1.0)),
            (AxisKey::Z, (-1.0, 1.0)),
        ]
    );
    assert_eq!(axes.history[1][0], (AxisKey::X, (2.0, 3.0)));
}

#[rstest]
#[case(ScaleKind::Linear, -5.0, 5.0, true)]
#[case(ScaleKind::Symlog, -5.0, 5.0, true)]
#[case(ScaleKind::Log, 0.0, 5.0, false)]
#[case(ScaleKind::Log, 0.5, 5.0, true)]
#[case(ScaleKind::Logit, 0.2, 0.8, true)]
#[case(ScaleKind::Logit, 0.2, 1.0, false)]
#[case(ScaleKind::Linear, f64::NAN, 1.0, false)]
fn test_limits_validated_against_scale(
    #[case] scale: ScaleKind,
    #[case] min: f64,
    #[case] max: f64,
    #[case] accepted: bool,
) {
    let mut axes = MemoryAxes::new().with_axis(AxisKey::Y, |axis| axis.with_scale(scale));
    let result = axes.axis_mut(AxisKey::Y).unwrap().set_limits(min, max);
    assert_eq!(result.is_ok(), accepted);
    if let Err(err) = result {
        assert!(matches!(err, ModelError::InvalidLimits { .. }));
    }
}

#[test]
fn test_artist_lookup_by_id() {
    let registry = ColormapRegistry::builtin();
    let mut axes = MemoryAxes::new();
    let line = axes.add_line(MemoryLine::new("a"));
    let image = axes.add_image(MemoryMappable::image(
        "img",
        vec![0.0],
        registry.get("gray").unwrap(),
    ));

    axes.line_mut(line).unwrap().set_label("renamed");
    axes.mappable_mut(image).unwrap().set_clim(-1.0, 1.0);

    assert_eq!(axes.line(line).unwrap().label, "renamed");
    assert_eq!(axes.mappable(image).unwrap().clim, (-1.0, 1.0));
    assert!(axes.line_mut(image).is_none());
    assert!(axes.mappable_mut(line).is_none());
}

#[test]
fn test_legend_entries_follow_labels() {
    let registry = ColormapRegistry::builtin();
    let mut axes = MemoryAxes::new();
    axes.add_line(MemoryLine::new("a"));
    axes.add_line(MemoryLine::new("_hidden"));
    axes.add_line(MemoryLine::new(NO_LEGEND_LABEL));
    axes.add_collection(MemoryMappable::collection(
        "points",
        vec![0.0],
        registry.get("gray").unwrap(),
    ));
    axes.add_image(MemoryMappable::image(
        "img",
        vec![0.0],
        registry.get("gray").unwrap(),
    ));

    let legend = axes.create_legend(3).unwrap();
    legend.set_draggable(true);

    let legend = axes.legend.unwrap();
    assert_eq!(legend.entries, vec!["a", "points"]);
    assert_eq!(legend.ncols, 3);
    assert!(legend.draggable);
}

#[test]
fn test_converters_compare_by_identity() {
    let date: Arc<dyn UnitConverter> = Arc::new(DateConverter);
    let other_date: Arc<dyn UnitConverter> = Arc::new(DateConverter);
    let number: Arc<dyn UnitConverter> = Arc::new(NumberConverter);

    assert!(same_converter(&Some(date.clone()), &Some(date.clone())));
    assert!(!same_converter(&Some(date.clone()), &Some(other_date)));
    assert!(!same_converter(&Some(date), &None));
    assert!(same_converter(&None, &None));
    assert!(!number.is_date());
}

#[test]
fn test_registry_replaces_same_name() {
    let mut registry = ColormapRegistry::builtin();
    let count = registry.len();
    let custom = registry.register(Colormap::from_rgb_stops("gray", &[0x101010, 0xf0f0f0]));
    assert_eq!(registry.len(), count);
    assert_eq!(registry.get("gray").unwrap(), custom);
}
