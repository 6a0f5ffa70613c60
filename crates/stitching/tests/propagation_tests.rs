use ntest::assert_false;
use pretty_assertions::assert_eq;
use stitching::utils_for_tests::*;
use stitching::*;
use utility::*;

fn id(name: &str) -> ImageId {
    ImageId::from(name)
}

#[test]
fn test_chain_composes_consecutively() {
    let mut graph = set_up_chain_graph(&["A", "B", "C", "D"], 1, 50.0);
    let report = graph.propagate(&id("A"), Orientation::identity()).unwrap();

    let a = report.orientation_of(&id("A")).unwrap();
    let b = compose_orientation(&a, &set_up_chain_relative(0));
    let c = compose_orientation(&b, &set_up_chain_relative(1));
    let d = compose_orientation(&c, &set_up_chain_relative(2));
    assert!(orientations_approx_eq(&report.orientation_of(&id("B")).unwrap(), &b, 1e-12));
    assert!(orientations_approx_eq(&report.orientation_of(&id("C")).unwrap(), &c, 1e-12));
    assert!(orientations_approx_eq(&report.orientation_of(&id("D")).unwrap(), &d, 1e-12));

    let direct = set_up_chain_relative(2)
        .then(&set_up_chain_relative(1))
        .then(&set_up_chain_relative(0))
        .then(&a);
    assert!(orientations_approx_eq(&report.orientation_of(&id("D")).unwrap(), &direct, 1e-12));

    let order: Vec<_> = report
        .steps()
        .iter()
        .map(|step| format!("{} --> {}", step.source, step.target))
        .collect();
    assert_eq!(order, vec!["A --> B", "B --> C", "C --> D"]);
}

#[test]
fn test_propagating_from_the_middle_inverts_reverse_edges() {
    let mut graph = set_up_chain_graph(&["A", "B", "C"], 1, 50.0);
    let seed = Orientation::around_x(Angle::degrees(25.0));
    let report = graph.propagate(&id("B"), seed).unwrap();

    let a = report.orientation_of(&id("A")).unwrap();
    let c = report.orientation_of(&id("C")).unwrap();
    // A was reached against the direction its mapping was measured in
    assert!(orientations_approx_eq(
        &a,
        &compose_orientation(&seed, &set_up_chain_relative(0).inverse()),
        1e-12
    ));
    let back_to_b = compose_orientation(&a, &set_up_chain_relative(0));
    assert!(orientations_approx_eq(&back_to_b, &seed, 1e-12));
    let expected_c = compose_orientation(&seed, &set_up_chain_relative(1));
    assert!(orientations_approx_eq(&c, &expected_c, 1e-12));
}

#[test]
fn test_low_confidence_edge_leaves_node_unoriented() {
    let mut graph = set_up_chain_graph(&["A", "B"], 1, 50.0);
    graph.add_mapping("B", "C", set_up_record(0, 10.0, Angle::degrees(30.0)));
    let report = graph.propagate(&id("A"), Orientation::identity()).unwrap();

    assert!(report.orientation_of(&id("B")).is_some());
    assert_eq!(report.orientations()[&id("C")], NodeOrientation::Unoriented);
    assert_eq!(report.unoriented(), vec![&id("C")]);
    assert_false!(graph.image(&id("C")).unwrap().is_oriented());
    assert_eq!(report.rejected().len(), 1);
    assert_eq!(report.rejected()[0].source, id("B"));
}

#[test]
fn test_low_confidence_edge_can_be_bypassed() {
    let mut graph = MappingGraph::default();
    graph.add_mapping("A", "B", set_up_record(0, 10.0, Angle::degrees(80.0)));
    graph.add_mapping("A", "C", set_up_record(1, 50.0, Angle::degrees(10.0)));
    graph.add_mapping("C", "B", set_up_record(1, 50.0, Angle::degrees(20.0)));
    let report = graph.propagate(&id("A"), Orientation::identity()).unwrap();

    let c = report.orientation_of(&id("C")).unwrap();
    let expected_b = compose_orientation(&c, &set_up_relative(Angle::degrees(20.0)));
    assert!(orientations_approx_eq(&report.orientation_of(&id("B")).unwrap(), &expected_b, 1e-12));
    assert_eq!(report.num_oriented(), 3);
}

#[test]
fn test_first_path_wins_regardless_of_insertion_order() {
    let links = [
        ("A", "B", 10.0),
        ("A", "C", 20.0),
        ("B", "D", 30.0),
        ("C", "D", 70.0),
    ];
    let build = |reversed: bool| {
        let mut graph = MappingGraph::default();
        let mut ordered = links.to_vec();
        if reversed {
            ordered.reverse();
        }
        for (from, to, degrees) in ordered {
            graph.add_mapping(from, to, set_up_record(1, 50.0, Angle::degrees(degrees)));
        }
        graph
    };

    let mut forward = build(false);
    let mut backward = build(true);
    let first = forward.propagate(&id("A"), Orientation::identity()).unwrap();
    let second = backward.propagate(&id("A"), Orientation::identity()).unwrap();
    assert_eq!(first.orientations(), second.orientations());
    assert_eq!(first.steps(), second.steps());

    // D is reached from B before C, since B sorts first
    let b = first.orientation_of(&id("B")).unwrap();
    let expected_d = compose_orientation(&b, &set_up_relative(Angle::degrees(30.0)));
    assert!(orientations_approx_eq(&first.orientation_of(&id("D")).unwrap(), &expected_d, 1e-12));
}

#[test]
fn test_unconnected_image_is_reported_unoriented() {
    let mut graph = set_up_chain_graph(&["A", "B"], 1, 50.0);
    graph.add_image(ImageData::new("lonely", LensProjection::default()));
    let report = graph.propagate(&id("A"), Orientation::identity()).unwrap();
    assert_eq!(report.orientations().len(), 3);
    assert_eq!(report.unoriented(), vec![&id("lonely")]);
}

#[test]
fn test_options_change_rejection_threshold() {
    let json = r#"{ "propagation": { "min_first_iteration_score": 5.0 } }"#;
    let options = StitchOptions::from_json_str(json).unwrap();
    let mut graph = MappingGraph::new(options);
    graph.add_mapping("A", "B", set_up_record(0, 10.0, Angle::degrees(30.0)));
    let report = graph.propagate(&id("A"), Orientation::identity()).unwrap();
    assert!(report.orientation_of(&id("B")).is_some());
}
