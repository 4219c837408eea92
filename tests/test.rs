use arith_engine::ast::Bindings;
use arith_engine::compress::compress;
use arith_engine::distribute::{distribute, distribute_left, distribute_right};
use arith_engine::eval::evaluate;
use arith_engine::parser::parse;
use rstest::*;

#[rstest]
#[case("1+2*3", 7.0)]
#[case("1*2+3", 5.0)]
#[case("2^3^2", 512.0)]
#[case("(2^3)^2", 64.0)]
#[case("(1+2)*3", 9.0)]
#[case("1 - 2 - 3", -4.0)]
#[case("-(2^2)", -4.0)]
#[case("3*-2", -6.0)]
#[case("cos(0)", 1.0)]
#[case("sin(0)", 0.0)]
#[case("exp(log(5))", 5.0)]
#[case("abs(3-5)*10", 20.0)]
#[case("pi", std::f64::consts::PI)]
#[case("2*pi", 2.0 * std::f64::consts::PI)]
fn evaluates(#[case] formula: &str, #[case] expected: f64) {
    let tree = parse(formula).expect("parsing should succeed");
    let value = evaluate(&tree, &Bindings::new()).expect("evaluation should succeed");
    assert!(
        (value - expected).abs() < 1e-12,
        "'{formula}' evaluated to {value}, expected {expected}"
    );
}

#[rstest]
#[case("1+2*3")]
#[case("(1+2)*3/4")]
#[case("2^3^2")]
#[case("cos(0)+sin(pi/2)")]
#[case("exp(1)-e")]
#[case("1/3+1/7")]
fn folded_trees_round_trip_through_infix(#[case] formula: &str) {
    let tree = parse(formula).expect("parsing should succeed");
    let folded = compress(&tree, &Bindings::new(), false);

    let rendered = folded.to_infix();
    let reparsed = parse(&rendered).expect("the rendered formula should parse");

    let direct = evaluate(&tree, &Bindings::new()).unwrap();
    let round_tripped = evaluate(&reparsed, &Bindings::new()).unwrap();
    assert!(
        (direct - round_tripped).abs() < 1e-9,
        "'{formula}' rendered as '{rendered}': {direct} != {round_tripped}"
    );
}

#[rstest]
fn expansion_preserves_values() {
    let tree = parse("(x+1)*(x-2)").expect("parsing should succeed");
    let expanded = distribute(&distribute(&tree, distribute_left), distribute_right);

    for x in 0..10 {
        let bindings = Bindings::from([("x".to_string(), x as f64)]);
        assert_eq!(
            evaluate(&tree, &bindings).unwrap(),
            evaluate(&expanded, &bindings).unwrap(),
            "at x = {x}"
        );
    }
}

#[rstest]
fn substitution_without_folding_keeps_structure() {
    let tree = parse("x*(y+1)").expect("parsing should succeed");
    let bindings = Bindings::from([("x".to_string(), 2.0), ("y".to_string(), 3.0)]);

    let substituted = compress(&tree, &bindings, true);
    assert_eq!(substituted.to_string(), "(* 2 (+ 3 1))");
    assert_eq!(evaluate(&substituted, &Bindings::new()).unwrap(), 8.0);
}
