use catalog_test_utils::data_generators::generate_test_variables_on;
use chrono::NaiveDate;
use cucumber::{then, when};

use crate::steps::world::TestDataWorld;

#[when(expr = "test variables are generated for round {int} on {word}")]
fn generate(world: &mut TestDataWorld, round: i64, day: String) {
    let day = NaiveDate::parse_from_str(&day, "%Y-%m-%d").expect("date as YYYY-MM-DD");
    world.variables = Some(generate_test_variables_on(day, round));
}

#[then(expr = "{word} should be {int}")]
fn variable_is(world: &mut TestDataWorld, name: String, expected: i64) {
    let variables = world.variables.as_ref().expect("no variables generated");
    assert_eq!(variables.get(&name), Some(expected), "variable {}", name);
}

#[then(expr = "{int} variables should be available")]
fn variable_count(world: &mut TestDataWorld, expected: usize) {
    let variables = world.variables.as_ref().expect("no variables generated");
    assert_eq!(variables.to_map().len(), expected);
}
