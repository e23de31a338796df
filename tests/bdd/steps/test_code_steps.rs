use cucumber::{given, then, when};

use crate::steps::world::TestDataWorld;

#[given(expr = "the test code is {string}")]
fn given_test_code(world: &mut TestDataWorld, code: String) {
    set_test_code(world, code);
}

#[when(expr = "the test code is set to {string}")]
fn set_test_code(world: &mut TestDataWorld, code: String) {
    match code.parse() {
        Ok(parsed) => {
            world.test_code = parsed;
            world.last_error = None;
        }
        Err(e) => world.last_error = Some(e),
    }
}

#[then(expr = "the derived test code should be {string}")]
fn derived_code(world: &mut TestDataWorld, expected: String) {
    assert_eq!(world.test_code.as_str(), expected);
}

#[then(expr = "the test code should be rejected naming the {word}")]
fn rejected(world: &mut TestDataWorld, part: String) {
    let error = world.last_error.as_ref().expect("the test code was accepted");
    let message = error.to_string();
    assert!(
        message.contains(&part),
        "error {:?} does not mention {}",
        message,
        part
    );
}
