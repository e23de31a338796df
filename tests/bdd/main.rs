// Cucumber suite for the catalog test-data generators

mod steps;

use cucumber::World;
use std::path::Path;
use steps::world::TestDataWorld;

#[tokio::main]
async fn main() {
    let features = Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    assert!(features.exists(), "Features directory not found: {:?}", features);

    TestDataWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit(features)
        .await;
}
