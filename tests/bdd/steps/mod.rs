pub mod product_steps;
pub mod test_code_steps;
pub mod variables_steps;
pub mod world;
