mod test_utils;

mod fixed_size_test;
mod manipulator_test;
