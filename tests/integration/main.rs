mod cli_test;
mod property_test;
mod scenario_test;
