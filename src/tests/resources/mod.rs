mod node_tests;
mod stats_tests;
