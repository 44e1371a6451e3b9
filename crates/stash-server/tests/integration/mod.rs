mod bookmark_tests;
mod flow_tests;
