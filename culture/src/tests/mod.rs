mod common;
mod request_flow_test;
