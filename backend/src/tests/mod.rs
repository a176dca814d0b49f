mod common;

mod edge_router_test;
mod locale_store_test;
