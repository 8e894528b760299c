mod batch;
mod common;
mod engine;
mod panel;
