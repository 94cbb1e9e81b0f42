mod harness;

mod datetime;
mod math;
mod sheet;
mod text;
