mod common;
mod evaluation;
mod seed;
