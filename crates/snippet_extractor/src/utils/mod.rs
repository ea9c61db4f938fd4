// crates/snippet_extractor/src/utils/mod.rs

pub mod dedent;
