#![no_main]

use libfuzzer_sys::fuzz_target;
use linkrank_core::loader::read_edges;
use linkrank_rank::sparse::adjacency::Adjacency;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic; anything it accepts must build.
    let Ok(list) = read_edges(data) else {
        return;
    };
    let adjacency = Adjacency::build(list).expect("loader output satisfies the builder contract");
    assert!(adjacency.forward().check_invariants().is_ok());
    assert!(adjacency.transpose().check_invariants().is_ok());
});
