//! Fill buffers under each execution policy and report timings.
//!
//! Run with `RUST_LOG=debug` to see chunk plans and sampled costs.

use fastDispatch::prelude::*;
use std::time::Instant;

fn main() -> Result<(), DispatchError> {
    env_logger::init();

    let counter = CycleCounter::detect();
    println!("cycle counter: {:?}", counter.source());

    let dispatcher = Dispatch::new().workers(4).build()?;
    let len = 1_000_000;

    // Sequenced: the calling thread, in order.
    let mut values = vec![0u64; len];
    let started = Instant::now();
    let mut next = 0u64;
    dispatcher.generate(Sequenced, &mut values, || {
        next += 1;
        next
    })?;
    println!("{:<14} {:>10?}", Sequenced::KIND, started.elapsed());

    // Parallel: chunks on the pool, caller blocks.
    let started = Instant::now();
    dispatcher.generate(Parallel, &mut values, || 3)?;
    println!("{:<14} {:>10?}", Parallel::KIND, started.elapsed());

    // Task policies: the caller continues and collects the buffer later.
    let started = Instant::now();
    let sequenced = dispatcher.generate(SequencedTask, vec![0u64; len], || 5);
    let parallel = dispatcher.generate(ParallelTask, vec![0u64; len], || 7);
    let (a, b) = (sequenced.wait()?, parallel.wait()?);
    println!(
        "{:<14} {:>10?} (sums {} and {})",
        "both tasks",
        started.elapsed(),
        a.range.iter().sum::<u64>(),
        b.range.iter().sum::<u64>()
    );

    // A failing operation stops at the first failing position.
    let mut budget = 10;
    let outcome = dispatcher.try_generate(Sequenced, &mut values, || {
        budget -= 1;
        if budget < 0 { Err("budget exhausted") } else { Ok(1) }
    });
    if let Err(err) = outcome {
        println!("failure: {err}");
    }

    // Cycle cost of a small parallel fill.
    if let Some(start) = counter.try_read() {
        dispatcher.generate(Parallel, &mut values[..10_000], || 0)?;
        println!("10k positions took {} ticks", cycles_between(start, counter.read()));
    }

    Ok(())
}
