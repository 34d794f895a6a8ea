//! The primitives carry no shared state: many threads can call them at once
//! and each gets the same answers and its own blocks.

use std::thread;

use audioring::prelude::*;
use audioring_test_utils::CountingAllocator;
use crossbeam_channel::unbounded;

const THREADS: usize = 8;

#[test]
fn bit_functions_agree_across_threads() {
    let (tx, rx) = unbounded();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let tx = tx.clone();
            thread::spawn(move || {
                let sum: u64 = (1..=100_000u32)
                    .map(|x| {
                        u64::from(count_leading_zeroes(x))
                            + u64::from(log2_ceil(x))
                            + u64::from(next_power_of_two(x))
                    })
                    .sum();
                tx.send((t, sum)).unwrap();
            })
        })
        .collect();
    drop(tx);
    for h in handles {
        h.join().unwrap();
    }

    let results: Vec<(usize, u64)> = rx.iter().collect();
    assert_eq!(results.len(), THREADS);
    let first = results[0].1;
    assert!(results.iter().all(|&(_, sum)| sum == first));
}

#[test]
fn blocks_move_between_threads_and_release_once() {
    let counter = CountingAllocator::new();
    let (tx, rx) = unbounded();

    thread::scope(|s| {
        for t in 0..THREADS {
            let tx = tx.clone();
            let counter = &counter;
            s.spawn(move || {
                for i in 0..16 {
                    let mut block = safe_allocate_in(64 + t * 16 + i, counter).unwrap();
                    block.as_uninit_slice_mut()[0].write(t as u8);
                    tx.send(block).unwrap();
                }
            });
        }
        drop(tx);

        // Drain on this thread: every block was produced elsewhere.
        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received.len(), THREADS * 16);
        assert_eq!(counter.live(), THREADS * 16);
    });

    assert_eq!(counter.allocations(), THREADS * 16);
    assert_eq!(counter.releases(), THREADS * 16);
    assert_eq!(counter.live_bytes(), 0);
}

#[test]
fn storage_per_thread_is_independent() {
    let handles: Vec<_> = (0..THREADS as u32)
        .map(|t| {
            thread::spawn(move || {
                let mut storage = ChannelStorage::with_frames(2, 2, 100 + t).unwrap();
                storage.channel_mut(0).unwrap().fill(t as u8);
                let zeroed = storage.channel(1).unwrap().iter().all(|&b| b == 0);
                let filled = storage.channel(0).unwrap().iter().all(|&b| b == t as u8);
                zeroed && filled
            })
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}
