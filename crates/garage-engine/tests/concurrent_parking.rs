//! Integration test: many threads parking through one shared handle.
//!
//! Every successful assignment must be unique, and the number of
//! successes must equal the garage's capacity once demand exceeds it.

use std::collections::HashSet;
use std::thread;

use garage_core::{AllocError, Category};
use garage_engine::{GarageConfig, GarageEngine, ParkRequest, SharedGarage};
use garage_test_utils::ManualClock;

const THREADS: usize = 8;
const CARS_PER_THREAD: usize = 40;

#[test]
fn concurrent_parks_never_share_a_slot() {
    let engine = GarageEngine::new(GarageConfig::reference(), Box::new(ManualClock::default())).unwrap();
    let garage = SharedGarage::new(engine);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let garage = garage.clone();
            thread::spawn(move || {
                let req = ParkRequest::new(t % 4 == 0, t % 2 == 1);
                let mut won = Vec::new();
                for _ in 0..CARS_PER_THREAD {
                    match garage.park(req) {
                        Ok(parked) => won.push(parked.slot),
                        Err(AllocError::NoSpaceAvailable { .. }) => {}
                        Err(e) => panic!("unexpected {e}"),
                    }
                }
                won
            })
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for slot in handle.join().unwrap() {
            assert!(all.insert(slot), "{slot} assigned twice");
        }
    }

    let occupied: usize = Category::ALL
        .iter()
        .map(|&c| garage.with_engine(|e| e.table().occupied_count(c)))
        .sum();
    assert_eq!(occupied, all.len());
    assert_eq!(garage.metrics().total_assigned() as usize, all.len());
}

#[test]
fn concurrent_park_and_unpark_restore_capacity() {
    let engine = GarageEngine::new(GarageConfig::reference(), Box::new(ManualClock::default())).unwrap();
    let garage = SharedGarage::new(engine);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let garage = garage.clone();
            thread::spawn(move || {
                for _ in 0..CARS_PER_THREAD {
                    let parked = garage.park(ParkRequest::default()).unwrap();
                    garage.unpark(parked.address).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for category in Category::ALL {
        assert_eq!(
            garage.free_count(category),
            garage.map().capacity(category)
        );
    }
    let m = garage.metrics();
    assert_eq!(m.released, (THREADS * CARS_PER_THREAD) as u64);
}
