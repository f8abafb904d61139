use op_timeout::time::TickClock;
use op_timeout::{StdTimeout, Timeout, TimeoutConfig, TimeoutExpiredError, TimeoutState};
use rand::Rng;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const NUM_SAMPLES: usize = 500;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn remaining_budget_for_random_elapsed_times() {
    init_logger();
    let mut rng = rand::thread_rng();
    for _ in 0..NUM_SAMPLES {
        let secs = AtomicU64::new(rng.gen_range(0..1_000_000));
        let clock = TickClock::new(&secs);
        let budget: u16 = rng.gen_range(1..=u16::MAX);
        let elapsed: u16 = rng.gen_range(0..budget);
        let timeout = Timeout::with_clock(budget, clock);
        clock.advance(elapsed.into());
        assert_eq!(timeout.remaining_secs().unwrap(), budget - elapsed);
        // Exactly at the budget.
        clock.advance((budget - elapsed).into());
        assert_eq!(timeout.remaining_secs().unwrap(), 0);
        let overrun: u64 = rng.gen_range(1..10_000);
        clock.advance(overrun);
        assert_eq!(
            timeout.remaining_secs().unwrap_err(),
            TimeoutExpiredError {
                budget_secs: budget,
                elapsed_secs: u64::from(budget) + overrun
            }
        );
    }
}

#[test]
fn disabled_timeout_never_expires() {
    init_logger();
    let mut rng = rand::thread_rng();
    let secs = AtomicU64::new(0);
    let clock = TickClock::new(&secs);
    let zero_budget = Timeout::with_clock(0, clock);
    let disabled = Timeout::disabled(clock);
    for _ in 0..NUM_SAMPLES {
        clock.advance(rng.gen_range(0..100_000));
        assert_eq!(zero_budget.remaining_secs().unwrap(), 0);
        assert_eq!(disabled.remaining_secs().unwrap(), 0);
        assert_eq!(zero_budget.state(), TimeoutState::Disabled);
    }
}

#[test]
fn budget_handed_to_operation() {
    init_logger();
    let secs = AtomicU64::new(0);
    let clock = TickClock::new(&secs);
    let timeout = Timeout::with_clock(12, clock);

    // Operations only see the remaining budget, not the start point.
    fn operation(timeout_secs: u16) -> u16 {
        timeout_secs
    }

    clock.advance(2);
    assert_eq!(operation(timeout.try_into().unwrap()), 10);
    clock.advance(5);
    assert_eq!(operation(timeout.try_into().unwrap()), 5);
    clock.advance(6);
    let result: Result<u16, _> = timeout.try_into();
    assert!(result.is_err());
}

#[test]
fn copies_sent_to_other_threads() {
    init_logger();
    let timeout = StdTimeout::new(60);
    let (tx, rx) = mpsc::channel();
    let jh = thread::spawn(move || {
        tx.send(timeout.remaining_secs())
            .expect("sending remaining budget failed");
    });
    let remaining = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("receiving remaining budget failed")
        .expect("timeout expired unexpectedly");
    assert!((55..=60).contains(&remaining));
    assert!(timeout.remaining_secs().unwrap() <= 60);
    jh.join().unwrap();
}

#[test]
fn std_timeout_as_socket_timeout() {
    init_logger();
    let timeout = TimeoutConfig::new(5).start();
    let read_timeout = timeout.remaining_timeout().unwrap();
    assert!(read_timeout.is_some());
    assert!(read_timeout.unwrap() <= Duration::from_secs(5));
    assert_eq!(StdTimeout::default().remaining_timeout().unwrap(), None);
}
