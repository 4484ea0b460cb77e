// Sidecar lock behaviour of LocalStorage under overlapping writers.
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use timetab::context::TestContext;
use timetab::storage::LocalStorage;

#[test]
fn test_overlapping_writers_hold_lock_one_at_a_time() {
    let ctx = TestContext::new();
    let target = Arc::new(ctx.root.join("out.ics"));
    let inside = Arc::new(AtomicUsize::new(0));
    let max_inside = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(3));

    // The third writer arrives after the first one has released its lock,
    // while the second is still queued on it.
    let delays = [0u64, 50, 400];
    let mut handles = vec![];

    for (i, delay) in delays.into_iter().enumerate() {
        let target = target.clone();
        let inside = inside.clone();
        let max_inside = max_inside.clone();
        let b = barrier.clone();
        handles.push(thread::spawn(move || {
            b.wait();
            thread::sleep(Duration::from_millis(delay));
            LocalStorage::with_lock(&target, || {
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(300));
                LocalStorage::atomic_write(target.as_path(), format!("writer {}", i))?;
                inside.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    let contents = fs::read_to_string(target.as_path()).unwrap();
    assert!(contents.starts_with("writer "));
}

#[test]
fn test_output_write_creates_parent_and_keeps_lock_file() {
    let ctx = TestContext::new();
    let target = ctx.root.join("nested").join("timetable.csv");

    LocalStorage::write_output(&target, "day,time_slot\n").unwrap();
    LocalStorage::write_output(&target, "day,time_slot,week\n").unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "day,time_slot,week\n");
    assert!(target.with_extension("csv.lock").exists());
    assert!(!target.with_extension("tmp").exists());
}
