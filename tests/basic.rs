use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use snowdrift::{Config, Error, Generator, MutexGenerator, Snowflake};

const START_TIME: i64 = 1679587200000;

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX epoch")
        .as_millis() as i64
}

#[test]
fn sanity_check() {
    let mut gen = Generator::new(Config::new()
        .start_time(START_TIME)
        .node_id(1))
        .unwrap();
    let mut unique = HashSet::new();

    for _ in 0..(Snowflake::MAX_SEQUENCE * 3) {
        let id = gen.next_id().expect("failed to generate id");

        assert!(id > 0);
        assert!(unique.insert(id), "duplicate id {}", id);
    }
}

#[test]
fn threaded_sanity_check() {
    let gen = MutexGenerator::new(Config::new()
        .node_id(1)
        .max_tolerate_millis(10))
        .expect("failed to create mutex generator");

    let mut threads = Vec::with_capacity(100);

    for _ in 0..threads.capacity() {
        let local_gen = gen.clone();

        threads.push(std::thread::spawn(move || {
            (0..100)
                .map(|_| local_gen.next_id().expect("failed to generate id"))
                .collect::<Vec<_>>()
        }));
    }

    let mut unique = HashSet::new();

    for joiner in threads {
        for id in joiner.join().expect("thread paniced") {
            assert!(unique.insert(id), "duplicate id {}", id);
            assert_eq!(snowdrift::parse(id, None).node_id, 1);
        }
    }

    assert_eq!(unique.len(), 100 * 100);
}

#[test]
fn multiple_nodes() {
    let mut threads = Vec::new();

    for node_id in [0, 511, 1023] {
        let gen = MutexGenerator::new(Config::new()
            .node_id(node_id)
            .max_tolerate_millis(10))
            .unwrap();

        for _ in 0..50 {
            let local_gen = gen.clone();

            threads.push(std::thread::spawn(move || {
                (0..50)
                    .map(|_| (node_id, local_gen.next_id().expect("failed to generate id")))
                    .collect::<Vec<_>>()
            }));
        }
    }

    let mut unique = HashSet::new();

    for joiner in threads {
        for (node_id, id) in joiner.join().expect("thread paniced") {
            assert!(unique.insert(id), "duplicate id {}", id);
            assert_eq!(snowdrift::parse(id, None).node_id, node_id);
        }
    }

    assert_eq!(unique.len(), 3 * 50 * 50);
}

#[test]
fn construction_boundaries() {
    let now = now_millis();

    assert!(matches!(
        Generator::new(Config::new().max_tolerate_millis(-1)),
        Err(Error::InvalidMaxTolerateMillis)
    ));
    assert!(matches!(
        Generator::new(Config::new().node_id(1024)),
        Err(Error::InvalidNodeId)
    ));
    assert!(matches!(
        MutexGenerator::new(Config::new().start_time(now + 60_000)),
        Err(Error::InvalidStartTime)
    ));
    assert!(matches!(
        MutexGenerator::new(Config::new().last_generate_time(now + 60_000)),
        Err(Error::InvalidLastGenerateTime)
    ));

    assert!(Generator::new(Config::new().node_id(1023)).is_ok());
    assert!(Generator::new(Config::new().max_tolerate_millis(0)).is_ok());
}

#[test]
fn resumes_after_last_generate_time() {
    let last = now_millis() - 5;
    let mut gen = Generator::new(Config::new()
        .start_time(START_TIME)
        .last_generate_time(last))
        .unwrap();

    let id = gen.next_id().unwrap();
    let parsed = gen.parse(id);

    assert!(parsed.generation_time >= last);
}

#[test]
fn parse_round_trip() {
    let mut gen = Generator::new(Config::new()
        .start_time(START_TIME)
        .node_id(42))
        .unwrap();

    let before = now_millis();
    let id = gen.next_id().unwrap();
    let after = now_millis();

    let parsed = snowdrift::parse(id, Some(START_TIME));

    assert_eq!(parsed.id, id);
    assert_eq!(parsed.start_time, START_TIME);
    assert_eq!(parsed.node_id, 42);
    assert_eq!(parsed.generation_time, START_TIME + parsed.elapsed_time);
    assert!(
        parsed.generation_time >= before && parsed.generation_time <= after,
        "generation time {} outside of {}..={}", parsed.generation_time, before, after
    );

    let flake = Snowflake::try_from(&id).unwrap();

    assert_eq!(flake.elapsed(), parsed.elapsed_time);
    assert_eq!(flake.node_id(), parsed.node_id);
    assert_eq!(flake.sequence(), parsed.sequence_id);
}

#[test]
fn encoded_ids() {
    let mut gen = Generator::new(Config::new().node_id(7)).unwrap();
    let first = gen.next_id().unwrap();
    let second = gen.next_id().unwrap();

    for enc in [snowdrift::base58(), snowdrift::base62()] {
        let token = enc.encode(first).unwrap();

        assert_eq!(enc.decode(&token).unwrap(), first);
        assert_ne!(enc.encode(second).unwrap(), token);
    }
}
