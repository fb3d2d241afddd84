mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Recorder, Reply, Scripted, VirtualClock, VirtualTimedProvider, secs};
use jobpoll::provider::BlockingStatusQuery;
use jobpoll::state_machine::NoEvents;
use jobpoll::{
    BlockingJobPoller, JobStatus, PollError, PollOptions, ProviderError, StatusChange,
};

fn on_clock<'c, Q: BlockingStatusQuery>(
    query: Q,
    options: PollOptions,
    clock: &'c VirtualClock,
) -> BlockingJobPoller<Q, &'c VirtualClock> {
    BlockingJobPoller::new(query, options)
        .with_events(Arc::new(NoEvents))
        .with_suspend(clock)
}

#[test]
fn pending_for_twelve_seconds_then_completed() {
    let clock = VirtualClock::new();
    let provider = VirtualTimedProvider::new(&clock, secs(12), JobStatus::Completed);
    let poller = on_clock(provider, PollOptions::fixed(secs(30), secs(5)), &clock);

    let mut recorder = Recorder::default();
    let status = poller.poll_status("job", Some(&mut recorder)).unwrap();

    assert_eq!(status, JobStatus::Completed);
    assert_eq!(recorder.seen, vec![JobStatus::Pending, JobStatus::Completed]);
    assert_eq!(
        poller.query().query_times(),
        vec![secs(0), secs(5), secs(10), secs(15)]
    );
    assert_eq!(clock.waits(), vec![secs(5), secs(5), secs(5)]);
}

#[test]
fn error_on_first_query_returns_immediately() {
    let clock = VirtualClock::new();
    let poller = on_clock(
        Scripted::statuses(&[JobStatus::Error]),
        PollOptions::exponential(secs(30), secs(1), secs(8), 3.0),
        &clock,
    );

    let mut recorder = Recorder::default();
    let status = poller.poll_status("job", Some(&mut recorder)).unwrap();

    assert_eq!(status, JobStatus::Error);
    assert_eq!(recorder.seen, vec![JobStatus::Error]);
    assert_eq!(poller.query().calls(), 1);
    assert!(clock.waits().is_empty());
}

#[test]
fn never_terminal_times_out_after_two_queries() {
    let clock = VirtualClock::new();
    let provider = VirtualTimedProvider::new(&clock, Duration::MAX, JobStatus::Completed);
    let poller = on_clock(provider, PollOptions::fixed(secs(10), secs(5)), &clock);

    let err = poller.poll_status("job", None).unwrap_err();

    assert!(matches!(
        err,
        PollError::DeadlineExceeded { elapsed } if elapsed == secs(10)
    ));
    assert_eq!(poller.query().query_times(), vec![secs(0), secs(5)]);
}

#[test]
fn waits_never_run_past_the_deadline() {
    let clock = VirtualClock::new();
    let provider = VirtualTimedProvider::new(&clock, Duration::MAX, JobStatus::Completed);
    let options = PollOptions::exponential(secs(10), secs(2), secs(60), 2.0);
    let poller = on_clock(provider, options, &clock);

    let err = poller.poll_status("job", None).unwrap_err();

    assert!(matches!(err, PollError::DeadlineExceeded { .. }));
    // 2 + 4 would reach t=6; the next wait of 8 is clamped to the 4s left.
    assert_eq!(clock.waits(), vec![secs(2), secs(4), secs(4)]);
    assert_eq!(poller.query().query_times(), vec![secs(0), secs(2), secs(6)]);
    assert_eq!(clock.elapsed(), secs(10));
}

#[test]
fn exponential_waits_follow_the_formula() {
    let clock = VirtualClock::new();
    let provider = VirtualTimedProvider::new(&clock, secs(40), JobStatus::Completed);
    let options = PollOptions::exponential(secs(600), secs(1), secs(10), 2.0);
    let poller = on_clock(provider, options, &clock);

    poller.poll_status("job", None).unwrap();

    let waits = clock.waits();
    for (n, wait) in waits.iter().enumerate() {
        let expected = Duration::from_secs_f64(2f64.powi(n as i32)).min(secs(10));
        assert_eq!(*wait, expected, "wait #{}", n + 1);
    }
    assert!(waits.iter().all(|w| *w <= secs(10)));
}

#[test]
fn invalid_strategy_makes_no_query() {
    let clock = VirtualClock::new();
    let options = PollOptions {
        strategy: "sometimes".into(),
        ..PollOptions::default()
    };
    let poller = on_clock(Scripted::statuses(&[JobStatus::Completed]), options, &clock);

    let err = poller.poll_status("job", None).unwrap_err();

    assert!(matches!(err, PollError::InvalidConfiguration(_)));
    assert_eq!(poller.query().calls(), 0);
}

#[test]
fn provider_failure_stops_polling() {
    let clock = VirtualClock::new();
    let poller = on_clock(
        Scripted::new(vec![Reply::Status(JobStatus::Pending), Reply::Unavailable]),
        PollOptions::fixed(secs(60), secs(1)),
        &clock,
    );

    let err = poller.poll_status("job", None).unwrap_err();

    assert!(matches!(err, PollError::Provider(_)));
    assert_eq!(poller.query().calls(), 2);
    assert_eq!(clock.waits(), vec![secs(1)]);
}

#[test]
fn query_timeout_reaches_the_caller() {
    let clock = VirtualClock::new();
    let poller = on_clock(
        Scripted::new(vec![Reply::Status(JobStatus::Pending), Reply::TimedOut]),
        PollOptions::fixed(secs(60), secs(1)),
        &clock,
    );

    let err = poller.poll_status("job", None).unwrap_err();

    match err {
        PollError::Provider(ProviderError::Timeout(after)) => assert_eq!(after, secs(5)),
        other => panic!("expected a provider timeout, got {other:?}"),
    }
    assert_eq!(poller.query().calls(), 2);
    assert_eq!(clock.waits(), vec![secs(1)]);
}

#[test]
fn observer_failure_is_propagated() {
    let clock = VirtualClock::new();
    let poller = on_clock(
        Scripted::statuses(&[JobStatus::Pending, JobStatus::Completed]),
        PollOptions::fixed(secs(60), secs(1)),
        &clock,
    );

    let mut seen = Vec::new();
    let mut observer = |change: &StatusChange| -> anyhow::Result<()> {
        seen.push(change.current.clone());
        if change.current.is_terminal() {
            anyhow::bail!("cannot record final status");
        }
        Ok(())
    };
    let err = poller.poll_status("job", Some(&mut observer)).unwrap_err();

    assert!(matches!(err, PollError::Observer(_)));
    assert_eq!(seen, vec![JobStatus::Pending, JobStatus::Completed]);
}

#[test]
fn parity_script_with_unknown_status() {
    // Same script as the cooperative test of the same name.
    let clock = VirtualClock::new();
    let poller = on_clock(
        Scripted::statuses(&[
            JobStatus::Pending,
            JobStatus::Unknown("encoding".into()),
            JobStatus::Unknown("encoding".into()),
            JobStatus::Completed,
        ]),
        PollOptions::exponential(secs(120), secs(2), secs(5), 2.0),
        &clock,
    );

    let mut recorder = Recorder::default();
    let status = poller.poll_status("job", Some(&mut recorder)).unwrap();

    assert_eq!(status, JobStatus::Completed);
    assert_eq!(
        recorder.seen,
        vec![
            JobStatus::Pending,
            JobStatus::Unknown("encoding".into()),
            JobStatus::Completed
        ]
    );
    assert_eq!(clock.waits(), vec![secs(2), secs(4), secs(5)]);
}

#[test]
fn independent_sessions_on_threads() {
    let handles: Vec<_> = [JobStatus::Completed, JobStatus::Error]
        .into_iter()
        .map(|terminal| {
            std::thread::spawn(move || {
                let clock = VirtualClock::new();
                let provider = VirtualTimedProvider::new(&clock, secs(3), terminal);
                let poller = on_clock(provider, PollOptions::fixed(secs(30), secs(1)), &clock);
                let mut recorder = Recorder::default();
                let status = poller.poll_status("job", Some(&mut recorder)).unwrap();
                (status, recorder.seen)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![
            (
                JobStatus::Completed,
                vec![JobStatus::Pending, JobStatus::Completed]
            ),
            (JobStatus::Error, vec![JobStatus::Pending, JobStatus::Error]),
        ]
    );
}
