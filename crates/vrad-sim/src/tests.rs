//! Integration tests for vrad-sim.

use std::collections::VecDeque;

use vrad_core::{CoreError, Job, SimTime, SimulationParameters, Urgency, VariateSource};
use vrad_dispatch::SpecialistsForUrgent;
use vrad_queue::{QueueError, ScheduledEvent};

use crate::{
    EngineBuilder, NoopObserver, Phase, RunSummary, SimError, SimObserver, SimulationResult,
    TerminationReason,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Arrival draw returned once a class's script is used up; far past any
/// horizon used here, so no further arrival is scheduled.
const NEVER: f64 = 1e12;

/// Replays fixed durations per class.
#[derive(Default)]
struct ScriptedVariates {
    arrivals: [VecDeque<f64>; 3],
    services: [VecDeque<f64>; 3],
}

impl ScriptedVariates {
    fn arrivals(mut self, urgency: Urgency, gaps: &[f64]) -> Self {
        self.arrivals[urgency.index()].extend(gaps);
        self
    }

    fn services(mut self, urgency: Urgency, durations: &[f64]) -> Self {
        self.services[urgency.index()].extend(durations);
        self
    }
}

impl VariateSource for ScriptedVariates {
    fn draw_interarrival(&mut self, urgency: Urgency) -> f64 {
        self.arrivals[urgency.index()].pop_front().unwrap_or(NEVER)
    }

    fn draw_service(&mut self, urgency: Urgency) -> f64 {
        self.services[urgency.index()].pop_front().unwrap_or(1.0)
    }
}

fn params(num_radiologists: u32, sim_duration: f64) -> SimulationParameters {
    SimulationParameters { num_radiologists, sim_duration, ..SimulationParameters::default() }
}

fn run_scripted(p: SimulationParameters, v: ScriptedVariates) -> SimulationResult {
    EngineBuilder::new(p).build_with_variates(v).unwrap().run(&mut NoopObserver).unwrap()
}

fn run_seeded(p: SimulationParameters) -> SimulationResult {
    EngineBuilder::new(p).build().unwrap().run(&mut NoopObserver).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

/// Every job the run created, in id order.
fn all_jobs(result: &SimulationResult) -> Vec<Job> {
    let mut jobs: Vec<Job> = result.completed.iter().chain(&result.unfinished).cloned().collect();
    jobs.sort_by_key(|j| j.id);
    jobs
}

/// Tracks concurrency, clock order and phases from observer hooks.
#[derive(Default)]
struct Recorder {
    in_service:      usize,
    max_in_service:  usize,
    last_event:      Option<SimTime>,
    clock_went_back: bool,
    phases:          Vec<Phase>,
    completions:     usize,
    run_ends:        usize,
}

impl SimObserver for Recorder {
    fn on_phase(&mut self, phase: Phase, _now: SimTime) {
        self.phases.push(phase);
    }

    fn on_event(&mut self, event: &ScheduledEvent) {
        if self.last_event.is_some_and(|t| event.time < t) {
            self.clock_went_back = true;
        }
        self.last_event = Some(event.time);
    }

    fn on_job_started(&mut self, _job: &Job) {
        self.in_service += 1;
        self.max_in_service = self.max_in_service.max(self.in_service);
    }

    fn on_job_completed(&mut self, _job: &Job) {
        self.in_service -= 1;
        self.completions += 1;
    }

    fn on_run_end(&mut self, _summary: &RunSummary, _unfinished: &[Job]) {
        self.run_ends += 1;
    }
}

/// Checks every per-job and per-run invariant that must hold for any
/// parameter set.
fn check_invariants(p: &SimulationParameters, result: &SimulationResult) {
    for job in &result.completed {
        let wait = job.wait_time().unwrap();
        let service = job.service_duration().unwrap();
        let total = job.total_time().unwrap();
        assert!(wait >= 0.0, "{} waited {wait}", job.id);
        assert!(service >= 0.0);
        assert!(approx(total, wait + service), "{}: {total} != {wait} + {service}", job.id);
        assert!(approx(job.time_completed.unwrap().minutes(), job.time_created.minutes() + total));
        assert!(job.time_created < p.horizon(), "arrival at or after the horizon");
    }

    for pair in result.completed.windows(2) {
        assert!(pair[0].time_completed <= pair[1].time_completed, "completion order");
    }

    let jobs = all_jobs(result);
    for (i, job) in jobs.iter().enumerate() {
        assert_eq!(job.id.index(), i, "job ids are dense from 0");
    }
    for urgency in Urgency::ALL {
        let created: Vec<SimTime> =
            jobs.iter().filter(|j| j.urgency == urgency).map(|j| j.time_created).collect();
        for pair in created.windows(2) {
            assert!(pair[0] < pair[1], "{urgency}: creation times must strictly increase");
        }
    }

    let s = &result.summary;
    assert_eq!(s.jobs_created, jobs.len());
    assert_eq!(s.jobs_completed, result.completed.len());
    assert_eq!(s.jobs_unfinished, result.unfinished.len());
    assert_eq!(s.jobs_created, s.jobs_completed + s.jobs_unfinished);
    assert!(s.final_time < p.cutoff_horizon());
    assert!((0.0..=1.0 + 1e-9).contains(&s.utilisation));
    for class in &s.classes {
        assert_eq!(class.created, class.completed + class.unfinished);
    }
}

// ── EngineBuilder validation ──────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let engine = EngineBuilder::new(SimulationParameters::default()).build().unwrap();
        assert_eq!(engine.phase, Phase::Initialized);
        assert_eq!(engine.pool.len(), 6);
        assert_eq!(engine.pool.specialist_count(), 2);
        assert!(engine.queue.is_empty());
        assert!(engine.jobs.is_empty());
        assert_eq!(engine.policy_name(), "generalist-first");
    }

    #[test]
    fn zero_radiologists_is_rejected() {
        let err = EngineBuilder::new(params(0, 60.0)).build().err().unwrap();
        assert!(matches!(
            err,
            SimError::InvalidParameter(CoreError::InvalidParameter { name: "num_radiologists", .. })
        ));
    }

    #[test]
    fn non_positive_mean_is_rejected() {
        let mut p = params(2, 60.0);
        p.service_mean[1] = 0.0;
        let err = EngineBuilder::new(p).build().err().unwrap();
        assert!(matches!(
            err,
            SimError::InvalidParameter(CoreError::InvalidParameter { name: "service_mean", .. })
        ));
    }

    #[test]
    fn scripted_build_still_validates() {
        let mut p = params(2, 60.0);
        p.cutoff_multiplier = 3;
        let result = EngineBuilder::new(p).build_with_variates(ScriptedVariates::default());
        assert!(result.is_err());
    }

    #[test]
    fn policy_swap_is_reported() {
        let engine = EngineBuilder::new(params(2, 60.0))
            .policy(SpecialistsForUrgent)
            .build()
            .unwrap();
        assert_eq!(engine.policy_name(), "specialists-for-urgent");
    }
}

// ── Scripted scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scripted {
    use super::*;

    /// One radiologist, X arrives first and reads for 10; Y arrives 5 later
    /// and must wait until X is done.
    #[test]
    fn second_job_waits_for_single_radiologist() {
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Urgent, &[1.0, 5.0])
            .services(Urgency::Urgent, &[10.0, 3.0]);
        let result = run_scripted(params(1, 100.0), v);

        assert_eq!(result.completed.len(), 2);
        assert!(result.unfinished.is_empty());
        assert_eq!(result.summary.termination, TerminationReason::QueueExhausted);

        let x = &result.completed[0];
        let y = &result.completed[1];
        assert_eq!(x.time_created, SimTime(1.0));
        assert_eq!(x.wait_time(), Some(0.0));
        assert_eq!(x.time_completed, Some(SimTime(11.0)));

        assert_eq!(y.time_created, SimTime(6.0));
        assert_eq!(y.time_service_started, Some(SimTime(11.0)));
        assert_eq!(y.wait_time(), Some(5.0));
        assert_eq!(y.time_completed, Some(SimTime(14.0)));
        assert_eq!(y.total_time(), Some(8.0));

        assert_eq!(result.summary.final_time, SimTime(14.0));
        assert_eq!(result.summary.max_queue_len, 1);
        assert_eq!(result.summary.events_processed, 4);
    }

    #[test]
    fn stat_jumps_ahead_of_earlier_routine() {
        // Routine at 1 (reads 10), routine at 2, stat at 3.  When the
        // radiologist frees up at 11 the stat job goes next.
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Routine, &[1.0, 1.0])
            .arrivals(Urgency::Stat, &[3.0])
            .services(Urgency::Routine, &[10.0, 2.0])
            .services(Urgency::Stat, &[4.0]);
        let result = run_scripted(params(1, 100.0), v);

        let order: Vec<Urgency> = result.completed.iter().map(|j| j.urgency).collect();
        assert_eq!(order, vec![Urgency::Routine, Urgency::Stat, Urgency::Routine]);
        let stat = &result.completed[1];
        assert_eq!(stat.time_service_started, Some(SimTime(11.0)));
        assert_eq!(result.completed[2].time_service_started, Some(SimTime(15.0)));
    }

    #[test]
    fn generalist_takes_the_first_job() {
        // 2 radiologists at 0.5 → id 0 specialist, id 1 generalist.
        let mut p = params(2, 100.0);
        p.specialist_fraction = 0.5;
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Stat, &[1.0, 0.5])
            .services(Urgency::Stat, &[5.0, 5.0]);
        let result = run_scripted(p, v);

        let rads: Vec<u32> = result.completed.iter().map(|j| j.radiologist.unwrap().0).collect();
        assert_eq!(rads, vec![1, 0]);
    }

    #[test]
    fn equal_time_events_run_in_insertion_order() {
        // Two radiologists, both classes arrive at 2.0; stat was seeded first.
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Stat, &[2.0])
            .arrivals(Urgency::Urgent, &[2.0]);
        let result = run_scripted(params(2, 100.0), v);

        let jobs = all_jobs(&result);
        assert_eq!(jobs[0].urgency, Urgency::Stat);
        assert_eq!(jobs[1].urgency, Urgency::Urgent);
    }

    #[test]
    fn cutoff_leaves_in_service_job_unfinished() {
        let mut p = params(1, 10.0);
        p.cutoff_multiplier = 1;
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Urgent, &[1.0, 1.0])
            .services(Urgency::Urgent, &[1000.0]);
        let result = run_scripted(p, v);

        assert_eq!(result.summary.termination, TerminationReason::CutoffReached);
        assert!(result.completed.is_empty());
        assert_eq!(result.unfinished.len(), 2);
        assert!(result.unfinished[0].is_in_service());
        assert!(result.unfinished[1].is_waiting());

        let rows = result.unfinished_table();
        assert_eq!(rows[0].rad_id, Some(0));
        assert_eq!(rows[0].time_rad_job_starts, Some(1.0));
        assert_eq!(rows[0].time_job_finished, None);
        assert_eq!(rows[1].rad_id, None);
        assert_eq!(rows[1].wait_time, None);
    }

    #[test]
    fn draining_phase_is_entered_past_the_horizon() {
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Routine, &[1.0])
            .services(Urgency::Routine, &[15.0]);
        let mut engine = EngineBuilder::new(params(1, 10.0)).build_with_variates(v).unwrap();
        let mut rec = Recorder::default();
        let result = engine.run(&mut rec).unwrap();

        assert_eq!(rec.phases, vec![Phase::Running, Phase::Draining, Phase::Terminated]);
        assert_eq!(engine.phase, Phase::Terminated);
        assert_eq!(result.completed.len(), 1);
        assert_eq!(result.summary.final_time, SimTime(16.0));
    }

    #[test]
    fn arrival_at_horizon_is_not_scheduled() {
        let v = ScriptedVariates::default().arrivals(Urgency::Stat, &[4.0, 6.0]);
        let result = run_scripted(params(1, 10.0), v);
        assert_eq!(result.summary.jobs_created, 1);
    }

    #[test]
    fn negative_duration_is_a_causality_violation() {
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Urgent, &[5.0])
            .services(Urgency::Urgent, &[-2.0]);
        let err = EngineBuilder::new(params(1, 100.0))
            .build_with_variates(v)
            .unwrap()
            .run(&mut NoopObserver)
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Causality(QueueError::CausalityViolation { .. })));
    }

    #[test]
    fn sla_breaches_count_total_time_over_target() {
        let mut p = params(1, 100.0);
        p.target_time = [30.0, 5.0, 1440.0];
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Urgent, &[1.0, 1.0, 1.0])
            .services(Urgency::Urgent, &[3.0, 3.0, 3.0]);
        // Totals: 3, 5 (2 wait + 3), 7 (4 wait + 3).  Only the last exceeds 5.
        let result = run_scripted(p, v);

        let urgent = result.summary.class(Urgency::Urgent);
        assert_eq!(urgent.completed, 3);
        assert_eq!(urgent.sla_breaches, 1);
        assert_eq!(urgent.max_wait_time, Some(4.0));
        assert!(approx(urgent.mean_wait_time.unwrap(), 2.0));
        assert!(approx(urgent.mean_total_time.unwrap(), 5.0));
        assert_eq!(result.summary.total_sla_breaches(), 1);
        assert_eq!(result.summary.class(Urgency::Stat).mean_wait_time, None);
    }

    #[test]
    fn job_table_rows_match_completed_jobs() {
        let v = ScriptedVariates::default()
            .arrivals(Urgency::Routine, &[2.0, 1.0])
            .services(Urgency::Routine, &[4.0, 1.0]);
        let result = run_scripted(params(1, 100.0), v);

        let table = result.job_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].img_id, 1);
        assert_eq!(table[1].urgency, 3);
        assert_eq!(table[1].rad_id, Some(0));
        assert_eq!(table[1].time_created, 3.0);
        assert_eq!(table[1].time_rad_job_starts, Some(6.0));
        assert_eq!(table[1].time_job_finished, Some(7.0));
        assert_eq!(table[1].wait_time, Some(3.0));
        assert_eq!(table[1].time_w_rad, Some(1.0));
        assert_eq!(table[1].total_time, Some(4.0));

        assert_eq!(result.job_table_tail(1), vec![table[1].clone()]);
        assert_eq!(result.job_table_tail(10).len(), 2);
        assert_eq!(result.completed_for(Urgency::Routine).count(), 2);
    }
}

// ── Seeded runs ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod seeded {
    use super::*;

    #[test]
    fn same_seed_gives_identical_job_table() {
        let p = SimulationParameters { seed: 7, ..SimulationParameters::default() };
        let a = run_seeded(p.clone());
        let b = run_seeded(p);
        assert_eq!(a.job_table(), b.job_table());
        assert_eq!(a.unfinished_table(), b.unfinished_table());
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = run_seeded(SimulationParameters { seed: 1, ..SimulationParameters::default() });
        let b = run_seeded(SimulationParameters { seed: 2, ..SimulationParameters::default() });
        assert_ne!(a.job_table(), b.job_table());
    }

    #[test]
    fn default_run_satisfies_invariants() {
        let p = SimulationParameters::default();
        let result = run_seeded(p.clone());
        assert!(result.summary.jobs_created > 0);
        check_invariants(&p, &result);
    }

    #[test]
    fn sparse_arrivals_never_wait() {
        for seed in 0..20 {
            let p = SimulationParameters {
                sim_duration: 60.0,
                arrival_mean: [1000.0; 3],
                seed,
                ..SimulationParameters::default()
            };
            let result = run_seeded(p.clone());
            check_invariants(&p, &result);
            assert!(result.summary.jobs_created < 6, "seed {seed}");
            assert!(result.unfinished.is_empty());
            for job in &result.completed {
                assert_eq!(job.wait_time(), Some(0.0), "seed {seed}");
            }
        }
    }

    #[test]
    fn longer_cutoff_never_finishes_fewer_jobs() {
        let base = SimulationParameters {
            sim_duration: 120.0,
            num_radiologists: 1,
            arrival_mean: [1.0; 3],
            service_mean: [2.0; 3],
            ..SimulationParameters::default()
        };
        let short = run_seeded(SimulationParameters { cutoff_multiplier: 1, ..base.clone() });
        let long = run_seeded(SimulationParameters { cutoff_multiplier: 4, ..base });

        assert_eq!(short.summary.jobs_created, long.summary.jobs_created);
        assert!(long.summary.jobs_completed >= short.summary.jobs_completed);
        assert!(long.summary.jobs_unfinished <= short.summary.jobs_unfinished);
        assert!(short.summary.jobs_unfinished > 0, "one radiologist should be overloaded");
        // The short run's log is a prefix of the long run's.
        assert_eq!(short.job_table()[..], long.job_table()[..short.completed.len()]);
    }

    #[test]
    fn saturated_pool_means_zero_wait() {
        let p = SimulationParameters { num_radiologists: 200, ..SimulationParameters::default() };
        let result = run_seeded(p.clone());
        check_invariants(&p, &result);
        assert!(result.completed.iter().all(|j| j.wait_time() == Some(0.0)));
        assert_eq!(result.summary.max_queue_len, 0);
    }

    #[test]
    fn concurrency_bounded_by_roster() {
        let p = SimulationParameters { num_radiologists: 3, ..SimulationParameters::default() };
        let mut rec = Recorder::default();
        let result = EngineBuilder::new(p).build().unwrap().run(&mut rec).unwrap();

        assert!(rec.max_in_service <= 3);
        assert_eq!(rec.max_in_service, 3, "default load keeps three radiologists busy");
        assert!(!rec.clock_went_back);
        assert_eq!(rec.completions, result.completed.len());
        assert_eq!(rec.run_ends, 1);
    }

    #[test]
    fn engine_runs_only_once() {
        let mut engine = EngineBuilder::new(params(2, 30.0)).build().unwrap();
        engine.run(&mut NoopObserver).unwrap();
        assert!(matches!(engine.run(&mut NoopObserver), Err(SimError::AlreadyRun)));
    }

    #[test]
    fn stat_without_specialists_is_never_read() {
        let p = SimulationParameters { specialist_fraction: 0.0, ..SimulationParameters::default() };
        let result = EngineBuilder::new(p.clone())
            .policy(SpecialistsForUrgent)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();

        let stat = result.summary.class(Urgency::Stat);
        assert!(stat.created > 0);
        assert_eq!(stat.completed, 0);
        assert_eq!(stat.unfinished, stat.created);
        assert_eq!(result.summary.policy, "specialists-for-urgent");
        check_invariants(&p, &result);
    }

    #[test]
    fn verbose_run_entry_point() {
        let p = SimulationParameters { verbose: true, sim_duration: 30.0, ..SimulationParameters::default() };
        let result = crate::run(p.clone()).unwrap();
        check_invariants(&p, &result);
    }

    #[test]
    fn run_entry_point_rejects_bad_parameters() {
        let p = SimulationParameters { specialist_fraction: 1.5, ..SimulationParameters::default() };
        assert!(crate::run(p).is_err());
    }

    #[test]
    fn tuple_observer_drives_both_sides() {
        let mut pair = (Recorder::default(), Recorder::default());
        let result = EngineBuilder::new(params(4, 60.0)).build().unwrap().run(&mut pair).unwrap();
        assert_eq!(pair.0.completions, result.completed.len());
        assert_eq!(pair.1.completions, result.completed.len());
        assert_eq!(pair.0.phases, pair.1.phases);
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use vrad_core::CUTOFF_MULTIPLIERS;

    use super::*;

    fn arb_params() -> impl Strategy<Value = SimulationParameters> {
        (
            1u32..8,
            10.0f64..200.0,
            prop::array::uniform3(0.5f64..5.0),
            prop::array::uniform3(0.5f64..5.0),
            0.0f64..=1.0,
            prop::sample::select(CUTOFF_MULTIPLIERS.to_vec()),
            any::<u64>(),
        )
            .prop_map(|(n, duration, arrival, service, fraction, cutoff, seed)| {
                SimulationParameters {
                    sim_duration:        duration,
                    num_radiologists:    n,
                    arrival_mean:        arrival,
                    service_mean:        service,
                    specialist_fraction: fraction,
                    cutoff_multiplier:   cutoff,
                    seed,
                    ..SimulationParameters::default()
                }
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_for_any_parameters(p in arb_params()) {
            let mut rec = Recorder::default();
            let result = EngineBuilder::new(p.clone()).build().unwrap().run(&mut rec).unwrap();
            check_invariants(&p, &result);
            prop_assert!(rec.max_in_service <= p.num_radiologists as usize);
            prop_assert!(!rec.clock_went_back);
        }

        #[test]
        fn replay_is_deterministic(p in arb_params()) {
            let a = run_seeded(p.clone());
            let b = run_seeded(p);
            prop_assert_eq!(a.job_table(), b.job_table());
            prop_assert_eq!(a.summary, b.summary);
        }
    }
}
