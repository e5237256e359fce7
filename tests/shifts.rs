//! Shift boundary and breakdown-retry behavior.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use shopfloor::{
    BacklogParams, Observer, ProductType, ProductionLine, ShiftParams, SimConfig, SimTime,
    StageConfig,
};

/// Records only the notification kinds these tests care about.
#[derive(Clone, Default)]
struct ShiftLog {
    starts: Rc<RefCell<Vec<(u32, SimTime)>>>,
    ends: Rc<RefCell<Vec<(u32, SimTime)>>>,
    breakdowns: Rc<RefCell<Vec<SimTime>>>,
    drops: Rc<RefCell<Vec<(String, SimTime)>>>,
}

impl Observer for ShiftLog {
    fn shift_started(&mut self, shift: u32, time: SimTime) {
        self.starts.borrow_mut().push((shift, time));
    }
    fn shift_ended(&mut self, shift: u32, time: SimTime) {
        self.ends.borrow_mut().push((shift, time));
    }
    fn stage_breakdown(&mut self, _stage_name: &str, time: SimTime) {
        self.breakdowns.borrow_mut().push(time);
    }
    fn unit_dropped(&mut self, stage_name: &str, _product: ProductType, time: SimTime) {
        self.drops.borrow_mut().push((stage_name.to_string(), time));
    }
}

fn press(processing: f64) -> StageConfig {
    StageConfig::new("Press")
        .with_processing_time(ProductType::A, processing)
        .with_processing_time(ProductType::B, processing)
}

fn config(shift_hours: u32, shifts: u32, stage: StageConfig) -> SimConfig {
    SimConfig {
        shift: ShiftParams {
            duration_hours: shift_hours,
            count: shifts,
        },
        stages: vec![stage],
        backlog: BacklogParams { pairs: 0 },
        seed: 5,
        log_level: "info".to_string(),
    }
}

#[test]
fn shifts_run_back_to_back_and_in_order() {
    let log = ShiftLog::default();
    let mut line = ProductionLine::new(&config(6, 3, press(1.0)), Box::new(log.clone()));
    let stats = line.run();

    assert_eq!(
        *log.starts.borrow(),
        vec![(1, 0.0), (2, 6.0), (3, 12.0)]
    );
    assert_eq!(*log.ends.borrow(), vec![(1, 6.0), (2, 12.0), (3, 18.0)]);
    assert_eq!(stats.shifts_run, 3);
    assert_eq!(stats.total_time, 18.0);
}

#[test]
fn each_shift_ends_before_the_next_starts() {
    let log = ShiftLog::default();
    let mut line = ProductionLine::new(&config(4, 5, press(1.0)), Box::new(log.clone()));
    line.run();

    let starts = log.starts.borrow();
    let ends = log.ends.borrow();
    for i in 0..4 {
        // Shift k ends exactly when shift k+1 starts.
        assert_eq!(ends[i].1, starts[i + 1].1);
        assert_eq!(starts[i].0 + 1, starts[i + 1].0);
    }
}

#[test]
fn certain_breakdowns_retry_until_the_deadline_closes() {
    // p = 1.0: the unit breaks down on every attempt. With maintenance 1.0
    // and processing 2.0 in a 5-hour shift, attempts at t = 0, 1, 2, 3 all
    // break down; the retry at t = 4 is rejected since 4 + 2 > 5. The run
    // must terminate with the unit dropped, not stall.
    let stage = press(2.0).with_breakdowns(1.0, 1.0);
    let log = ShiftLog::default();
    let mut line = ProductionLine::new(&config(5, 1, stage), Box::new(log.clone()))
        .with_backlog(VecDeque::from(vec![ProductType::A]));
    let stats = line.run();

    assert_eq!(*log.breakdowns.borrow(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(*log.drops.borrow(), vec![("Press".to_string(), 4.0)]);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.admitted, 1);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.stages[0].breakdowns, 4);
    assert_eq!(stats.stages[0].units_started, 4);
    assert_eq!(stats.total_time, 5.0);
}

#[test]
fn shift_start_admission_into_a_busy_stage_drops_the_unit() {
    // Processing 3.0 fits the 4-hour deadline, but setup 2.0 pushes the
    // completion to t = 5, past the shift end. Shift 2 starts at t = 4 and
    // offers the next unit while the press is still busy, so that unit is
    // lost; the in-flight one still completes at t = 5.
    let stage = press(3.0)
        .with_setup_time(ProductType::A, 2.0)
        .with_setup_time(ProductType::B, 2.0);
    let log = ShiftLog::default();
    let mut line = ProductionLine::new(&config(4, 2, stage), Box::new(log.clone()))
        .with_backlog(VecDeque::from(vec![ProductType::A, ProductType::A]));
    let stats = line.run();

    assert_eq!(*log.drops.borrow(), vec![("Press".to_string(), 4.0)]);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.admitted, 1);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.shifts_run, 2);
    assert_eq!(stats.total_time, 8.0);
}

#[test]
fn pending_retry_resolves_after_the_final_shift_ends() {
    // The only attempt breaks down at t = 0; maintenance lasts 5 hours, so
    // the retry fires at t = 5, after the final shift end at t = 4. Events
    // are never revoked: the retry still runs, gets rejected against the
    // stale deadline, and the queue drains.
    let stage = press(2.0).with_breakdowns(1.0, 5.0);
    let log = ShiftLog::default();
    let mut line = ProductionLine::new(&config(4, 1, stage), Box::new(log.clone()))
        .with_backlog(VecDeque::from(vec![ProductType::A]));

    let stats = line.run();
    assert_eq!(*log.breakdowns.borrow(), vec![0.0]);
    assert_eq!(*log.ends.borrow(), vec![(1, 4.0)]);
    assert_eq!(*log.drops.borrow(), vec![("Press".to_string(), 5.0)]);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.total_time, 5.0);
}

#[test]
fn no_shift_exceeds_the_configured_count() {
    let log = ShiftLog::default();
    let mut line = ProductionLine::new(&config(2, 7, press(1.0)), Box::new(log.clone()));
    let stats = line.run();

    assert_eq!(log.starts.borrow().len(), 7);
    assert_eq!(log.ends.borrow().len(), 7);
    assert_eq!(stats.shifts_run, 7);
    assert_eq!(line.current_shift(), 7);
}
