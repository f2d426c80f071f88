/*
Time-queue for the simulation engine.

Every simulated workload runs as a cooperative task.  A task is resumed by the scheduler, does
some work against the shared machine state, and then yields a `Step` telling the scheduler when
it wants to run again:
    - `Sleep(n)` resumes it once the clock reaches `now + n`
    - `Join(child)` starts a child task at the current cycle and resumes the parent at the cycle
      the child finishes
    - `Done` retires it

Wakeups are ordered by cycle first and by enqueue order second, so tasks that wake at the same
cycle run in the order they went to sleep.  The run ends when no wakeup is pending.
*/

use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub type Cycle = u64;

pub type TaskId = usize;

// What a task asks the scheduler for when it yields
pub enum Step<W> {
    Sleep(Cycle),
    Join(Box<dyn Task<W>>),
    Done,
}

impl<W> std::fmt::Debug for Step<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Sleep(cycles) => write!(f, "Sleep({cycles})"),
            Step::Join(_) => write!(f, "Join(..)"),
            Step::Done => write!(f, "Done"),
        }
    }
}

/// A logical thread of control on the simulated timeline.  `W` is the shared state every task
/// of one simulation can touch while it holds the timeline.
pub trait Task<W> {
    fn resume(&mut self, now: Cycle, world: &mut W) -> Step<W>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Wakeup {
    at: Cycle,
    seq: u64,
    task: TaskId,
}

struct Slot<W> {
    task: Box<dyn Task<W>>,
    parent: Option<TaskId>,
}

pub struct Scheduler<W> {
    now: Cycle,
    next_seq: u64,
    wakeups: BinaryHeap<Reverse<Wakeup>>,
    slots: Vec<Option<Slot<W>>>,
    // ids of finished tasks, handed out again before `slots` grows
    free: Vec<TaskId>,
    live: usize,
}

impl<W> Default for Scheduler<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Scheduler<W> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            wakeups: BinaryHeap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub fn now(&self) -> Cycle {
        self.now
    }

    // Number of tasks spawned and not yet done, including ones blocked on a child.
    pub fn live_tasks(&self) -> usize {
        self.live
    }

    pub fn is_idle(&self) -> bool {
        self.wakeups.is_empty()
    }

    // Start a top-level task at the current cycle.
    pub fn spawn(&mut self, task: Box<dyn Task<W>>) -> TaskId {
        self.insert(task, None)
    }

    // Run until nothing is pending.  Returns the cycle of the last processed wakeup.
    pub fn run(&mut self, world: &mut W) -> Cycle {
        while self.step(world) {}
        self.now
    }

    // Run until nothing is pending or the next wakeup lies beyond `deadline`.  Returns true if
    // the queue drained.
    pub fn run_until(&mut self, world: &mut W, deadline: Cycle) -> bool {
        loop {
            match self.wakeups.peek() {
                None => return true,
                Some(Reverse(next)) if next.at > deadline => return false,
                Some(_) => {
                    self.step(world);
                }
            }
        }
    }

    // Process a single wakeup.  Returns false if nothing was pending.
    pub fn step(&mut self, world: &mut W) -> bool {
        let Some(Reverse(wakeup)) = self.wakeups.pop() else {
            return false;
        };
        debug_assert!(wakeup.at >= self.now, "time went backwards");
        self.now = wakeup.at;

        let Some(slot) = self.slots[wakeup.task].as_mut() else {
            return true;
        };
        match slot.task.resume(self.now, world) {
            Step::Sleep(cycles) => {
                self.schedule(wakeup.task, self.now.saturating_add(cycles));
            }
            Step::Join(child) => {
                self.insert(child, Some(wakeup.task));
            }
            Step::Done => {
                let parent = self.slots[wakeup.task].take().and_then(|slot| slot.parent);
                self.free.push(wakeup.task);
                self.live -= 1;
                if let Some(parent) = parent {
                    self.schedule(parent, self.now);
                }
            }
        }
        true
    }

    fn insert(&mut self, task: Box<dyn Task<W>>, parent: Option<TaskId>) -> TaskId {
        let slot = Some(Slot { task, parent });
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = slot;
                id
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.live += 1;
        self.schedule(id, self.now);
        id
    }

    fn schedule(&mut self, task: TaskId, at: Cycle) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.wakeups.push(Reverse(Wakeup { at, seq, task }));
    }
}
