//! Cancellable periodic tasks on a virtual millisecond clock.
//!
//! The scheduler never calls back into game code. `advance` reports which
//! tasks fired, in chronological order, and the owner runs them. Tasks live
//! exactly as long as the scheduler (or until cancelled), so dropping the
//! owner tears every timer down with it.

/// Handle to a registered periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    period_ms: u32,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    /// Registration order; ties on the due time fire in this order.
    tasks: Vec<Task>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Register a task firing every `period_ms`, first one period from now.
    ///
    /// A zero period is treated as 1ms.
    pub fn every(&mut self, period_ms: u32) -> TaskId {
        let period_ms = period_ms.max(1);
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tasks.push(Task {
            id,
            period_ms,
            next_due_ms: self.now_ms + period_ms as u64,
        });
        id
    }

    /// Cancel one task. Returns false if it was not active.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_active(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Milliseconds until the next firing, if any task is active.
    pub fn until_next_ms(&self) -> Option<u64> {
        self.tasks
            .iter()
            .map(|t| t.next_due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Advance the clock by `elapsed_ms` and append every due firing to `fired`.
    ///
    /// A long `elapsed_ms` can fire the same task several times; firings are
    /// interleaved across tasks by due time.
    pub fn advance(&mut self, elapsed_ms: u32, fired: &mut Vec<TaskId>) {
        let target = self.now_ms + elapsed_ms as u64;

        loop {
            let mut next: Option<usize> = None;
            for (i, task) in self.tasks.iter().enumerate() {
                if task.next_due_ms > target {
                    continue;
                }
                match next {
                    Some(j) if self.tasks[j].next_due_ms <= task.next_due_ms => {}
                    _ => next = Some(i),
                }
            }

            let Some(i) = next else {
                break;
            };
            let task = &mut self.tasks[i];
            self.now_ms = task.next_due_ms;
            task.next_due_ms += task.period_ms as u64;
            fired.push(task.id);
        }

        self.now_ms = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_once_per_period() {
        let mut s = Scheduler::new();
        let id = s.every(100);
        let mut fired = Vec::new();

        s.advance(99, &mut fired);
        assert!(fired.is_empty());

        s.advance(1, &mut fired);
        assert_eq!(fired, vec![id]);

        fired.clear();
        s.advance(350, &mut fired);
        assert_eq!(fired, vec![id, id, id]);
        assert_eq!(s.now_ms(), 450);
    }

    #[test]
    fn firings_interleave_chronologically() {
        let mut s = Scheduler::new();
        let slow = s.every(250);
        let fast = s.every(100);
        let mut fired = Vec::new();

        s.advance(500, &mut fired);
        // 100 200 250 300 400 500(slow first: registered first)
        assert_eq!(fired, vec![fast, fast, slow, fast, fast, slow, fast]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let a = s.every(100);
        let b = s.every(100);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));

        let mut fired = Vec::new();
        s.advance(300, &mut fired);
        assert_eq!(fired, vec![b, b, b]);
        assert!(!s.is_active(a));
        assert!(s.is_active(b));
    }

    #[test]
    fn cancel_all_stops_everything() {
        let mut s = Scheduler::new();
        s.every(10);
        s.every(20);
        s.cancel_all();
        assert_eq!(s.active_count(), 0);
        assert_eq!(s.until_next_ms(), None);

        let mut fired = Vec::new();
        s.advance(1_000, &mut fired);
        assert!(fired.is_empty());
    }

    #[test]
    fn registration_is_relative_to_current_clock() {
        let mut s = Scheduler::new();
        let mut fired = Vec::new();
        s.advance(1_050, &mut fired);

        let id = s.every(100);
        assert_eq!(s.until_next_ms(), Some(100));
        s.advance(99, &mut fired);
        assert!(fired.is_empty());
        s.advance(1, &mut fired);
        assert_eq!(fired, vec![id]);
    }
}
