use std::time::Instant;
use serde::{Serialize, Deserialize};




// ============================================================================
#[derive(Clone, Serialize, Deserialize)]
pub struct RecurringTask {
    pub count: usize,
    pub next_time: f64,

    #[serde(skip, default = "Instant::now")]
    last_performed: Instant,

    #[serde(skip)]
    pub count_this_run: usize,
}




// ============================================================================
impl RecurringTask {

    pub fn new(start_time: f64) -> Self {
        Self {
            count: 0,
            next_time: start_time,
            last_performed: Instant::now(),
            count_this_run: 0,
        }
    }

    /**
     * Mark the task as performed, schedule it `interval` later, and return
     * the wall-clock seconds since it was last performed.
     */
    pub fn advance(&mut self, interval: f64) -> f64 {
        let seconds = self.last_performed.elapsed().as_secs_f64();
        self.count += 1;
        self.count_this_run += 1;
        self.next_time += interval;
        self.last_performed = Instant::now();
        seconds
    }
}




// ============================================================================
#[derive(Clone, Serialize, Deserialize)]
pub struct Tasks {
    pub write_checkpoint: RecurringTask,
    pub write_products: RecurringTask,
    pub iteration_message: RecurringTask,
}




// ============================================================================
impl Tasks {
    pub fn new(start_time: f64) -> Self {
        Self {
            write_checkpoint: RecurringTask::new(start_time),
            write_products: RecurringTask::new(start_time),
            iteration_message: RecurringTask::new(start_time),
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {
    use super::RecurringTask;

    #[test]
    fn task_is_rescheduled_by_its_interval() {
        let mut task = RecurringTask::new(1.0);
        task.advance(0.5);
        task.advance(0.5);
        assert_eq!(task.count, 2);
        assert_eq!(task.count_this_run, 2);
        assert_eq!(task.next_time, 2.0);
    }
}
