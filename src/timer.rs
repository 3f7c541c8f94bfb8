use std::time::{Duration, Instant};

/// One-shot tasks that become due after a delay
#[derive(Debug, Clone, Default)]
pub struct Deferred<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Deferred {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, task: T, delay: Duration, now: Instant) {
        self.pending.push((now + delay, task));
    }

    /// Removes and returns every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        self.pending.sort_by_key(|(due, _)| *due);
        let split = self.pending.partition_point(|(due, _)| *due <= now);
        self.pending.drain(..split).map(|(_, task)| task).collect()
    }

    /// Time left until the next task is due, if any task is pending.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(due, _)| due.saturating_duration_since(now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_in_due_order() {
        let start = Instant::now();
        let mut deferred = Deferred::new();
        deferred.schedule("viewer", Duration::from_millis(100), start);
        deferred.schedule("slider", Duration::from_millis(50), start);

        assert!(deferred.take_due(start).is_empty());
        assert_eq!(
            deferred.next_due_in(start),
            Some(Duration::from_millis(50))
        );
        assert_eq!(deferred.take_due(start + Duration::from_millis(60)), ["slider"]);
        assert_eq!(deferred.take_due(start + Duration::from_millis(200)), ["viewer"]);
        assert!(deferred.take_due(start + Duration::from_secs(1)).is_empty());
        assert_eq!(deferred.next_due_in(start), None);
    }
}
