//! `WaitLists` — per-class FIFO queues of jobs waiting for a radiologist.

use std::collections::VecDeque;

use vrad_core::{JobId, Urgency};

/// One FIFO per urgency class, plus high-water marks for the run summary.
#[derive(Default, Debug)]
pub struct WaitLists {
    lists:             [VecDeque<JobId>; 3],
    max_len:           usize,
    max_len_per_class: [usize; 3],
}

impl WaitLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `job` to the back of its class's list.
    pub fn push(&mut self, urgency: Urgency, job: JobId) {
        let list = &mut self.lists[urgency.index()];
        list.push_back(job);
        let class_len = list.len();
        let slot = &mut self.max_len_per_class[urgency.index()];
        *slot = (*slot).max(class_len);
        self.max_len = self.max_len.max(self.len());
    }

    /// Remove the oldest waiting job of `urgency`.
    pub fn pop_front(&mut self, urgency: Urgency) -> Option<JobId> {
        self.lists[urgency.index()].pop_front()
    }

    pub fn front(&self, urgency: Urgency) -> Option<JobId> {
        self.lists[urgency.index()].front().copied()
    }

    /// Total waiting jobs across all classes.
    pub fn len(&self) -> usize {
        self.lists.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(VecDeque::is_empty)
    }

    pub fn len_for(&self, urgency: Urgency) -> usize {
        self.lists[urgency.index()].len()
    }

    pub fn is_empty_for(&self, urgency: Urgency) -> bool {
        self.lists[urgency.index()].is_empty()
    }

    /// Longest combined wait list observed so far.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Longest wait list observed so far for one class.
    pub fn max_len_for(&self, urgency: Urgency) -> usize {
        self.max_len_per_class[urgency.index()]
    }

    /// All waiting jobs, most urgent class first, FIFO within a class.
    pub fn iter(&self) -> impl Iterator<Item = JobId> + '_ {
        self.lists.iter().flat_map(|l| l.iter().copied())
    }
}
