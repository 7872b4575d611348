//! Task chunking.
//!
//! Splits each task into work chunks no longer than the focus block, with a
//! break marker between consecutive chunks of the same task.

use crate::clock::MINUTES_PER_DAY;
use crate::request::{priority_rank, Priority, TaskInput};

use super::policy::SchedulingPolicy;

/// A week holds no more than this; longer tasks are chunked only up to it.
pub const MAX_TASK_MINUTES: u32 = 7 * MINUTES_PER_DAY;

/// A scheduling unit derived from a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Contiguous work on one task
    Work {
        title: String,
        minutes: u32,
        priority: Option<Priority>,
    },
    /// Rest between two work chunks of the same task
    Break { minutes: u32 },
}

impl Chunk {
    pub fn minutes(&self) -> u32 {
        match self {
            Chunk::Work { minutes, .. } | Chunk::Break { minutes } => *minutes,
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(self, Chunk::Work { .. })
    }
}

/// Usable tasks in placement order: priority rank, then title.
///
/// Tasks with an empty title or non-positive minutes are skipped and reported
/// in the returned notes.
pub fn order_tasks(tasks: &[TaskInput]) -> (Vec<&TaskInput>, Vec<String>) {
    let mut notes = Vec::new();
    let mut usable: Vec<&TaskInput> = tasks
        .iter()
        .filter(|t| {
            if t.title.is_empty() {
                notes.push("task dropped: empty title".to_string());
                false
            } else if t.minutes <= 0 {
                notes.push(format!("task '{}' dropped: minutes must be positive", t.title));
                false
            } else {
                if t.minutes > i64::from(MAX_TASK_MINUTES) {
                    notes.push(format!(
                        "task '{}' truncated: {} minutes exceeds {MAX_TASK_MINUTES}",
                        t.title, t.minutes
                    ));
                }
                true
            }
        })
        .collect();

    usable.sort_by(|a, b| {
        priority_rank(a.priority)
            .cmp(&priority_rank(b.priority))
            .then_with(|| a.title.cmp(&b.title))
    });

    (usable, notes)
}

/// Split one task into alternating work and break chunks.
///
/// At most [`MAX_TASK_MINUTES`] of the task are chunked.
/// The sequence always ends on a work chunk; breaks appear only when
/// `break_min > 0`.
pub fn chunk_task(task: &TaskInput, policy: &SchedulingPolicy) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut left = u32::try_from(task.minutes.clamp(0, i64::from(MAX_TASK_MINUTES)))
        .unwrap_or(MAX_TASK_MINUTES);
    let focus = policy.focus_block_min.max(1);

    while left > 0 {
        let block = focus.min(left);
        chunks.push(Chunk::Work {
            title: task.title.clone(),
            minutes: block,
            priority: task.priority,
        });
        left -= block;
        if left > 0 && policy.break_min > 0 {
            chunks.push(Chunk::Break {
                minutes: policy.break_min,
            });
        }
    }

    chunks
}

/// Chunk every usable task in placement order.
pub fn chunk_tasks(tasks: &[TaskInput], policy: &SchedulingPolicy) -> (Vec<Chunk>, Vec<String>) {
    let (ordered, notes) = order_tasks(tasks);
    let chunks = ordered
        .into_iter()
        .flat_map(|t| chunk_task(t, policy))
        .collect();
    (chunks, notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(chunks: &[Chunk]) -> Vec<(bool, u32)> {
        chunks.iter().map(|c| (c.is_work(), c.minutes())).collect()
    }

    #[test]
    fn splits_by_focus_block_with_breaks_between() {
        let policy = SchedulingPolicy::default();
        let task = TaskInput::new("Write report", 130).with_priority(Priority::P1);
        let chunks = chunk_task(&task, &policy);
        assert_eq!(
            lengths(&chunks),
            vec![(true, 60), (false, 10), (true, 60), (false, 10), (true, 10)]
        );
        assert!(matches!(
            &chunks[0],
            Chunk::Work { priority: Some(Priority::P1), .. }
        ));
    }

    #[test]
    fn exact_multiple_has_no_trailing_break() {
        let policy = SchedulingPolicy::default();
        let chunks = chunk_task(&TaskInput::new("Read", 120), &policy);
        assert_eq!(lengths(&chunks), vec![(true, 60), (false, 10), (true, 60)]);
    }

    #[test]
    fn oversized_task_is_truncated_to_a_week() {
        let policy = SchedulingPolicy {
            focus_block_min: 240,
            ..Default::default()
        };
        let task = TaskInput::new("Marathon", i64::MAX);
        let chunks = chunk_task(&task, &policy);
        let work: u32 = chunks.iter().filter(|c| c.is_work()).map(Chunk::minutes).sum();
        assert_eq!(work, MAX_TASK_MINUTES);
        assert_eq!(chunks.iter().filter(|c| c.is_work()).count(), 42);

        let (ordered, notes) = order_tasks(std::slice::from_ref(&task));
        assert_eq!(ordered.len(), 1);
        assert!(notes[0].contains("truncated"));
    }

    #[test]
    fn zero_break_omits_markers() {
        let policy = SchedulingPolicy {
            break_min: 0,
            focus_block_min: 25,
            ..Default::default()
        };
        let chunks = chunk_task(&TaskInput::new("Code", 60), &policy);
        assert_eq!(lengths(&chunks), vec![(true, 25), (true, 25), (true, 10)]);
    }

    #[test]
    fn short_task_is_single_chunk() {
        let policy = SchedulingPolicy::default();
        let chunks = chunk_task(&TaskInput::new("Email", 15), &policy);
        assert_eq!(lengths(&chunks), vec![(true, 15)]);
    }

    #[test]
    fn tasks_order_by_priority_then_title() {
        let tasks = vec![
            TaskInput::new("b-none", 30),
            TaskInput::new("z-p1", 30).with_priority(Priority::P1),
            TaskInput::new("a-p2", 30).with_priority(Priority::P2),
            TaskInput::new("a-none", 30),
            TaskInput::new("a-p1", 30).with_priority(Priority::P1),
        ];
        let (ordered, notes) = order_tasks(&tasks);
        let titles: Vec<&str> = ordered.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a-p1", "z-p1", "a-p2", "a-none", "b-none"]);
        assert!(notes.is_empty());
    }

    #[test]
    fn unusable_tasks_are_dropped() {
        let tasks = vec![
            TaskInput::new("", 30),
            TaskInput::new("Zero", 0),
            TaskInput::new("Negative", -15),
            TaskInput::new("Ok", 20),
        ];
        let (chunks, notes) = chunk_tasks(&tasks, &SchedulingPolicy::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(notes.len(), 3);
    }
}
