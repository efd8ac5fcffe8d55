//! The scheduling core
//!
//! The scheduler owns the bound [`Owner`] and implements every derived
//! operation over its task graph: stable sorting, filtering, recurring-task
//! regeneration, conflict detection, and greedy daily planning. All queries
//! start from the owner's flat `(pet_name, task)` baseline view and return
//! flat result lists; nothing calls back upward.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::{Frequency, Owner, Pet, Priority, Task, TaskId};

use super::conflict::{Conflict, ConflictSide};

/// Optional criteria for selecting tasks from the flat view
///
/// Both filters are independent and AND-combined; an empty filter selects
/// every task in baseline order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    /// Exact pet name to match, if any
    pub pet_name: Option<String>,

    /// Completion status to match, if any
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// Creates a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one pet's tasks
    pub fn pet(mut self, name: impl Into<String>) -> Self {
        self.pet_name = Some(name.into());
        self
    }

    /// Restricts the filter by completion status
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    fn matches(&self, pet_name: &str, task: &Task) -> bool {
        if let Some(want) = &self.pet_name {
            if want != pet_name {
                return false;
            }
        }
        if let Some(want) = self.completed {
            if task.is_completed != want {
                return false;
            }
        }
        true
    }
}

/// Recurring-task template captured before mutating the owner
struct RecurrenceTemplate {
    pet_index: usize,
    description: String,
    duration_minutes: u32,
    priority: Priority,
    frequency: Frequency,
    due: NaiveDateTime,
    period: Duration,
}

/// Session-scoped coordinator over one owner's pets and tasks
///
/// Before an owner is bound every query behaves as if there are zero tasks.
/// The task-ID counter resyncs on binding so IDs never collide with tasks
/// loaded from a persisted snapshot.
#[derive(Debug)]
pub struct Scheduler {
    owner: Option<Owner>,
    next_task_id: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Creates a scheduler with no owner bound
    pub fn new() -> Self {
        Self {
            owner: None,
            next_task_id: 1,
        }
    }

    /// Creates a scheduler bound to the given owner
    pub fn with_owner(owner: Owner) -> Self {
        let mut scheduler = Self::new();
        scheduler.set_owner(owner);
        scheduler
    }

    /// Binds an owner, resyncing the ID counter past every existing task ID
    pub fn set_owner(&mut self, owner: Owner) {
        self.next_task_id = owner
            .all_tasks()
            .iter()
            .map(|(_, task)| task.id.value())
            .max()
            .map_or(1, |max| max + 1);
        self.owner = Some(owner);
    }

    /// Returns the bound owner, if any
    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    /// Returns the bound owner mutably, if any
    pub fn owner_mut(&mut self) -> Option<&mut Owner> {
        self.owner.as_mut()
    }

    /// Unbinds and returns the owner (for handing back to persistence)
    pub fn take_owner(&mut self) -> Option<Owner> {
        self.owner.take()
    }

    /// Returns the next task ID and advances the counter
    ///
    /// Never returns an ID already used by a task bound to the current
    /// owner: the resync on binding plus monotonic increment guarantee it.
    pub fn generate_task_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_task_id);
        self.next_task_id += 1;
        id
    }

    /// Finds a pet by exact name
    pub fn pet_by_name(&self, name: &str) -> Option<&Pet> {
        self.owner
            .as_ref()
            .and_then(|owner| owner.pets.iter().find(|pet| pet.name == name))
    }

    /// Finds a pet by exact name, mutably
    pub fn pet_by_name_mut(&mut self, name: &str) -> Option<&mut Pet> {
        self.owner
            .as_mut()
            .and_then(|owner| owner.pets.iter_mut().find(|pet| pet.name == name))
    }

    /// Returns the flat `(pet_name, task)` baseline view, or `[]` if unbound
    pub fn all_tasks(&self) -> Vec<(&str, &Task)> {
        self.owner
            .as_ref()
            .map(Owner::all_tasks)
            .unwrap_or_default()
    }

    /// Stable in-place sort by due time
    ///
    /// Tasks with a due time come first in chronological order; unscheduled
    /// tasks go last. Ties keep their input order.
    pub fn sort_by_time(tasks: &mut [(&str, &Task)]) {
        tasks.sort_by_key(|(_, task)| (task.due_time.is_none(), task.due_time));
    }

    /// Stable in-place sort by priority tier, then due time
    ///
    /// Within one priority tier this behaves exactly like [`sort_by_time`].
    ///
    /// [`sort_by_time`]: Scheduler::sort_by_time
    pub fn sort_by_priority_and_time(tasks: &mut [(&str, &Task)]) {
        tasks.sort_by_key(|(_, task)| (task.priority, task.due_time.is_none(), task.due_time));
    }

    /// Selects tasks matching the filter, preserving baseline order
    ///
    /// No match (or no bound owner) yields an empty list, never an error.
    pub fn filter_tasks(&self, filter: &TaskFilter) -> Vec<(&str, &Task)> {
        self.all_tasks()
            .into_iter()
            .filter(|&(pet_name, task)| filter.matches(pet_name, task))
            .collect()
    }

    /// Marks a task complete and regenerates its next recurring instance
    ///
    /// The task is located by ID anywhere in the bound owner and marked
    /// complete. Returns false without regenerating when the task is
    /// one-time, unscheduled, or unknown. Otherwise the successor (same
    /// fields, due time advanced by one period, fresh ID) is appended to
    /// the pet named `pet_name`; returns true iff that pet exists. The
    /// original stays marked complete even when the pet lookup fails.
    pub fn complete_task(&mut self, task_id: TaskId, pet_name: &str) -> bool {
        let Some(owner) = self.owner.as_mut() else {
            return false;
        };

        let mut template = None;
        'pets: for pet in &mut owner.pets {
            for task in &mut pet.tasks {
                if task.id == task_id {
                    task.mark_complete();
                    template = Some((
                        task.description.clone(),
                        task.duration_minutes,
                        task.priority,
                        task.frequency,
                        task.due_time,
                    ));
                    break 'pets;
                }
            }
        }

        let Some((description, duration_minutes, priority, frequency, due_time)) = template
        else {
            return false;
        };
        let (Some(period), Some(due)) = (frequency.period(), due_time) else {
            return false;
        };

        let next_id = self.generate_task_id();
        let Ok(next_task) = Task::new(
            next_id,
            description,
            duration_minutes,
            priority,
            Some(due + period),
            frequency,
        ) else {
            return false;
        };

        match self.pet_by_name_mut(pet_name) {
            Some(pet) => {
                pet.add_task(next_task);
                true
            }
            None => false,
        }
    }

    /// Returns true if any existing task overlaps the candidate
    ///
    /// Scans every task regardless of completion status and short-circuits
    /// on the first hit.
    pub fn check_conflicts(&self, new_task: &Task) -> bool {
        self.all_tasks()
            .iter()
            .any(|(_, task)| task.overlaps_with(new_task))
    }

    /// Finds every pair of incomplete tasks whose time windows overlap
    ///
    /// Examines unordered pairs `(i, j)` with `i < j` over the flat baseline
    /// list; completed tasks are fully exempt. O(n²).
    pub fn detect_all_conflicts(&self) -> Vec<Conflict> {
        let tasks = self.all_tasks();
        let mut conflicts = Vec::new();

        for (i, &(first_pet, first)) in tasks.iter().enumerate() {
            if first.is_completed {
                continue;
            }
            for &(second_pet, second) in tasks.iter().skip(i + 1) {
                if second.is_completed || !first.overlaps_with(second) {
                    continue;
                }
                // Overlap implies both due times are present
                let (Some(first_due), Some(second_due)) = (first.due_time, second.due_time)
                else {
                    continue;
                };
                conflicts.push(Conflict::new(
                    ConflictSide {
                        description: first.description.clone(),
                        pet_name: first_pet.to_string(),
                        due_time: first_due,
                    },
                    ConflictSide {
                        description: second.description.clone(),
                        pet_name: second_pet.to_string(),
                        due_time: second_due,
                    },
                ));
            }
        }

        conflicts
    }

    /// Greedily packs incomplete tasks due on `target_date` into a budget
    ///
    /// Candidates are incomplete tasks whose due date (time of day ignored)
    /// equals the target date, sorted by priority then due time. The packer
    /// walks that order, including a task only while its duration still fits
    /// the remaining minutes; there is no backtracking, so a large early
    /// task can crowd out a shorter later one. Mutates nothing.
    pub fn generate_daily_schedule(
        &self,
        available_minutes: u32,
        target_date: NaiveDate,
    ) -> Vec<(&str, &Task)> {
        let mut candidates: Vec<(&str, &Task)> = self
            .all_tasks()
            .into_iter()
            .filter(|(_, task)| {
                !task.is_completed && task.due_time.map(|due| due.date()) == Some(target_date)
            })
            .collect();
        Self::sort_by_priority_and_time(&mut candidates);

        let mut used_minutes = 0u32;
        let mut selected = Vec::new();
        for (pet_name, task) in candidates {
            if used_minutes + task.duration_minutes <= available_minutes {
                used_minutes += task.duration_minutes;
                selected.push((pet_name, task));
            }
        }
        selected
    }

    /// Bulk-generates future instances of every recurring task
    ///
    /// For each scheduled, non-one-time task the cursor steps forward from
    /// the task's own due time by its period while it stays within `end`;
    /// each step at or after `start` materializes a fresh incomplete
    /// instance appended to the same pet. Returns the number created.
    ///
    /// Independent of [`complete_task`] regeneration: running both against
    /// the same tasks produces duplicate future occurrences.
    ///
    /// [`complete_task`]: Scheduler::complete_task
    pub fn generate_recurring_tasks(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> usize {
        let Some(owner) = self.owner.as_ref() else {
            return 0;
        };

        let mut templates = Vec::new();
        for (pet_index, pet) in owner.pets.iter().enumerate() {
            for task in pet.tasks() {
                if let (Some(period), Some(due)) = (task.frequency.period(), task.due_time) {
                    templates.push(RecurrenceTemplate {
                        pet_index,
                        description: task.description.clone(),
                        duration_minutes: task.duration_minutes,
                        priority: task.priority,
                        frequency: task.frequency,
                        due,
                        period,
                    });
                }
            }
        }

        let mut created = 0;
        for template in templates {
            let mut cursor = template.due + template.period;
            while cursor <= end {
                if cursor >= start {
                    let id = self.generate_task_id();
                    let Ok(task) = Task::new(
                        id,
                        template.description.clone(),
                        template.duration_minutes,
                        template.priority,
                        Some(cursor),
                        template.frequency,
                    ) else {
                        break;
                    };
                    if let Some(pet) = self
                        .owner
                        .as_mut()
                        .and_then(|owner| owner.pets.get_mut(template.pet_index))
                    {
                        pet.add_task(task);
                        created += 1;
                    }
                }
                cursor += template.period;
            }
        }

        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ConflictScope;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn task(
        id: u64,
        description: &str,
        duration: u32,
        priority: Priority,
        due: Option<NaiveDateTime>,
        frequency: Frequency,
    ) -> Task {
        Task::new(TaskId::new(id), description, duration, priority, due, frequency).unwrap()
    }

    /// One owner, one pet "Rocky", tasks appended in the given order
    fn scheduler_with_tasks(tasks: Vec<Task>) -> Scheduler {
        let mut pet = Pet::new("Rocky", "Dog", 4).unwrap();
        for t in tasks {
            pet.add_task(t);
        }
        let mut owner = Owner::new("Abigail");
        owner.add_pet(pet);
        Scheduler::with_owner(owner)
    }

    #[test]
    fn unbound_scheduler_sees_zero_tasks() {
        let scheduler = Scheduler::new();
        assert!(scheduler.all_tasks().is_empty());
        assert!(scheduler.filter_tasks(&TaskFilter::new()).is_empty());
        assert!(scheduler.detect_all_conflicts().is_empty());
        assert!(scheduler.pet_by_name("Rocky").is_none());
        assert!(scheduler
            .generate_daily_schedule(120, at(1, 0, 0).date())
            .is_empty());
    }

    #[test]
    fn id_counter_resyncs_past_loaded_ids() {
        let mut scheduler = scheduler_with_tasks(vec![
            task(1, "Walk", 30, Priority::High, None, Frequency::OneTime),
            task(2, "Feed", 10, Priority::High, None, Frequency::OneTime),
            task(5, "Groom", 45, Priority::Low, None, Frequency::OneTime),
        ]);
        assert_eq!(scheduler.generate_task_id(), TaskId::new(6));
        assert_eq!(scheduler.generate_task_id(), TaskId::new(7));
    }

    #[test]
    fn id_counter_starts_at_one_with_no_tasks() {
        let mut scheduler = Scheduler::with_owner(Owner::new("Abigail"));
        assert_eq!(scheduler.generate_task_id(), TaskId::new(1));
    }

    #[test]
    fn sort_by_time_orders_chronologically() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "3PM", 30, Priority::High, Some(at(1, 15, 0)), Frequency::OneTime),
            task(2, "9AM", 30, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime),
            task(3, "Noon", 30, Priority::High, Some(at(1, 12, 0)), Frequency::OneTime),
        ]);
        let mut tasks = scheduler.all_tasks();
        Scheduler::sort_by_time(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|(_, t)| t.description.as_str()).collect();
        assert_eq!(order, ["9AM", "Noon", "3PM"]);
    }

    #[test]
    fn sort_by_time_puts_unscheduled_last() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Unscheduled", 30, Priority::High, None, Frequency::OneTime),
            task(2, "10AM", 30, Priority::High, Some(at(1, 10, 0)), Frequency::OneTime),
            task(3, "8AM", 30, Priority::High, Some(at(1, 8, 0)), Frequency::OneTime),
        ]);
        let mut tasks = scheduler.all_tasks();
        Scheduler::sort_by_time(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|(_, t)| t.description.as_str()).collect();
        assert_eq!(order, ["8AM", "10AM", "Unscheduled"]);
    }

    #[test]
    fn sort_by_time_is_stable_on_ties() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "First", 30, Priority::Low, Some(at(1, 9, 0)), Frequency::OneTime),
            task(2, "Second", 15, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime),
            task(3, "Third none", 15, Priority::High, None, Frequency::OneTime),
            task(4, "Fourth none", 15, Priority::High, None, Frequency::OneTime),
        ]);
        let mut tasks = scheduler.all_tasks();
        Scheduler::sort_by_time(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|(_, t)| t.description.as_str()).collect();
        assert_eq!(order, ["First", "Second", "Third none", "Fourth none"]);
    }

    #[test]
    fn sort_by_priority_refines_time_sort() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Low early", 30, Priority::Low, Some(at(1, 8, 0)), Frequency::OneTime),
            task(2, "High late", 30, Priority::High, Some(at(1, 18, 0)), Frequency::OneTime),
            task(3, "High early", 30, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime),
            task(4, "Medium none", 30, Priority::Medium, None, Frequency::OneTime),
            task(5, "Medium noon", 30, Priority::Medium, Some(at(1, 12, 0)), Frequency::OneTime),
        ]);
        let mut tasks = scheduler.all_tasks();
        Scheduler::sort_by_priority_and_time(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|(_, t)| t.description.as_str()).collect();
        assert_eq!(
            order,
            ["High early", "High late", "Medium noon", "Medium none", "Low early"]
        );
    }

    #[test]
    fn filter_by_pet_and_status() {
        let mut rocky = Pet::new("Rocky", "Dog", 4).unwrap();
        rocky.add_task(task(1, "Walk", 30, Priority::High, None, Frequency::OneTime));
        let mut done = task(2, "Feed", 10, Priority::High, None, Frequency::OneTime);
        done.mark_complete();
        rocky.add_task(done);

        let mut luna = Pet::new("Luna", "Cat", 2).unwrap();
        luna.add_task(task(3, "Litter box", 15, Priority::Medium, None, Frequency::Daily));

        let mut owner = Owner::new("Abigail");
        owner.add_pet(rocky);
        owner.add_pet(luna);
        let scheduler = Scheduler::with_owner(owner);

        // Unfiltered: everything in baseline order
        assert_eq!(scheduler.filter_tasks(&TaskFilter::new()).len(), 3);

        let rocky_only = scheduler.filter_tasks(&TaskFilter::new().pet("Rocky"));
        assert_eq!(rocky_only.len(), 2);
        assert!(rocky_only.iter().all(|(pet, _)| *pet == "Rocky"));

        let pending = scheduler.filter_tasks(&TaskFilter::new().completed(false));
        assert_eq!(pending.len(), 2);

        let rocky_pending =
            scheduler.filter_tasks(&TaskFilter::new().pet("Rocky").completed(false));
        assert_eq!(rocky_pending.len(), 1);
        assert_eq!(rocky_pending[0].1.description, "Walk");

        // Unknown pet: empty, not an error
        assert!(scheduler
            .filter_tasks(&TaskFilter::new().pet("Tweety"))
            .is_empty());
    }

    #[test]
    fn complete_daily_task_regenerates_next_day() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Morning walk",
            30,
            Priority::High,
            Some(at(1, 9, 30)),
            Frequency::Daily,
        )]);

        assert!(scheduler.complete_task(TaskId::new(1), "Rocky"));

        let tasks = scheduler.all_tasks();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].1.is_completed);

        let successor = tasks[1].1;
        assert_eq!(successor.id, TaskId::new(2));
        assert_eq!(successor.description, "Morning walk");
        assert_eq!(successor.due_time, Some(at(2, 9, 30)));
        assert!(!successor.is_completed);
    }

    #[test]
    fn complete_weekly_and_monthly_offsets() {
        let mut scheduler = scheduler_with_tasks(vec![
            task(1, "Flea check", 20, Priority::Medium, Some(at(1, 10, 0)), Frequency::Weekly),
            task(2, "Nail trim", 20, Priority::Medium, Some(at(1, 11, 0)), Frequency::Monthly),
        ]);

        assert!(scheduler.complete_task(TaskId::new(1), "Rocky"));
        assert!(scheduler.complete_task(TaskId::new(2), "Rocky"));

        let tasks = scheduler.all_tasks();
        assert_eq!(tasks[2].1.due_time, Some(at(8, 10, 0)));
        // Monthly is a flat 30-day offset: June 1 + 30 days = July 1
        assert_eq!(
            tasks[3].1.due_time,
            Some(
                NaiveDate::from_ymd_opt(2025, 7, 1)
                    .unwrap()
                    .and_hms_opt(11, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn complete_one_time_task_does_not_regenerate() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Vet appointment",
            60,
            Priority::High,
            Some(at(1, 18, 30)),
            Frequency::OneTime,
        )]);

        assert!(!scheduler.complete_task(TaskId::new(1), "Rocky"));
        let tasks = scheduler.all_tasks();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].1.is_completed);
    }

    #[test]
    fn complete_unscheduled_task_does_not_regenerate() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Buy treats",
            20,
            Priority::Low,
            None,
            Frequency::Daily,
        )]);

        assert!(!scheduler.complete_task(TaskId::new(1), "Rocky"));
        assert_eq!(scheduler.all_tasks().len(), 1);
        assert!(scheduler.all_tasks()[0].1.is_completed);
    }

    #[test]
    fn complete_with_unknown_pet_still_marks_original() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Morning walk",
            30,
            Priority::High,
            Some(at(1, 9, 30)),
            Frequency::Daily,
        )]);

        assert!(!scheduler.complete_task(TaskId::new(1), "Tweety"));
        let tasks = scheduler.all_tasks();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].1.is_completed);
    }

    #[test]
    fn complete_unknown_task_is_a_no_op() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Walk",
            30,
            Priority::High,
            Some(at(1, 9, 0)),
            Frequency::Daily,
        )]);

        assert!(!scheduler.complete_task(TaskId::new(99), "Rocky"));
        assert_eq!(scheduler.all_tasks().len(), 1);
        assert!(!scheduler.all_tasks()[0].1.is_completed);
    }

    #[test]
    fn check_conflicts_scans_all_tasks() {
        let scheduler = scheduler_with_tasks(vec![task(
            1,
            "Walk",
            30,
            Priority::High,
            Some(at(1, 14, 0)),
            Frequency::OneTime,
        )]);

        let clash = task(9, "Grooming", 45, Priority::Medium, Some(at(1, 14, 15)), Frequency::OneTime);
        assert!(scheduler.check_conflicts(&clash));

        let clear = task(9, "Grooming", 45, Priority::Medium, Some(at(1, 16, 0)), Frequency::OneTime);
        assert!(!scheduler.check_conflicts(&clear));
    }

    #[test]
    fn detect_same_pet_same_time_conflict() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Walk", 30, Priority::High, Some(at(1, 10, 0)), Frequency::OneTime),
            task(2, "Grooming", 45, Priority::Medium, Some(at(1, 10, 0)), Frequency::OneTime),
        ]);

        let conflicts = scheduler.detect_all_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].scope, ConflictScope::SamePet);
        assert_eq!(conflicts[0].first.description, "Walk");
        assert_eq!(conflicts[0].second.description, "Grooming");
    }

    #[test]
    fn detect_cross_pet_conflict() {
        let mut rocky = Pet::new("Rocky", "Dog", 4).unwrap();
        rocky.add_task(task(1, "Walk Rocky", 30, Priority::High, Some(at(1, 10, 0)), Frequency::OneTime));
        let mut luna = Pet::new("Luna", "Cat", 2).unwrap();
        luna.add_task(task(2, "Feed Luna", 20, Priority::High, Some(at(1, 10, 0)), Frequency::OneTime));

        let mut owner = Owner::new("Abigail");
        owner.add_pet(rocky);
        owner.add_pet(luna);
        let scheduler = Scheduler::with_owner(owner);

        let conflicts = scheduler.detect_all_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].scope, ConflictScope::DifferentPets);
    }

    #[test]
    fn sequential_tasks_do_not_conflict() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Walk", 30, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime),
            task(2, "Feed", 30, Priority::High, Some(at(1, 9, 30)), Frequency::OneTime),
        ]);
        assert!(scheduler.detect_all_conflicts().is_empty());
    }

    #[test]
    fn completed_tasks_are_exempt_from_conflicts() {
        let mut done = task(1, "Walk", 30, Priority::High, Some(at(1, 10, 0)), Frequency::OneTime);
        done.mark_complete();
        let scheduler = scheduler_with_tasks(vec![
            done,
            task(2, "Grooming", 45, Priority::Medium, Some(at(1, 10, 0)), Frequency::OneTime),
        ]);
        assert!(scheduler.detect_all_conflicts().is_empty());
    }

    #[test]
    fn daily_schedule_respects_budget() {
        // 09:00 High and 14:00 Medium, both 30 min, 30-minute budget:
        // priority sorts the 09:00 task first, it fills the budget exactly,
        // and the 14:00 task no longer fits.
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Morning walk", 30, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime),
            task(2, "Afternoon walk", 30, Priority::Medium, Some(at(1, 14, 0)), Frequency::OneTime),
        ]);

        let schedule = scheduler.generate_daily_schedule(30, at(1, 0, 0).date());
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].0, "Rocky");
        assert_eq!(schedule[0].1.description, "Morning walk");
    }

    #[test]
    fn daily_schedule_prefers_high_priority_over_earlier_due() {
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Low early", 40, Priority::Low, Some(at(1, 8, 0)), Frequency::OneTime),
            task(2, "High late", 40, Priority::High, Some(at(1, 17, 0)), Frequency::OneTime),
        ]);

        let schedule = scheduler.generate_daily_schedule(60, at(1, 0, 0).date());
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].1.description, "High late");
    }

    #[test]
    fn daily_schedule_is_greedy_without_backtracking() {
        // The 50-minute High task consumes the budget; the later 20-minute
        // Medium task would fit alone but is still skipped.
        let scheduler = scheduler_with_tasks(vec![
            task(1, "Big", 50, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime),
            task(2, "Small", 20, Priority::Medium, Some(at(1, 10, 0)), Frequency::OneTime),
            task(3, "Tiny", 10, Priority::Low, Some(at(1, 11, 0)), Frequency::OneTime),
        ]);

        let schedule = scheduler.generate_daily_schedule(60, at(1, 0, 0).date());
        let picked: Vec<_> = schedule.iter().map(|(_, t)| t.description.as_str()).collect();
        assert_eq!(picked, ["Big", "Tiny"]);

        let total: u32 = schedule.iter().map(|(_, t)| t.duration_minutes).sum();
        assert!(total <= 60);
    }

    #[test]
    fn daily_schedule_ignores_other_dates_and_completed() {
        let mut done = task(1, "Done today", 10, Priority::High, Some(at(1, 9, 0)), Frequency::OneTime);
        done.mark_complete();
        let scheduler = scheduler_with_tasks(vec![
            done,
            task(2, "Tomorrow", 10, Priority::High, Some(at(2, 9, 0)), Frequency::OneTime),
            task(3, "Unscheduled", 10, Priority::High, None, Frequency::OneTime),
            task(4, "Today", 10, Priority::Medium, Some(at(1, 15, 0)), Frequency::OneTime),
        ]);

        let schedule = scheduler.generate_daily_schedule(120, at(1, 0, 0).date());
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].1.description, "Today");
    }

    #[test]
    fn recurring_generation_steps_from_original_due() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Morning walk",
            30,
            Priority::High,
            Some(at(1, 9, 0)),
            Frequency::Daily,
        )]);

        // June 1 due time, window June 3..=June 5: instances on 3rd, 4th, 5th
        let created = scheduler.generate_recurring_tasks(at(3, 0, 0), at(5, 23, 59));
        assert_eq!(created, 3);

        let tasks = scheduler.all_tasks();
        assert_eq!(tasks.len(), 4);
        let due_times: Vec<_> = tasks.iter().skip(1).map(|(_, t)| t.due_time).collect();
        assert_eq!(
            due_times,
            [Some(at(3, 9, 0)), Some(at(4, 9, 0)), Some(at(5, 9, 0))]
        );
        assert!(tasks.iter().skip(1).all(|(_, t)| !t.is_completed));
    }

    #[test]
    fn recurring_generation_skips_one_time_and_unscheduled() {
        let mut scheduler = scheduler_with_tasks(vec![
            task(1, "Vet", 60, Priority::High, Some(at(1, 10, 0)), Frequency::OneTime),
            task(2, "Someday", 20, Priority::Low, None, Frequency::Daily),
        ]);

        let created = scheduler.generate_recurring_tasks(at(1, 0, 0), at(10, 0, 0));
        assert_eq!(created, 0);
        assert_eq!(scheduler.all_tasks().len(), 2);
    }

    #[test]
    fn recurring_generation_beyond_window_creates_nothing() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            1,
            "Walk",
            30,
            Priority::High,
            Some(at(20, 9, 0)),
            Frequency::Daily,
        )]);

        // Task's own due time is already past the window end
        let created = scheduler.generate_recurring_tasks(at(1, 0, 0), at(5, 0, 0));
        assert_eq!(created, 0);
    }

    #[test]
    fn recurring_instances_get_fresh_ids() {
        let mut scheduler = scheduler_with_tasks(vec![task(
            3,
            "Weekly brush",
            15,
            Priority::Medium,
            Some(at(1, 9, 0)),
            Frequency::Weekly,
        )]);

        let created = scheduler.generate_recurring_tasks(at(1, 0, 0), at(20, 0, 0));
        assert_eq!(created, 2); // June 8 and June 15

        let ids: Vec<_> = scheduler.all_tasks().iter().map(|(_, t)| t.id).collect();
        assert_eq!(ids, [TaskId::new(3), TaskId::new(4), TaskId::new(5)]);
    }

    proptest! {
        #[test]
        fn time_sort_orders_scheduled_before_unscheduled(
            offsets in prop::collection::vec(prop::option::of(0i64..10_000), 0..20)
        ) {
            let base = at(1, 0, 0);
            let tasks: Vec<Task> = offsets
                .iter()
                .enumerate()
                .map(|(i, offset)| {
                    task(
                        i as u64 + 1,
                        "Task",
                        10,
                        Priority::Medium,
                        offset.map(|m| base + Duration::minutes(m)),
                        Frequency::OneTime,
                    )
                })
                .collect();
            let scheduler = scheduler_with_tasks(tasks);

            let mut sorted = scheduler.all_tasks();
            Scheduler::sort_by_time(&mut sorted);

            // Scheduled tasks first, in non-decreasing order; then unscheduled
            let first_none = sorted
                .iter()
                .position(|(_, t)| t.due_time.is_none())
                .unwrap_or(sorted.len());
            prop_assert!(sorted[first_none..].iter().all(|(_, t)| t.due_time.is_none()));
            let timed: Vec<_> = sorted[..first_none]
                .iter()
                .map(|(_, t)| t.due_time.unwrap())
                .collect();
            prop_assert!(timed.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
